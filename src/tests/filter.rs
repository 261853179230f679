use super::{document_filter, effective_filter, filter_files};
use crate::store::Severity;
use crate::test_support::RecordingNotifier;
use std::path::{Path, PathBuf};

#[test]
fn test_invalid_override_falls_back_to_global() {
    let notifier = RecordingNotifier::default();

    let filter = effective_filter(Some("(unclosed"), "^projects/", &notifier).unwrap();

    assert_eq!(filter.as_str(), "^projects/");
    assert_eq!(notifier.messages.borrow().len(), 1);
    assert_eq!(notifier.count(Severity::Warning), 1);
}

#[test]
fn test_valid_override_wins() {
    let notifier = RecordingNotifier::default();

    let filter = effective_filter(Some("daily"), "^projects/", &notifier).unwrap();

    assert_eq!(filter.as_str(), "daily");
    assert!(notifier.messages.borrow().is_empty());
}

#[test]
fn test_everything_invalid_shows_all_files() {
    let notifier = RecordingNotifier::default();

    let filter = effective_filter(Some("[a-"), "*oops", &notifier);

    assert!(filter.is_none());
    assert_eq!(notifier.count(Severity::Warning), 1);
    assert_eq!(notifier.count(Severity::Error), 1);
}

#[test]
fn test_empty_patterns_mean_no_filter() {
    let notifier = RecordingNotifier::default();

    assert!(effective_filter(Some(""), "", &notifier).is_none());
    assert!(effective_filter(None, "", &notifier).is_none());
    assert!(notifier.messages.borrow().is_empty());
}

#[test]
fn test_filter_matches_paths_relative_to_root() {
    let root = Path::new("vault");
    let files = vec![
        PathBuf::from("vault/projects/alpha.md"),
        PathBuf::from("vault/daily/2024-01-01.md"),
        PathBuf::from("vault/projects.md"),
    ];
    let notifier = RecordingNotifier::default();
    let filter = effective_filter(None, "^projects/", &notifier);

    let kept = filter_files(&files, root, filter.as_ref());

    assert_eq!(kept, [PathBuf::from("vault/projects/alpha.md")]);
    assert_eq!(filter_files(&files, root, None), files);
}

#[test]
fn test_document_filter_reads_front_matter() {
    let notifier = RecordingNotifier::default();
    let text = "---\nlist-dolly-file-regex: \"^daily/\"\n---\n- item\n";

    let filter = document_filter(text, "^projects/", &notifier).unwrap();
    let plain = document_filter("- item\n", "^projects/", &notifier).unwrap();

    assert_eq!(filter.as_str(), "^daily/");
    assert_eq!(plain.as_str(), "^projects/");
}

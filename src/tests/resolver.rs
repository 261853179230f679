use super::{find_heading, insertion_for, resolve_insertion_point, Placement};
use crate::formats::markdown::MarkdownFormat;
use crate::snapshot::StructuralSnapshot;

fn parse(text: &str) -> StructuralSnapshot {
    StructuralSnapshot::parse(text, &MarkdownFormat).unwrap()
}

#[test]
fn test_last_heading_resolves_to_end_of_document() {
    let text = "# A\n\n- a\n\n# B\n\n- b\n";
    let snapshot = parse(text);

    let offset = resolve_insertion_point(&snapshot, Some(&snapshot.headings[1]));

    assert_eq!(offset, Some(text.len()));
}

#[test]
fn test_non_last_heading_resolves_to_next_heading() {
    let text = "# A\n\n# B\n- b\n\n# C\n- c\n";
    let snapshot = parse(text);

    let offset = resolve_insertion_point(&snapshot, Some(&snapshot.headings[1]));

    assert_eq!(offset, Some(snapshot.headings[2].span.start.offset));
    assert_eq!(offset, text.find("# C"));
}

#[test]
fn test_subheading_ends_parent_section() {
    let text = "# A\n- a\n## A.1\n- b\n";
    let snapshot = parse(text);

    assert_eq!(
        resolve_insertion_point(&snapshot, Some(&snapshot.headings[0])),
        text.find("## A.1")
    );
}

#[test]
fn test_no_heading_is_end_of_document() {
    let text = "# A\n- a\n";

    assert_eq!(resolve_insertion_point(&parse(text), None), Some(text.len()));
}

#[test]
fn test_duplicate_titles_are_told_apart_by_position() {
    let text = "## Notes\n- a\n## Other\n## Notes\n- b\n";
    let snapshot = parse(text);

    assert_eq!(
        resolve_insertion_point(&snapshot, Some(&snapshot.headings[0])),
        text.find("## Other")
    );
    assert_eq!(
        resolve_insertion_point(&snapshot, Some(&snapshot.headings[2])),
        Some(text.len())
    );
    assert_eq!(
        find_heading(&snapshot, "Notes").map(|h| h.span.start.offset),
        Some(0)
    );
}

#[test]
fn test_heading_from_stale_snapshot_is_not_found() {
    let before = parse("# A\n- a\n# B\n");
    let after = parse("intro\n\n# A\n- a\n# B\n");

    assert_eq!(
        resolve_insertion_point(&after, Some(&before.headings[1])),
        None
    );
}

#[test]
fn test_new_heading_appends_heading_and_item() {
    let text = "# A\n- a\n";
    let snapshot = parse(text);

    let (offset, block) = insertion_for(
        &snapshot,
        &Placement::NewHeading(" Later ".to_string()),
        "- x\n  - y\n",
    )
    .unwrap();

    assert_eq!(offset, text.len());
    assert_eq!(block, "## Later\n\n- x\n  - y");
}

#[test]
fn test_find_heading_is_exact() {
    let snapshot = parse("# Tasks\n# tasks done\n");

    assert!(find_heading(&snapshot, "tasks").is_none());
    assert_eq!(find_heading(&snapshot, "tasks done").unwrap().level, 1);
}

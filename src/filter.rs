//! Narrowing the candidate destination files with a regular expression.
//!
//! A document can override the configured pattern through its front-matter. Patterns that fail
//! to compile are reported and skipped rather than failing the move: a broken override falls
//! back to the global pattern, and a broken global pattern means no filtering at all.

use crate::frontmatter::{front_matter, FILE_REGEX_KEY};
use crate::store::{Notifier, Severity};
use regex::Regex;
use std::path::{Path, PathBuf};

#[must_use]
/// Compiles the filter in effect for a document.
///
/// `document_pattern` is the document's own override, if it has one. An empty pattern on either
/// level counts as unset.
pub fn effective_filter(
    document_pattern: Option<&str>,
    global_pattern: &str,
    notifier: &dyn Notifier,
) -> Option<Regex> {
    if let Some(pattern) = document_pattern.filter(|p| !p.is_empty()) {
        match Regex::new(pattern) {
            Ok(regex) => return Some(regex),
            Err(e) => notifier.notify(
                &format!(
                    "Regex in front-matter property \"{FILE_REGEX_KEY}\" is invalid: {pattern} \
                     ({e}), falling back to global settings instead."
                ),
                Severity::Warning,
            ),
        }
    }

    if global_pattern.is_empty() {
        return None;
    }

    match Regex::new(global_pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            notifier.notify(
                &format!(
                    "Global regex setting is invalid: {global_pattern} ({e}). \
                     Showing all files; please fix it in the settings."
                ),
                Severity::Error,
            );
            None
        }
    }
}

#[must_use]
/// Reads the override from `text`'s front-matter and compiles the filter in effect for it.
pub fn document_filter(text: &str, global_pattern: &str, notifier: &dyn Notifier) -> Option<Regex> {
    let document_pattern = front_matter(text).and_then(|fm| fm.string(FILE_REGEX_KEY));
    effective_filter(document_pattern.as_deref(), global_pattern, notifier)
}

#[must_use]
/// Files whose path relative to `root` matches `filter`, or all files without a filter.
///
/// Paths are matched with `/` separators on every platform.
pub fn filter_files(files: &[PathBuf], root: &Path, filter: Option<&Regex>) -> Vec<PathBuf> {
    let Some(filter) = filter else {
        return files.to_vec();
    };

    files
        .iter()
        .filter(|file| filter.is_match(&relative_path(file, root)))
        .cloned()
        .collect()
}

#[must_use]
/// `file` relative to `root`, with `/` separators.
pub fn relative_path(file: &Path, root: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
#[path = "tests/filter.rs"]
mod tests;

//! Headings and the sections they open.
//!
//! A section covers a heading and everything up to the next heading of any level, or the end of
//! the document for the last one. Sections are flat: a `##` heading ends the section of the `#`
//! heading above it, which is what makes "end of this heading's content" a single offset.

use crate::span::Span;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// An ATX heading line.
pub struct Heading {
    /// The heading line, from line start to end of line (newline excluded).
    pub span: Span,
    /// Heading text without markup symbols.
    pub title: String,
    /// Number of `#` markers (1 to 6).
    pub level: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// The region owned by one heading.
pub struct Section {
    /// From the heading's line start to the next heading or the end of the document.
    pub span: Span,
}

/// Heading text with the opening markers already removed.
///
/// Drops an optional closing sequence of `#` when it is separated from the text by whitespace.
pub(crate) fn heading_title(rest: &str) -> String {
    let rest = rest.trim();
    let open = rest.trim_end_matches('#');
    if open.is_empty() {
        String::new()
    } else if open.ends_with([' ', '\t']) {
        open.trim_end().to_string()
    } else {
        rest.to_string()
    }
}

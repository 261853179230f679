//! Where a moved item lands in its destination.
//!
//! Insertion points come from section boundaries rather than from scanning for blank lines, so
//! the result does not depend on how much trailing whitespace the chosen section happens to have.

use crate::section::Heading;
use crate::snapshot::StructuralSnapshot;
use serde::Serialize;

/// Heading level used when a move creates its destination heading.
pub const NEW_HEADING_LEVEL: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Where in the destination document the item goes.
pub enum Placement {
    /// Append at the end of the document.
    FileEnd,
    /// Append at the end of this heading's section.
    Heading(Heading),
    /// Append a new heading with this text at the end of the document, then the item.
    NewHeading(String),
}

#[must_use]
/// Offset at which an item is inserted for `heading`, or end of document for `None`.
///
/// The heading is matched by the start offset of its span, not by its text, so duplicate
/// headings stay distinct. A heading that is not in `snapshot` yields `None`: the snapshot is
/// stale or the heading came from another document, and falling back to the end of the file
/// would put the item somewhere the user did not pick.
pub fn resolve_insertion_point(
    snapshot: &StructuralSnapshot,
    heading: Option<&Heading>,
) -> Option<usize> {
    let Some(heading) = heading else {
        return Some(snapshot.len);
    };

    let index = snapshot
        .headings
        .iter()
        .position(|h| h.span.start.offset == heading.span.start.offset)?;

    Some(
        snapshot
            .sections
            .get(index + 1)
            .map_or(snapshot.len, |next| next.span.start.offset),
    )
}

#[must_use]
/// First heading whose text is exactly `title`.
pub fn find_heading<'a>(snapshot: &'a StructuralSnapshot, title: &str) -> Option<&'a Heading> {
    snapshot.headings.iter().find(|h| h.title == title)
}

#[must_use]
/// Insertion offset and block to insert for moving `item` to `placement`.
pub fn insertion_for(
    snapshot: &StructuralSnapshot,
    placement: &Placement,
    item: &str,
) -> Option<(usize, String)> {
    match placement {
        Placement::FileEnd => Some((snapshot.len, item.to_string())),
        Placement::Heading(heading) => {
            resolve_insertion_point(snapshot, Some(heading)).map(|offset| (offset, item.to_string()))
        }
        Placement::NewHeading(title) => Some((
            snapshot.len,
            format!(
                "{} {}\n\n{}",
                "#".repeat(NEW_HEADING_LEVEL),
                title.trim(),
                item.trim_end()
            ),
        )),
    }
}

#[cfg(test)]
#[path = "tests/resolver.rs"]
mod tests;

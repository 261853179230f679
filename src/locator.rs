//! Finding the list item under a line.

use crate::snapshot::{ListItem, StructuralSnapshot};

#[must_use]
/// The first list item whose line range contains `line` (zero-based).
///
/// `None` means the line is not part of a list, which callers treat as "nothing to move".
pub fn find_list_item_at_line(snapshot: &StructuralSnapshot, line: usize) -> Option<&ListItem> {
    snapshot
        .list_items
        .iter()
        .find(|item| item.span.contains_line(line))
}

#[cfg(test)]
#[path = "tests/locator.rs"]
mod tests;

//! list-dolly: move Markdown list items between heading sections.
//!
//! A list item (with everything nested under it) is located from a line number, a destination
//! document and heading are chosen, and the item is cut from its source and pasted at the end of
//! the destination section. The structure of each document comes from a tree-sitter parse of its
//! current text, and every edit is a pure splice over byte spans of that same text.

pub mod config;
pub mod error;
pub mod filter;
pub mod formats;
pub mod frontmatter;
pub mod input;
pub mod locator;
pub mod mover;
pub mod picker;
pub mod resolver;
pub mod section;
pub mod snapshot;
pub mod span;
pub mod store;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

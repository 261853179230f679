//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over document formats by providing the
//! tree-sitter language and the queries that pick out headings and list items. The structural
//! snapshot only ever talks to a format through this trait.

use ratatui::text::Line;

pub mod markdown;

/// Tree-sitter grammar and queries describing the structure of one document format.
pub trait Format {
    /// Grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing heading nodes as `@heading`.
    fn heading_query(&self) -> &str;
    /// Query capturing list item nodes as `@item`.
    fn list_item_query(&self) -> &str;
    /// Renders a heading for display in a picker.
    fn format_heading_display(&self, level: usize, title: &str) -> Line<'static>;
}

//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides tree-sitter queries for parsing markdown documents and extracting their
//! structure from ATX-style headings (# syntax) and list items of any marker style.

use crate::formats::Format;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Tree-sitter queries for ATX-style markdown headings and list items.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }

    fn list_item_query(&self) -> &'static str {
        "(list_item) @item"
    }

    fn format_heading_display(&self, level: usize, title: &str) -> Line<'static> {
        let color = match level {
            1 => Color::Cyan,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::Magenta,
        };
        let indent = "  ".repeat(level.saturating_sub(1));

        Line::from(vec![
            Span::raw(indent),
            Span::styled(
                "#".repeat(level),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {title}")),
        ])
    }
}

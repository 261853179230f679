//! Point-in-time structure of a document: headings, sections and list items.
//!
//! A snapshot is built from one read of a document and is only valid for that exact text. All of
//! its spans are byte offsets, so any edit to the text invalidates it; callers re-read and
//! re-parse rather than patch offsets by hand.

use crate::formats::Format;
use crate::frontmatter::front_matter;
use crate::section::{heading_title, Heading, Section};
use crate::span::{LineIndex, Span};
use std::ops::Range;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor, Tree};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
/// A top-level list item with all of its nested sub-items.
pub struct ListItem {
    /// From the start of the item's first line to its last non-blank character.
    pub span: Span,
    /// Text covered by `span`.
    pub text: String,
}

#[derive(Clone, Debug)]
/// Structure of one version of a document.
pub struct StructuralSnapshot {
    /// Headings in document order.
    pub headings: Vec<Heading>,
    /// One section per heading, in the same order.
    pub sections: Vec<Section>,
    /// Outermost list items in document order; their spans never overlap.
    pub list_items: Vec<ListItem>,
    /// End-of-document offset.
    pub len: usize,
}

impl StructuralSnapshot {
    #[must_use]
    /// Parses `text` with the grammar and queries of `format`.
    ///
    /// Returns `None` when the grammar cannot be loaded, a query does not compile, or the parser
    /// produces no tree. Content inside a leading front-matter block is ignored.
    pub fn parse(text: &str, format: &dyn Format) -> Option<Self> {
        let language = format.language();
        let mut parser = Parser::new();
        parser.set_language(&language).ok()?;
        let tree = parser.parse(text, None)?;

        let index = LineIndex::new(text);
        let body_start = front_matter(text).map_or(0, |fm| fm.range.end);

        let headings: Vec<Heading> =
            capture_ranges(&language, format.heading_query(), &tree, text, is_block_level)?
                .into_iter()
                .filter(|node| node.start >= body_start)
                .filter_map(|node| heading_at(text, &index, &node))
                .collect();

        let sections = headings
            .iter()
            .enumerate()
            .map(|(i, heading)| {
                let end = headings
                    .get(i + 1)
                    .map_or(text.len(), |next| next.span.start.offset);
                Section {
                    span: index.span(heading.span.start.offset, end),
                }
            })
            .collect();

        let mut list_items: Vec<ListItem> = Vec::new();
        for node in capture_ranges(&language, format.list_item_query(), &tree, text, |_| true)? {
            if node.start < body_start {
                continue;
            }
            let start = index.line_start(node.start);
            let end = start + text[start..node.end].trim_end().len();
            if end <= start {
                continue;
            }
            // Nested items are already inside their parent's span.
            if list_items
                .last()
                .is_some_and(|parent| start < parent.span.end.offset)
            {
                continue;
            }
            list_items.push(ListItem {
                span: index.span(start, end),
                text: text[start..end].to_string(),
            });
        }

        debug!(
            headings = headings.len(),
            list_items = list_items.len(),
            len = text.len(),
            "parsed structural snapshot"
        );

        Some(Self {
            headings,
            sections,
            list_items,
            len: text.len(),
        })
    }
}

fn capture_ranges(
    language: &Language,
    source: &str,
    tree: &Tree,
    text: &str,
    keep: impl Fn(&Node) -> bool,
) -> Option<Vec<Range<usize>>> {
    let query = Query::new(language, source).ok()?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), text.as_bytes());

    let mut ranges = Vec::new();
    while let Some(found) = matches.next() {
        for capture in found.captures.iter().filter(|c| keep(&c.node)) {
            ranges.push(capture.node.start_byte()..capture.node.end_byte());
        }
    }
    ranges.sort_by_key(|range| (range.start, std::cmp::Reverse(range.end)));
    ranges.dedup();
    Some(ranges)
}

/// Headings inside list items or block quotes are item content, not document structure.
fn is_block_level(node: &Node) -> bool {
    let mut parent = node.parent();
    while let Some(ancestor) = parent {
        if matches!(ancestor.kind(), "list_item" | "block_quote") {
            return false;
        }
        parent = ancestor.parent();
    }
    true
}

fn heading_at(text: &str, index: &LineIndex, node: &Range<usize>) -> Option<Heading> {
    let start = index.line_start(node.start);
    let end = text[start..].find('\n').map_or(text.len(), |i| start + i);
    let end = start + text[start..end].trim_end_matches('\r').len();
    let line = text[start..end].trim_start();
    let level = line.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }

    Some(Heading {
        span: index.span(start, end),
        title: heading_title(&line[level..]),
        level,
    })
}

#[cfg(test)]
#[path = "tests/snapshot.rs"]
mod tests;

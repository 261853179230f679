//! Byte spans over document text and the pure splices built on them.
//!
//! Every structural element handed out by a snapshot carries a [`Span`]. The functions here are
//! the only places that cut text by offset, so they check bounds and UTF-8 boundaries up front
//! and report a [`SpanError`] instead of panicking on stale offsets.

use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
/// A point in a document, addressed both by byte offset and by line and column.
pub struct Position {
    /// Byte offset from the start of the text.
    pub offset: usize,
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based byte column within the line.
    pub column: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
/// Half-open byte range `[start.offset, end.offset)` over a document.
pub struct Span {
    /// First byte covered by the span.
    pub start: Position,
    /// First byte past the span.
    pub end: Position,
}

impl Span {
    #[must_use]
    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    #[must_use]
    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    #[must_use]
    /// Whether `line` falls within `[start.line, end.line]`.
    pub fn contains_line(&self, line: usize) -> bool {
        self.start.line <= line && line <= self.end.line
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Offsets that do not fit the text they are applied to.
pub enum SpanError {
    /// The range runs past the end of the text or is reversed.
    #[error("span {start}..{end} is out of range for text of length {len}")]
    OutOfRange {
        /// Requested start offset.
        start: usize,
        /// Requested end offset.
        end: usize,
        /// Length of the text.
        len: usize,
    },
    /// The offset splits a multi-byte character.
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary {
        /// Offending offset.
        offset: usize,
    },
}

fn check(text: &str, start: usize, end: usize) -> Result<(), SpanError> {
    if start > end || end > text.len() {
        return Err(SpanError::OutOfRange {
            start,
            end,
            len: text.len(),
        });
    }
    for offset in [start, end] {
        if !text.is_char_boundary(offset) {
            return Err(SpanError::NotCharBoundary { offset });
        }
    }
    Ok(())
}

/// Maps byte offsets to line and column positions for one version of a text.
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    #[must_use]
    /// Records the start offset of every line in `text`.
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            line_starts,
            len: text.len(),
        }
    }

    #[must_use]
    /// Position of `offset`, clamped to the end of the text.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position {
            offset,
            line,
            column: offset - self.line_starts[line],
        }
    }

    #[must_use]
    /// Span between two offsets.
    pub fn span(&self, start: usize, end: usize) -> Span {
        Span {
            start: self.position(start),
            end: self.position(end),
        }
    }

    #[must_use]
    /// Offset at which the line containing `offset` begins.
    pub fn line_start(&self, offset: usize) -> usize {
        self.line_starts[self.position(offset).line]
    }
}

/// Text covered by `span`.
///
/// # Errors
///
/// Returns an error if the span does not fit `text`.
pub fn substring<'a>(text: &'a str, span: &Span) -> Result<&'a str, SpanError> {
    check(text, span.start.offset, span.end.offset)?;
    Ok(&text[span.start.offset..span.end.offset])
}

/// Remove `span` from `text` along with the blank run that follows it.
///
/// The whitespace after the removed range is consumed up to the start of the next non-blank
/// line, so that line keeps its indentation. When nothing but whitespace follows, it is all
/// removed.
///
/// # Errors
///
/// Returns an error if the span does not fit `text`.
pub fn splice_out(text: &str, span: &Span) -> Result<String, SpanError> {
    check(text, span.start.offset, span.end.offset)?;
    let rest = &text[span.end.offset..];
    let blank = rest.len() - rest.trim_start().len();
    let skip = if blank == rest.len() {
        blank
    } else {
        rest[..blank].rfind('\n').map_or(0, |i| i + 1)
    };

    let mut out = String::with_capacity(text.len() - span.len());
    out.push_str(&text[..span.start.offset]);
    out.push_str(&rest[skip..]);
    Ok(out)
}

/// Insert `block` at `offset`, separated from the text before it by one blank line.
///
/// Leading blank lines and trailing whitespace of `block` are dropped first; the indentation of
/// its first line is kept. The block is followed by a newline, or by a blank line when more
/// content comes after it. Separators and the block's own line breaks use the line ending of
/// `text`, so a CRLF document stays CRLF.
///
/// # Errors
///
/// Returns an error if `offset` does not fit `text`.
pub fn splice_in(text: &str, offset: usize, block: &str) -> Result<String, SpanError> {
    check(text, offset, offset)?;
    let eol = line_ending(text);
    let block = trim_block(block).replace("\r\n", "\n");
    let block = if eol == "\n" {
        block
    } else {
        block.replace('\n', eol)
    };
    let (head, tail) = text.split_at(offset);

    let mut out = String::with_capacity(text.len() + block.len() + 4 * eol.len());
    out.push_str(head);
    if !head.is_empty() {
        if !head.ends_with('\n') {
            out.push_str(eol);
            out.push_str(eol);
        } else if !(head.ends_with("\n\n") || head.ends_with("\n\r\n")) {
            out.push_str(eol);
        }
    }
    out.push_str(&block);
    if tail.is_empty() {
        out.push_str(eol);
    } else if !(tail.starts_with('\n') || tail.starts_with("\r\n")) {
        out.push_str(eol);
        out.push_str(eol);
    }
    out.push_str(tail);
    Ok(out)
}

/// `"\r\n"` when `text` uses CRLF line breaks, `"\n"` otherwise.
fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

fn trim_block(block: &str) -> &str {
    let block = block.trim_end();
    let blank = block.len() - block.trim_start().len();
    let skip = block[..blank].rfind('\n').map_or(0, |i| i + 1);
    &block[skip..]
}

#[cfg(test)]
#[path = "tests/span.rs"]
mod tests;

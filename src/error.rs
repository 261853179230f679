//! Failures of a move operation.
//!
//! Every variant aborts the move. None of them is shown to the user directly by the core; the
//! orchestrator turns whichever one occurred into a single notification.

use crate::span::SpanError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Why a move did not complete.
pub enum MoveError {
    /// The line is not inside any list item.
    #[error("no list item found at line {}", .line + 1)]
    NoListItem {
        /// Zero-based line that was searched.
        line: usize,
    },
    /// The chosen heading is no longer where the destination's structure says it was.
    #[error("heading \"{heading}\" not found in {}", .file.display())]
    HeadingNotFound {
        /// Text of the heading that was looked for.
        heading: String,
        /// Document that was searched.
        file: PathBuf,
    },
    /// No structure could be derived for a document.
    #[error("no structural metadata available for {}", .file.display())]
    MissingMetadata {
        /// Document that could not be parsed.
        file: PathBuf,
    },
    /// Reading a document, or writing the first one, failed.
    #[error("could not access {}: {source}", .file.display())]
    Io {
        /// Document being read or written.
        file: PathBuf,
        /// Underlying failure.
        source: io::Error,
    },
    /// The destination was written but the source was not, so the item now exists twice.
    #[error(
        "list item was added to {} but could not be removed from {}: {source}",
        .written.display(),
        .failed.display()
    )]
    PartialWrite {
        /// Document that already holds the new content.
        written: PathBuf,
        /// Document that still holds its old content.
        failed: PathBuf,
        /// Underlying failure.
        source: io::Error,
    },
    /// The insertion point falls inside the item being moved.
    #[error("cannot insert at offset {insertion} inside the moved item at {start}..{end}")]
    OverlappingSplice {
        /// Start offset of the moved item.
        start: usize,
        /// End offset of the moved item.
        end: usize,
        /// Computed insertion offset.
        insertion: usize,
    },
    /// Offsets did not fit the text they were applied to.
    #[error("internal error: {0}")]
    Span(#[from] SpanError),
}

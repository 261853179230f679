//! The move itself: locate an item, pick a destination, splice, write, report.
//!
//! Every step reads the documents it needs afresh and derives a new structural snapshot from
//! exactly the text it is about to edit. Offsets from one snapshot are never applied to text
//! that may have changed since, which is why `apply` re-reads the source even though `locate`
//! already looked at it.

use crate::error::MoveError;
use crate::filter::{document_filter, filter_files};
use crate::formats::Format;
use crate::locator::find_list_item_at_line;
use crate::resolver::{find_heading, insertion_for, Placement};
use crate::snapshot::{ListItem, StructuralSnapshot};
use crate::span::{splice_in, splice_out, substring, Span};
use crate::store::{DocumentStore, Notifier, Severity};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Tracks the lifecycle of one move.
///
/// ```text
/// Idle -> Located -> DestinationChosen -> Applied -> Reported
///            |               |               |
///            +---------------+---------------+--> (abort, reported as an error)
/// ```
///
/// Cancelling the destination choice leaves the mover in `Located` with nothing written. Once
/// `apply` has issued a write there is no way back: a failure after that point is reported, not
/// undone.
pub enum MoveState {
    /// No move has started.
    Idle,
    /// The list item under the cursor line was found.
    Located,
    /// A destination file and placement were picked.
    DestinationChosen,
    /// The documents were rewritten.
    Applied,
    /// The user was told the move succeeded.
    Reported,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A destination document and where in it the item goes.
pub struct MoveTarget {
    /// Destination document.
    pub file: PathBuf,
    /// Position within the destination.
    pub placement: Placement,
}

/// Everything a chooser is shown when asked for a destination.
pub struct MoveRequest<'a> {
    /// Document the item comes from.
    pub source: &'a Path,
    /// The item being moved.
    pub item: &'a ListItem,
    /// Documents that passed the filter.
    pub candidates: Vec<PathBuf>,
    /// Directory the candidates were collected from.
    pub root: &'a Path,
    /// Source of the filter in effect, if any.
    pub filter: Option<String>,
}

/// Picks the destination of a move.
pub trait DestinationChooser {
    /// The chosen destination, or `None` if the user cancelled.
    fn choose(&mut self, request: &MoveRequest<'_>, mover: &Mover<'_>) -> Option<MoveTarget>;
}

/// Documents and filter settings a move draws its candidates from.
pub struct MoveOptions {
    /// Directory documents were collected from; filters match paths relative to it.
    pub root: PathBuf,
    /// All documents that could be destinations before filtering.
    pub documents: Vec<PathBuf>,
    /// Configured filter pattern, overridable per document.
    pub global_pattern: String,
}

#[derive(Clone, Debug, Serialize)]
/// Outcome of a completed move.
pub struct MoveReport {
    /// Document the item was taken from.
    pub source: PathBuf,
    /// Document the item was put in.
    pub destination: PathBuf,
    /// Heading the item was placed under, if any.
    pub heading: Option<String>,
    /// Whether the heading was created by this move.
    pub created_heading: bool,
    /// The moved text.
    pub item: String,
}

impl MoveReport {
    #[must_use]
    /// One-line confirmation naming source and destination.
    pub fn message(&self) -> String {
        if same_document(&self.source, &self.destination) {
            "List item moved successfully".to_string()
        } else {
            format!(
                "List item moved from \"{}\" to \"{}\"",
                display_name(&self.source),
                display_name(&self.destination)
            )
        }
    }
}

/// Runs moves against a document store, reporting through a notifier.
pub struct Mover<'a> {
    store: &'a dyn DocumentStore,
    notifier: &'a dyn Notifier,
    format: &'a dyn Format,
    state: MoveState,
}

impl<'a> Mover<'a> {
    #[must_use]
    /// Creates an idle mover.
    pub fn new(
        store: &'a dyn DocumentStore,
        notifier: &'a dyn Notifier,
        format: &'a dyn Format,
    ) -> Self {
        Self {
            store,
            notifier,
            format,
            state: MoveState::Idle,
        }
    }

    #[must_use]
    /// Where the current move has got to.
    pub fn state(&self) -> MoveState {
        self.state
    }

    /// Passes a message to the user through this mover's notifier.
    pub fn notify(&self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity);
    }

    /// Reads `file` and derives its structure from that exact text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn snapshot(&self, file: &Path) -> Result<(String, StructuralSnapshot), MoveError> {
        let text = self.store.read(file).map_err(|source| MoveError::Io {
            file: file.to_path_buf(),
            source,
        })?;
        let snapshot =
            StructuralSnapshot::parse(&text, self.format).ok_or_else(|| MoveError::MissingMetadata {
                file: file.to_path_buf(),
            })?;
        Ok((text, snapshot))
    }

    /// Finds the list item at zero-based `line` of `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` cannot be read or parsed, or no list item covers `line`.
    pub fn locate(&mut self, source: &Path, line: usize) -> Result<ListItem, MoveError> {
        let (_, snapshot) = self.snapshot(source)?;
        self.locate_in(&snapshot, line)
    }

    fn locate_in(
        &mut self,
        snapshot: &StructuralSnapshot,
        line: usize,
    ) -> Result<ListItem, MoveError> {
        let item = find_list_item_at_line(snapshot, line)
            .cloned()
            .ok_or(MoveError::NoListItem { line })?;
        debug!(
            line,
            start = item.span.start.offset,
            end = item.span.end.offset,
            "located list item"
        );
        self.state = MoveState::Located;
        Ok(item)
    }

    /// Asks `chooser` for a destination. `None` is a cancellation and changes nothing.
    pub fn choose_destination(
        &mut self,
        chooser: &mut dyn DestinationChooser,
        request: &MoveRequest<'_>,
    ) -> Option<MoveTarget> {
        let target = chooser.choose(request, self)?;
        debug!(file = %target.file.display(), placement = ?target.placement, "destination chosen");
        self.state = MoveState::DestinationChosen;
        Some(target)
    }

    /// Moves the list item at zero-based `line` of `source` to `target`.
    ///
    /// Both documents are read again here. Moving between documents writes the destination
    /// first and the source second; moving within one document composes both edits against a
    /// single read and writes once.
    ///
    /// # Errors
    ///
    /// Returns an error if a document cannot be read, parsed or written, the item or heading is
    /// gone, or the insertion point falls inside the item.
    pub fn apply(
        &mut self,
        source: &Path,
        line: usize,
        target: &MoveTarget,
    ) -> Result<MoveReport, MoveError> {
        let item = if same_document(source, &target.file) {
            self.apply_within(source, line, &target.placement)?
        } else {
            self.apply_across(source, line, target)?
        };

        self.state = MoveState::Applied;
        let (heading, created_heading) = match &target.placement {
            Placement::FileEnd => (None, false),
            Placement::Heading(heading) => (Some(heading.title.clone()), false),
            Placement::NewHeading(title) => (Some(title.clone()), true),
        };
        Ok(MoveReport {
            source: source.to_path_buf(),
            destination: target.file.clone(),
            heading,
            created_heading,
            item,
        })
    }

    fn apply_across(
        &mut self,
        source: &Path,
        line: usize,
        target: &MoveTarget,
    ) -> Result<String, MoveError> {
        let (target_text, target_snapshot) = self.snapshot(&target.file)?;
        let (source_text, source_snapshot) = self.snapshot(source)?;
        let item = self.locate_in(&source_snapshot, line)?;
        let item_text = substring(&source_text, &item.span)?;

        let (offset, block) = insertion_for(&target_snapshot, &target.placement, item_text)
            .ok_or_else(|| heading_not_found(target))?;
        let new_target = splice_in(&target_text, offset, &block)?;
        let new_source = splice_out(&source_text, &item.span)?;
        debug!(offset, file = %target.file.display(), "inserting into destination");

        self.store
            .write(&target.file, &new_target)
            .map_err(|source| MoveError::Io {
                file: target.file.clone(),
                source,
            })?;
        self.notifier.refresh(&target.file);

        self.store
            .write(source, &new_source)
            .map_err(|e| MoveError::PartialWrite {
                written: target.file.clone(),
                failed: source.to_path_buf(),
                source: e,
            })?;
        self.notifier.refresh(source);

        Ok(item_text.to_string())
    }

    fn apply_within(
        &mut self,
        file: &Path,
        line: usize,
        placement: &Placement,
    ) -> Result<String, MoveError> {
        let (text, snapshot) = self.snapshot(file)?;
        let item = self.locate_in(&snapshot, line)?;
        let item_text = substring(&text, &item.span)?;

        let (offset, block) = insertion_for(&snapshot, placement, item_text).ok_or_else(|| {
            heading_not_found(&MoveTarget {
                file: file.to_path_buf(),
                placement: placement.clone(),
            })
        })?;
        let removed = splice_out(&text, &item.span)?;
        let offset = compose_offset(&item.span, offset, text.len() - removed.len())?;
        let new_text = splice_in(&removed, offset, &block)?;
        debug!(offset, file = %file.display(), "moving within document");

        self.store
            .write(file, &new_text)
            .map_err(|source| MoveError::Io {
                file: file.to_path_buf(),
                source,
            })?;
        self.notifier.refresh(file);

        Ok(item_text.to_string())
    }

    /// Locates, asks for a destination, applies and reports a move.
    ///
    /// This is the boundary where failures stop: whatever happens, the user receives exactly
    /// one notification, either the confirmation or the error. The error is also returned so
    /// callers can set an exit status. `Ok(None)` means the user cancelled.
    ///
    /// # Errors
    ///
    /// Returns the error that aborted the move, after it has been reported.
    pub fn run(
        &mut self,
        source: &Path,
        line: usize,
        options: &MoveOptions,
        chooser: &mut dyn DestinationChooser,
    ) -> Result<Option<MoveReport>, MoveError> {
        self.state = MoveState::Idle;
        let outcome = self.run_steps(source, line, options, chooser);
        match &outcome {
            Ok(Some(report)) => {
                info!(
                    source = %report.source.display(),
                    destination = %report.destination.display(),
                    "list item moved"
                );
                self.notifier.notify(&report.message(), Severity::Info);
                self.state = MoveState::Reported;
            }
            Ok(None) => debug!("move cancelled"),
            Err(e) => self.notifier.notify(&e.to_string(), Severity::Error),
        }
        outcome
    }

    fn run_steps(
        &mut self,
        source: &Path,
        line: usize,
        options: &MoveOptions,
        chooser: &mut dyn DestinationChooser,
    ) -> Result<Option<MoveReport>, MoveError> {
        let (text, snapshot) = self.snapshot(source)?;
        let item = self.locate_in(&snapshot, line)?;

        let filter = document_filter(&text, &options.global_pattern, self.notifier);
        let request = MoveRequest {
            source,
            item: &item,
            candidates: filter_files(&options.documents, &options.root, filter.as_ref()),
            root: &options.root,
            filter: filter.map(|regex| regex.as_str().to_string()),
        };

        let Some(target) = self.choose_destination(chooser, &request) else {
            return Ok(None);
        };
        self.apply(source, line, &target).map(Some)
    }
}

/// Insertion offset after the item has been removed from the same text.
///
/// `removed` is the number of bytes `splice_out` took out, including the blank run after the
/// item. An insertion point strictly inside the item cannot be composed.
///
/// # Errors
///
/// Returns an error if `insertion` lies inside `item`.
pub fn compose_offset(item: &Span, insertion: usize, removed: usize) -> Result<usize, MoveError> {
    let start = item.start.offset;
    if insertion <= start {
        Ok(insertion)
    } else if insertion >= start + removed {
        Ok(insertion - removed)
    } else if insertion >= item.end.offset {
        Ok(start)
    } else {
        Err(MoveError::OverlappingSplice {
            start,
            end: item.end.offset,
            insertion,
        })
    }
}

/// Chooses a destination given up front, as on the command line.
///
/// A heading that does not exist in the destination is created at its end.
pub struct FixedDestination {
    /// Destination document.
    pub file: PathBuf,
    /// Heading to place the item under; `None` appends at the end of the document.
    pub heading: Option<String>,
    /// Create this heading instead of looking one up.
    pub new_heading: Option<String>,
}

impl DestinationChooser for FixedDestination {
    fn choose(&mut self, _request: &MoveRequest<'_>, mover: &Mover<'_>) -> Option<MoveTarget> {
        let placement = if let Some(title) = &self.new_heading {
            Placement::NewHeading(title.clone())
        } else if let Some(title) = &self.heading {
            match mover.snapshot(&self.file) {
                Ok((_, snapshot)) => find_heading(&snapshot, title).map_or_else(
                    || {
                        debug!(heading = %title, "heading not present, creating it");
                        Placement::NewHeading(title.clone())
                    },
                    |heading| Placement::Heading(heading.clone()),
                ),
                // Let `apply` report the unreadable destination.
                Err(e) => {
                    debug!(file = %self.file.display(), error = %e, "destination unreadable");
                    Placement::NewHeading(title.clone())
                }
            }
        } else {
            Placement::FileEnd
        };

        Some(MoveTarget {
            file: self.file.clone(),
            placement,
        })
    }
}

fn heading_not_found(target: &MoveTarget) -> MoveError {
    let heading = match &target.placement {
        Placement::Heading(heading) => heading.title.clone(),
        Placement::NewHeading(title) => title.clone(),
        Placement::FileEnd => String::new(),
    };
    MoveError::HeadingNotFound {
        heading,
        file: target.file.clone(),
    }
}

fn same_document(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
#[path = "tests/mover.rs"]
mod tests;

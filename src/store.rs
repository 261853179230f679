//! Collaborators the mover talks to: where documents live and who hears about the outcome.
//!
//! The mover never touches the file system or the terminal directly. Tests swap in in-memory
//! implementations of these traits to exercise failure paths a real disk rarely produces.

use std::path::Path;
use std::{fs, io};
use tracing::{error, info, warn};

/// Reads and writes whole documents.
///
/// A read issued after a successful write to the same document must return the written text.
pub trait DocumentStore {
    /// Current text of the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Replaces the text of the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn write(&self, path: &Path, text: &str) -> io::Result<()>;
}

/// Documents stored as files on disk.
pub struct FsStore;

impl DocumentStore for FsStore {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, text: &str) -> io::Result<()> {
        fs::write(path, text)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How prominently a notification should be shown.
pub enum Severity {
    /// Confirmation of a completed action.
    Info,
    /// Something was wrong but the operation carried on.
    Warning,
    /// The operation was aborted or a setting is unusable.
    Error,
}

/// Receives user-facing messages. Fire-and-forget.
pub trait Notifier {
    /// Shows `message` to the user.
    fn notify(&self, message: &str, severity: Severity);

    /// Tells any open view of `path` that its text changed on disk.
    fn refresh(&self, _path: &Path) {}
}

/// Notifier for the command line: messages go to the log and to stderr.
pub struct ConsoleNotifier {
    /// Also print informational messages, not just warnings and errors.
    pub verbose: bool,
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => {
                info!("{message}");
                if self.verbose {
                    eprintln!("{message}");
                }
            }
            Severity::Warning => {
                warn!("{message}");
                eprintln!("Warning: {message}");
            }
            Severity::Error => {
                error!("{message}");
                eprintln!("Error: {message}");
            }
        }
    }

    fn refresh(&self, path: &Path) {
        info!(path = %path.display(), "document rewritten");
    }
}

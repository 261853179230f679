use crate::store::{DocumentStore, Notifier, Severity};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// Documents held in memory, with optional write failures per path.
#[derive(Default)]
pub struct MemoryStore {
    pub docs: RefCell<HashMap<PathBuf, String>>,
    pub failing: HashSet<PathBuf>,
    pub writes: RefCell<Vec<PathBuf>>,
}

impl MemoryStore {
    pub fn with(docs: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (path, text) in docs {
            store
                .docs
                .borrow_mut()
                .insert(PathBuf::from(path), (*text).to_string());
        }
        store
    }

    pub fn text(&self, path: &str) -> String {
        self.docs.borrow()[Path::new(path)].clone()
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.docs
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such document"))
    }

    fn write(&self, path: &Path, text: &str) -> io::Result<()> {
        if self.failing.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.writes.borrow_mut().push(path.to_path_buf());
        self.docs
            .borrow_mut()
            .insert(path.to_path_buf(), text.to_string());
        Ok(())
    }
}

/// Notifier that keeps every message it is given.
#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: RefCell<Vec<(String, Severity)>>,
    pub refreshed: RefCell<Vec<PathBuf>>,
}

impl RecordingNotifier {
    pub fn count(&self, severity: Severity) -> usize {
        self.messages
            .borrow()
            .iter()
            .filter(|(_, s)| *s == severity)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.messages
            .borrow_mut()
            .push((message.to_string(), severity));
    }

    fn refresh(&self, path: &Path) {
        self.refreshed.borrow_mut().push(path.to_path_buf());
    }
}

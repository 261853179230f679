//! Finding the documents a move can target.
//!
//! Paths may be files or directories. Directories are walked with `ignore`, so hidden entries such
//! as `.git` or `.obsidian` and anything gitignored are skipped; only files with one of the
//! configured extensions are kept.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Collects matching documents under `paths`, sorted by file name and then by path.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn find_documents(
    paths: &[PathBuf],
    extensions: &[String],
) -> Result<Vec<PathBuf>, ignore::Error> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk(path, extensions, &mut documents)?;
        } else if has_extension(path, extensions) {
            documents.push(path.clone());
        }
    }

    documents.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));
    documents.dedup();
    Ok(documents)
}

fn walk(
    dir: &Path,
    extensions: &[String],
    documents: &mut Vec<PathBuf>,
) -> Result<(), ignore::Error> {
    let walker = WalkBuilder::new(dir)
        .hidden(true)
        .parents(true)
        .ignore(true)
        .git_ignore(true)
        .git_exclude(true)
        .build();

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
            continue;
        }
        let path = entry.into_path();
        if has_extension(&path, extensions) {
            documents.push(path);
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e.as_str())))
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;

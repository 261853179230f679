//! YAML front-matter at the top of a document.
//!
//! Only the per-document file filter is read from here, but the block's byte range is also used
//! by the snapshot to keep YAML sequences from being mistaken for list items.

use serde_yaml::{Mapping, Value};
use std::ops::Range;

/// Front-matter key holding a per-document destination filter.
pub const FILE_REGEX_KEY: &str = "list-dolly-file-regex";

/// The front-matter block of a document.
pub struct FrontMatter<'a> {
    /// YAML source between the delimiter lines.
    pub yaml: &'a str,
    /// Bytes occupied by the block, delimiters included.
    pub range: Range<usize>,
}

#[must_use]
/// Finds a front-matter block opened by `---` on the first line.
///
/// The block closes at the next line reading `---` or `...`; an unclosed block is not
/// front-matter.
pub fn front_matter(text: &str) -> Option<FrontMatter<'_>> {
    let first_end = text.find('\n')?;
    if text[..first_end].trim_end() != "---" {
        return None;
    }

    let body_start = first_end + 1;
    let mut offset = body_start;
    for line in text[body_start..].split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            return Some(FrontMatter {
                yaml: &text[body_start..offset],
                range: 0..offset + line.len(),
            });
        }
        offset += line.len();
    }
    None
}

impl FrontMatter<'_> {
    #[must_use]
    /// Scalar value stored under `key`, rendered as a string.
    ///
    /// Returns `None` when the YAML does not parse to a mapping or the value is not a scalar.
    pub fn string(&self, key: &str) -> Option<String> {
        let mapping: Mapping = serde_yaml::from_str(self.yaml).ok()?;
        match mapping.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/frontmatter.rs"]
mod tests;

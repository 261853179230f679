//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a list-dolly.toml, and if present we load settings from there.
//! This provides the destination filter pattern and file extension preferences. A document can
//! still override the pattern through its front-matter.

use facet::Facet;
use std::fs;
use tracing::warn;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "list-dolly.toml";

#[derive(Facet, Clone)]
/// User preferences loaded from list-dolly.toml or falling back to defaults.
pub struct Config {
    #[facet(default = String::new())]
    /// Regular expression destination paths must match; empty shows every file.
    pub file_regex_pattern: String,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_regex_pattern: String::new(),
            file_extensions: vec!["md".to_string()],
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from list-dolly.toml if present.
    pub fn load() -> Self {
        fs::read_to_string(CONFIG_FILE)
            .map_or_else(|_| Self::default(), |contents| Self::parse(&contents))
    }

    #[must_use]
    /// Parse configuration text, keeping defaults if it is invalid.
    pub fn parse(contents: &str) -> Self {
        match facet_toml::from_str::<Self>(contents) {
            Ok(config) => config,
            Err(_) => {
                warn!("ignoring invalid {CONFIG_FILE}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;

//! Noise rules: the denylist of UI-chrome lines stripped before parsing.
//!
//! Pasted exports carry pagination controls, record-count banners and stray
//! column headers around the data rows. Which lines count as chrome is
//! source-UI trivia, so the rules are data, not code: loadable from TOML,
//! with an embedded default pack for zero-config operation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Denylist of non-data lines, matched case-insensitively.
///
/// # Example TOML
/// ```toml
/// prefixes = ["показать"]
/// substrings = ["записей с", "version"]
/// exact = ["действие", "предыдущая"]
/// drop_lone_numbers = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseRules {
    /// Drop lines starting with any of these (lowercase) prefixes
    #[serde(default)]
    pub prefixes: Vec<String>,

    /// Drop lines containing any of these (lowercase) fragments
    #[serde(default)]
    pub substrings: Vec<String>,

    /// Drop lines equal to any of these (lowercase) strings
    #[serde(default)]
    pub exact: Vec<String>,

    /// Drop lines that are nothing but digits (pagination page numbers)
    #[serde(default = "default_drop_lone_numbers")]
    pub drop_lone_numbers: bool,
}

fn default_drop_lone_numbers() -> bool {
    true
}

impl Default for NoiseRules {
    /// The embedded default pack, compiled into the binary.
    fn default() -> Self {
        const DEFAULT_TOML: &str = include_str!("../noise-default.toml");
        toml::from_str(DEFAULT_TOML).expect("embedded noise-default.toml is valid")
    }
}

impl NoiseRules {
    /// Empty rule set that drops nothing.
    pub fn none() -> Self {
        Self {
            prefixes: Vec::new(),
            substrings: Vec::new(),
            exact: Vec::new(),
            drop_lone_numbers: false,
        }
    }

    /// Load a rule pack from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file is unreadable or not valid TOML. These
    /// concern the tool's own configuration, not the pasted data, so they are
    /// surfaced instead of swallowed.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read noise rules file: {}",
                path.as_ref().display()
            )
        })?;
        let rules: NoiseRules =
            toml::from_str(&content).with_context(|| "Failed to parse TOML noise rules")?;
        Ok(rules)
    }

    /// True when the line is UI chrome and must be dropped before parsing.
    pub fn is_noise(&self, line: &str) -> bool {
        let low = line.trim().to_lowercase();
        if self.exact.iter().any(|e| low == *e) {
            return true;
        }
        if self.prefixes.iter().any(|p| low.starts_with(p.as_str())) {
            return true;
        }
        if self.substrings.iter().any(|s| low.contains(s.as_str())) {
            return true;
        }
        if self.drop_lone_numbers && !low.is_empty() && low.bytes().all(|b| b.is_ascii_digit()) {
            return true;
        }
        false
    }
}

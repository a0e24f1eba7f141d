//! Configuration file support
//!
//! Loads settings from ~/.solhl.toml (or %USERPROFILE%\.solhl.toml on Windows)
//!
//! Example:
//! ```toml
//! # solhl configuration
//! line-numbers = true
//! semantic = true
//! tab-width = 4
//!
//! [styles]
//! Keyword = "#93a1a1 bold"
//! Comment = "green italic"
//! Import = "bright-blue on black"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::{HighlightError, Result};
use crate::syntax::StyleTable;

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Whether the semantic (syntax tree) pass runs
    pub semantic: bool,
    /// Tab width for display
    pub tab_width: usize,
    /// Style per highlight category
    pub styles: StyleTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            semantic: true,
            tab_width: 8,
            styles: StyleTable::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".solhl.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".solhl.toml"))
        }
    }

    /// Load configuration from the default path
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        log::debug!("loading configuration from {}", path.display());
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();
        config.apply(&table)?;
        Ok(config)
    }

    /// Apply settings from a parsed table; unknown keys are ignored
    fn apply(&mut self, table: &Table) -> Result<()> {
        if let Some(value) = table.get("line-numbers").and_then(Value::as_bool) {
            self.show_line_numbers = value;
        }

        if let Some(value) = table.get("semantic").and_then(Value::as_bool) {
            self.semantic = value;
        }

        if let Some(value) = table.get("tab-width").and_then(Value::as_integer) {
            self.tab_width = value.clamp(1, 16) as usize;
        }

        if let Some(styles) = table.get("styles") {
            let styles = styles.as_table().ok_or_else(|| {
                HighlightError::Message("'styles' must be a table".to_string())
            })?;
            let mut overrides = Vec::new();
            for (name, value) in styles {
                let description = value.as_str().ok_or_else(|| {
                    HighlightError::Message(format!("style for '{name}' must be a string"))
                })?;
                overrides.push((name.as_str(), description));
            }
            self.styles = self.styles.clone().with_overrides(overrides)?;
        }

        for key in table.keys() {
            if !matches!(key.as_str(), "line-numbers" | "semantic" | "tab-width" | "styles") {
                log::warn!("ignoring unknown configuration key '{key}'");
            }
        }

        Ok(())
    }
}

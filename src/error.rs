//! Error types for solhl
//!
//! The highlighting core itself never fails; these errors come from the
//! layers around it (configuration, file I/O, parsing for the semantic pass).

use thiserror::Error;

use crate::lang::ParseError;

/// Result type alias for solhl operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighter error types
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Unknown style tag: {0}")]
    UnknownStyleTag(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Message(String),
}

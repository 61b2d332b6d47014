//! Domain errors for the stagelog logger.

use thiserror::Error;

/// Errors surfaced by logger construction and parsing.
///
/// Most logging operations are fire-and-forget: they report these errors
/// through `tracing` instead of returning them.
#[derive(Debug, Error)]
pub enum LogError {
    /// Unknown level name
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLevel(String),

    /// Unknown output mode name
    #[error("Invalid output mode: {0}. Must be one of: tty, plain")]
    InvalidOutputMode(String),

    /// Environment variable outside the boolean grammar
    #[error("'{value}' is not a valid value for environment variable {name}")]
    InvalidBool {
        /// Variable name
        name: String,
        /// Rejected value
        value: String,
    },

    /// Masked words could not be compiled into a table
    #[error("Failed to build redaction table: {0}")]
    Redaction(#[from] regex::Error),

    /// Log file could not be opened or written
    #[error("File sink error: {0}")]
    FileSink(#[from] std::io::Error),

    /// Record could not be serialized
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result alias for logger operations
pub type LogResult<T> = Result<T, LogError>;

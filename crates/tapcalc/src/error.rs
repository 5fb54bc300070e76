//! Error types for the command-line front end
//!
//! Calculator failures never show up here: those become the `Error`
//! display state. These are the failures that make the process exit non-zero.

use thiserror::Error;

use crate::buffer::UnknownKey;
use crate::clock::InvalidClockFormat;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Label outside the keypad vocabulary
    #[error(transparent)]
    UnknownKey(#[from] UnknownKey),

    /// Malformed config file
    #[error("Invalid config file: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Report serialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bad clock format in config or flags
    #[error(transparent)]
    Clock(#[from] InvalidClockFormat),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

//! Error types for confcal.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while building or writing calendar files.
#[derive(Error, Debug)]
pub enum ConfCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event ends before it starts ({end} < {start})")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for confcal operations.
pub type ConfCalResult<T> = Result<T, ConfCalError>;

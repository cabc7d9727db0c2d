//! Error types for daygrid.

use thiserror::Error;

use crate::event::ValidationError;

/// Errors that can occur in daygrid operations.
#[derive(Error, Debug)]
pub enum DayGridError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Storage quota exceeded writing '{key}' ({size} bytes, limit {limit})")]
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for DayGridError {
    fn from(e: serde_json::Error) -> Self {
        DayGridError::Serialization(e.to_string())
    }
}

/// Result type alias for daygrid operations.
pub type DayGridResult<T> = Result<T, DayGridError>;

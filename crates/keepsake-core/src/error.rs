//! Error types for Keepsake core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for Keepsake operations.
pub type Result<T> = std::result::Result<T, KeepsakeError>;

/// Core error type for Keepsake operations.
#[derive(Debug, Error)]
pub enum KeepsakeError {
    /// The hashing primitive failed to execute.
    ///
    /// This is an environment fault, not a wrong credential: it must never
    /// consume a login attempt.
    #[error("Digest error: {0}")]
    Digest(String),

    /// Store backend error (read, write, or corrupt contents)
    #[error("Store error: {0}")]
    Store(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for KeepsakeError {
    fn from(err: std::io::Error) -> Self {
        KeepsakeError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for KeepsakeError {
    fn from(err: serde_json::Error) -> Self {
        KeepsakeError::Validation(err.to_string())
    }
}

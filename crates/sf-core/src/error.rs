//! # AppError
//!
//! Centralized error handling for the sponsorship crates.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all sf-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., an unknown storage slot)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., submitting a form with field errors)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// The key-value storage backend failed to read or write the slot
    #[error("storage error: {0}")]
    Storage(String),

    /// The external submission endpoint rejected or never answered the request
    #[error("submission failed: {0}")]
    Submission(String),

    /// Operation not allowed in the current state (e.g., resubmitting a sent form)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Anything else (e.g., a record that cannot be serialized)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// A specialized Result type for sponsorship logic.
pub type Result<T> = std::result::Result<T, AppError>;

//! Unified error handling for mdboard.
//!
//! Core components never emit user-facing text; they raise typed failures
//! which the HTTP layer translates into responses.

use crate::db::DbError;
use thiserror::Error;

/// Errors surfaced by board operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Submitted content was empty after trimming. The submit endpoint
    /// treats this as a silent no-op, not a hard failure.
    #[error("empty message content")]
    EmptyContent,

    /// Any failure reading or writing the persistence layer. Never
    /// recovered locally; the HTTP layer converts it into a 500 and logs.
    #[error("storage error: {0}")]
    Storage(#[from] DbError),
}

impl Error {
    /// Get a static error code string for log field labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyContent => "empty_content",
            Self::Storage(_) => "storage_error",
        }
    }
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, Error>;

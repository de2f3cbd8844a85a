//! Error types for s3glob
//!
//! Every error is fatal for an invocation: it is reported once and the
//! process exits non-zero. Nothing is retried here.

use thiserror::Error;

/// Result type alias using the crate's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the user
#[derive(Debug, Error)]
pub enum Error {
    /// The argument is not a well-formed `s3://bucket/pattern` path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The glob pattern is syntactically invalid
    #[error("Invalid glob pattern: {0}")]
    Pattern(String),

    /// The storage backend failed
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Failures reported by the storage backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// Missing or rejected credentials, or permission denied
    #[error("Access denied: {0}")]
    Auth(String),

    /// The bucket does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport failures and any other service error
    #[error("Network error: {0}")]
    Network(String),
}

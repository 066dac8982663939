//! Error types for tidybuild
//!
//! Uses `thiserror` for library errors. Build errors and warnings reported by
//! the host bundler are data (see `models::Problem`), not variants here.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tidybuild operations
pub type TidyResult<T> = Result<T, TidyError>;

/// Main error type for tidybuild operations
#[derive(Error, Debug)]
pub enum TidyError {
    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// A host event line could not be decoded
    #[error("invalid host event on line {line}: {message}")]
    InvalidEvent { line: usize, message: String },

    /// A build payload file could not be decoded
    #[error("invalid build payload in {file}: {message}")]
    InvalidPayload { file: PathBuf, message: String },

    /// IO error (terminal writes, reading event streams)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

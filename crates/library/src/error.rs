//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("path not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    #[display("not a recognized book file: {}", _0.display())]
    UnsupportedFile(#[error(not(source))] PathBuf),
    #[display("could not extract documents from container")]
    Archive,
    #[display("could not parse book document")]
    Parse,
    #[display("could not start collection worker pool")]
    WorkerPool,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ErrorKind::WorkerPool => true,
            _ => false,
        }
    }
}

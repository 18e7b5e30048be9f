//! Archive Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input path does not exist.
    #[display("file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The container is corrupt or not the format its extension claims.
    #[display("invalid or corrupted archive: {}", _0.display())]
    InvalidArchive(#[error(not(source))] PathBuf),
    /// A payload was not valid UTF-8.
    #[display("payload is not valid UTF-8")]
    Decode,
    /// An I/O operation failed for a reason other than a missing file.
    #[display("I/O error")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exn::ResultExt;

    #[test]
    fn error_kind_display() {
        assert_eq!(
            ErrorKind::NotFound(PathBuf::from("books/missing.zip")).to_string(),
            "file not found: books/missing.zip"
        );
        assert_eq!(ErrorKind::Decode.to_string(), "payload is not valid UTF-8");
    }

    #[test]
    fn error_kind_retryable() {
        assert!(!ErrorKind::Decode.is_retryable());
        assert!(!ErrorKind::NotFound(PathBuf::new()).is_retryable());
        assert!(ErrorKind::Io.is_retryable());
    }

    #[test]
    fn error_from_result() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        let err: Result<()> = result.or_raise(|| ErrorKind::Io);
        // Exn<E> implements Deref<Target = E>
        assert_eq!(*err.unwrap_err(), ErrorKind::Io);
    }
}

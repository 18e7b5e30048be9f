//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use exn::ResultExt;

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("database error")]
    Database,
    #[display("database migration error")]
    Migration,
    /// A row would duplicate an existing author or book. The surrounding
    /// session must be abandoned.
    #[display("uniqueness constraint violated")]
    Constraint,
    #[display("invalid catalog data: {_0}")]
    InvalidData(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Busy/locked databases clear up on their own, duplicates don't.
        matches!(self, ErrorKind::Database)
    }
}

/// Raise `sqlx` errors into the catalog error tree, classifying uniqueness
/// violations as [`ErrorKind::Constraint`].
pub(crate) trait QueryResultExt<T> {
    fn or_raise_query(self) -> Result<T>;
}
impl<T> QueryResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn or_raise_query(self) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => {
                let kind = match e.as_database_error() {
                    Some(db) if db.is_unique_violation() => ErrorKind::Constraint,
                    _ => ErrorKind::Database,
                };
                Err(e).or_raise(|| kind)
            },
        }
    }
}

//! Parser Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A parsing error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The markup is too broken to build a document from.
    #[display("malformed XML near byte {_0}")]
    MalformedXml(#[error(not(source))] usize),
    /// A required field could not be found in the document.
    #[display("missing required field: {_0}")]
    MissingField(#[error(not(source))] &'static str),
    /// A field was found but could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// The raw value that was found.
        value: String,
    },
    /// The document file does not exist.
    #[display("file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The document file could not be read.
    #[display("I/O error")]
    Io,
    /// The document bytes are not valid in its encoding.
    #[display("document is not valid {_0}")]
    Decode(#[error(not(source))] &'static str),
    /// The XML declaration names an encoding we can't decode.
    #[display("unsupported document encoding: {_0}")]
    UnsupportedEncoding(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A document is either well-formed or it isn't; only the filesystem
        // can change its mind.
        matches!(self, ErrorKind::Io)
    }
}

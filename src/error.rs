//! Command-line Error Types

use derive_more::{Display, Error};

/// A command-line error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for command-line operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("configuration error")]
    Config,
    #[display("could not set up logging")]
    Logging,
    #[display("catalog database error")]
    Database,
    #[display("could not collect books")]
    Collect,
    #[display("could not write output")]
    Output,
    #[display("{_0}")]
    InvalidArgument(#[error(not(source))] String),
}

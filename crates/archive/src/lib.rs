//! Payload extraction for book files with automatic format detection.
//!
//! Books arrive in one of three containers, all wrapped by the [`Format`]
//! enum:
//!
//! - **Plain** documents (no extension, or `.fb2`) are read as-is by the
//!   parser and never pass through this crate's decoders.
//! - **Gzip** files (`.gz`) hold exactly one document; see [`gzip`].
//! - **Zip** archives (`.zip`) hold any number of documents, yielded lazily
//!   in archive-listing order; see [`zip`].
//!
//! Detection is extension-based and case-sensitive. Every payload is decoded
//! as UTF-8; malformed sequences are reported as [`ErrorKind::Decode`]
//! instead of being replaced.
//!
//! [`ErrorKind::Decode`]: crate::error::ErrorKind::Decode

mod construct;
pub mod error;
pub mod gzip;
mod util;
pub mod zip;

pub use crate::zip::{Entries, Entry};

/// Extensions (without the leading dot) that identify a book file. The empty
/// string stands for "no extension at all".
pub const RECOGNIZED_EXTENSIONS: [&str; 4] = ["", "fb2", "gz", "zip"];

/// A supported book container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// Raw XML document (no extension or `.fb2`)
    #[default]
    Plain,
    /// Single gzip-compressed document (.gz)
    Gzip,
    /// Zip archive of documents (.zip)
    Zip,
}

#[cfg(test)]
mod tests {
    use crate::Format;

    #[test]
    fn format_default() {
        assert_eq!(Format::default(), Format::Plain);
    }
}

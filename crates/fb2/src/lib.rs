//! FictionBook (FB2) metadata extraction.
//!
//! Only the catalog-relevant fields are read from `<description>`: the book
//! title, the author's first and last name, and the publication year. The
//! body, binaries and every other metadata element are ignored.

mod charset;
mod consts;
mod document;
pub mod error;
pub mod models;
mod tree;

use std::path::Path;
use tracing::instrument;

pub use crate::document::Document;
use crate::error::Result;
pub use crate::models::{AuthorName, ParsedRecord};

/// Easy, top-level entrypoint for the extraction of a [`ParsedRecord`] from
/// raw FB2 markup.
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse(xml: &str) -> Result<ParsedRecord> {
    Document::parse(xml)?.record()
}

/// Read the FB2 file at `path` and extract its [`ParsedRecord`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParsedRecord> {
    Document::open(path)?.record()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse() {
        let record = parse(
            "<FictionBook><description><title-info><author><first-name>John</first-name>\
             <last-name>Doe</last-name></author><book-title>Test</book-title></title-info>\
             <publish-info><year>1</year></publish-info></description></FictionBook>",
        )
        .unwrap();
        assert_eq!(record, ParsedRecord::new("Test").with_author(("John", "Doe")).with_year(1));
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse("<FictionBook><description>").unwrap_err();
        assert!(matches!(*err, ErrorKind::MalformedXml(_)));
    }
}

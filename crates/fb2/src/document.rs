//! Field extraction from a parsed FB2 document.

use crate::{charset, consts};
use crate::error::{Error, ErrorKind, Result};
use crate::models::{AuthorName, ParsedRecord};
use crate::tree::{self, Element};
use exn::{OptionExt, ResultExt};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

/// A parsed book document, ready for field access.
///
/// Construction parses the whole document; each accessor then walks a fixed
/// element path below the `FictionBook` root.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}
impl Document {
    /// Parse a document from raw markup.
    pub fn parse(xml: &str) -> Result<Self> {
        Ok(Self { root: tree::parse(xml)? })
    }

    /// Read and parse the document stored at `path`, honoring the encoding
    /// its XML declaration names.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                exn::bail!(ErrorKind::NotFound(path.to_path_buf()))
            },
            Err(e) => return Err(e).or_raise(|| ErrorKind::Io),
        };
        Self::parse(&charset::decode(&bytes)?)
    }

    fn text(&self, path: &[&str]) -> Option<&str> {
        self.root.find(path).and_then(Element::text)
    }

    /// The book title. Required: a missing or empty `book-title` is an error.
    pub fn name(&self) -> Result<String> {
        self.text(consts::BOOK_TITLE)
            .map(str::to_string)
            .ok_or_raise(|| ErrorKind::MissingField("book-title"))
    }

    pub fn author_first_name(&self) -> Option<String> {
        self.text(consts::AUTHOR_FIRST_NAME).map(str::to_string)
    }

    pub fn author_last_name(&self) -> Option<String> {
        self.text(consts::AUTHOR_LAST_NAME).map(str::to_string)
    }

    /// Both author name halves, or `None` if either one is absent.
    pub fn author(&self) -> Option<AuthorName> {
        Some(AuthorName::new(self.author_first_name()?, self.author_last_name()?))
    }

    /// The publication year, if the document has a `publish-info/year`.
    pub fn published_year(&self) -> Result<Option<i32>> {
        let Some(element) = self.root.find(consts::PUBLISH_YEAR) else {
            return Ok(None);
        };
        let value = element.text().unwrap_or_default();
        let year = value.parse::<i32>().or_raise(|| ErrorKind::ParseError {
            field: "year",
            value: value.to_string(),
        })?;
        Ok(Some(year))
    }

    /// Extract every field into a [`ParsedRecord`].
    #[instrument(level = "trace", skip(self))]
    pub fn record(&self) -> Result<ParsedRecord> {
        let record = ParsedRecord::new(self.name()?).with_year(self.published_year()?);
        Ok(match self.author() {
            Some(author) => record.with_author(author),
            None => record,
        })
    }
}

impl FromStr for Document {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
impl TryFrom<&Document> for ParsedRecord {
    type Error = Error;
    fn try_from(document: &Document) -> Result<Self> {
        document.record()
    }
}

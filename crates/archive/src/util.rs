use crate::Format;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs::File;
use std::path::Path;

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl Format {
    /// Returns the short name (for displaying to user).
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Plain => "plain",
            Format::Gzip => "gzip",
            Format::Zip => "zip",
        }
    }
}

/// Open a file for reading, reporting a missing file as [`ErrorKind::NotFound`].
pub(crate) fn open(path: &Path) -> Result<File> {
    match File::open(path) {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()))
        },
        Err(e) => Err(e).or_raise(|| ErrorKind::Io),
    }
}

/// Decode a payload as strict UTF-8.
pub(crate) fn decode(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).or_raise(|| ErrorKind::Decode)
}

use crate::Format;
use std::path::Path;

impl Format {
    /// Detect the container format from a file extension.
    ///
    /// Returns `None` for extensions that do not identify a book file. Matching
    /// is case-sensitive: `book.GZ` is not recognized.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        match path.as_ref().extension() {
            None => Some(Format::Plain),
            Some(ext) => match ext.to_str()? {
                "fb2" => Some(Format::Plain),
                "gz" => Some(Format::Gzip),
                "zip" => Some(Format::Zip),
                _ => None,
            },
        }
    }

    /// Returns `true` if the path carries one of the
    /// [recognized extensions](crate::RECOGNIZED_EXTENSIONS).
    #[must_use]
    pub fn is_recognized(path: impl AsRef<Path>) -> bool {
        Self::from_path(path).is_some()
    }
}

//! Single-document gzip containers.

use crate::error::{ErrorKind, Result};
use crate::util::{decode, open};
use exn::ResultExt;
use flate2::read::GzDecoder;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::instrument;

/// Decompress a `.gz` file and return its full content as a string.
///
/// # Errors
///
/// - [`ErrorKind::NotFound`] if the path does not exist,
/// - [`ErrorKind::InvalidArchive`] if the stream is not valid gzip,
/// - [`ErrorKind::Decode`] if the decompressed payload is not UTF-8.
#[instrument(skip_all, fields(path = %path.as_ref().display(), output_size))]
pub fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let file = open(path)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut output = Vec::new();
    decoder.read_to_end(&mut output).or_raise(|| ErrorKind::InvalidArchive(path.to_path_buf()))?;
    tracing::Span::current().record("output_size", output.len());
    tracing::debug!("decompressed gzip payload");
    decode(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    const DOCUMENT: &str = "<FictionBook><description/></FictionBook>";

    fn compress(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_read_to_string() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.fb2.gz");
        std::fs::write(&path, compress(DOCUMENT.as_bytes())).unwrap();
        assert_eq!(read_to_string(&path).unwrap(), DOCUMENT);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.gz");
        let err = read_to_string(&path).unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound(path));
    }

    #[test]
    fn test_not_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.gz");
        std::fs::write(&path, DOCUMENT).unwrap();
        let err = read_to_string(&path).unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidArchive(path));
    }

    #[test]
    fn test_invalid_utf8_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.gz");
        std::fs::write(&path, compress(&[0x3c, 0x61, 0xc3, 0x28, 0x3e])).unwrap();
        assert_eq!(*read_to_string(&path).unwrap_err(), ErrorKind::Decode);
    }

    #[test]
    fn test_multibyte_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.gz");
        std::fs::write(&path, compress("Лев Толстой".as_bytes())).unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "Лев Толстой");
    }
}

//! Multi-document zip containers.
//!
//! [`Entries`] is a lazy, finite and non-restartable iterator: each call to
//! `next` reads and decodes exactly one archive member, in the order the
//! archive lists them. Directory members are skipped.

use crate::error::{ErrorKind, Result};
use crate::util::{decode, open};
use exn::ResultExt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::instrument;
use ::zip::ZipArchive;

/// One decoded document from a zip archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Member name as recorded in the archive.
    pub name: String,
    /// Decoded UTF-8 content.
    pub content: String,
}

/// Lazy iterator over the documents of a zip archive.
pub struct Entries {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
    next: usize,
}

impl Entries {
    /// Open a zip archive for lazy extraction.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::NotFound`] if the path does not exist,
    /// - [`ErrorKind::InvalidArchive`] if the central directory cannot be read.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open(&path)?;
        let archive = ZipArchive::new(BufReader::new(file)).or_raise(|| ErrorKind::InvalidArchive(path.clone()))?;
        tracing::debug!(members = archive.len(), "opened zip archive");
        Ok(Self { path, archive, next: 0 })
    }

    /// Reads the member at `index`, returning `None` for directories.
    fn read(&mut self, index: usize) -> Result<Option<Entry>> {
        let mut member =
            self.archive.by_index(index).or_raise(|| ErrorKind::InvalidArchive(self.path.clone()))?;
        if member.is_dir() {
            return Ok(None);
        }
        let name = member.name().to_string();
        tracing::debug!(archive = %self.path.display(), member = %name, "unzipping member");
        let mut bytes = Vec::with_capacity(usize::try_from(member.size()).unwrap_or_default());
        member.read_to_end(&mut bytes).or_raise(|| ErrorKind::InvalidArchive(self.path.clone()))?;
        Ok(Some(Entry { name, content: decode(bytes)? }))
    }
}

impl Iterator for Entries {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.archive.len() {
            let index = self.next;
            self.next += 1;
            match self.read(index) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.archive.len() - self.next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use ::zip::ZipWriter;
    use ::zip::write::SimpleFileOptions;

    fn write_archive(path: &Path, members: &[(&str, &[u8])]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        for (name, data) in members {
            if name.ends_with('/') {
                writer.add_directory(*name, SimpleFileOptions::default()).unwrap();
            } else {
                writer.start_file(*name, SimpleFileOptions::default()).unwrap();
                writer.write_all(data).unwrap();
            }
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_entries_in_listing_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.zip");
        write_archive(
            &path,
            &[("b.fb2", "second".as_bytes()), ("nested/", "".as_bytes()), ("a.fb2", "first".as_bytes())],
        );
        let entries = Entries::open(&path).unwrap().collect::<Result<Vec<_>>>().unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b.fb2", "a.fb2"]);
        assert_eq!(entries[0].content, "second");
        assert_eq!(entries[1].content, "first");
    }

    #[test]
    fn test_iterator_is_not_restartable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.zip");
        write_archive(&path, &[("only.fb2", "content".as_bytes())]);
        let mut entries = Entries::open(&path).unwrap();
        assert!(entries.next().is_some());
        assert!(entries.next().is_none());
        assert!(entries.next().is_none());
    }

    #[test]
    fn test_missing_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.zip");
        let err = Entries::open(&path).err().unwrap();
        assert_eq!(*err, ErrorKind::NotFound(path));
    }

    #[test]
    fn test_not_a_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.zip");
        std::fs::write(&path, "definitely not a zip archive").unwrap();
        let err = Entries::open(&path).err().unwrap();
        assert_eq!(*err, ErrorKind::InvalidArchive(path));
    }

    #[test]
    fn test_invalid_utf8_member() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.zip");
        write_archive(&path, &[("bad.fb2", &[0xff, 0xfe, 0x00][..])]);
        let mut entries = Entries::open(&path).unwrap();
        let err = entries.next().unwrap().unwrap_err();
        assert_eq!(*err, ErrorKind::Decode);
    }
}

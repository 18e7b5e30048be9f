use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use librarian_archive::Format;
use std::path::{Path, PathBuf};
use tracing::{instrument, warn};
use walkdir::WalkDir;

/// Recursively list the book files below `dir`.
///
/// Yields absolute paths, lazily, in walk order. Only files (or symlinks to
/// files) with a recognized extension are yielded; entries that can't be
/// read are logged and skipped.
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn discover(dir: impl AsRef<Path>) -> Result<impl Iterator<Item = PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        exn::bail!(ErrorKind::NotFound(dir.to_path_buf()));
    }
    let root = std::path::absolute(dir).or_raise(|| ErrorKind::NotFound(dir.to_path_buf()))?;
    let files = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!(%error, "skipping unreadable directory entry");
                None
            },
        })
        // Links to files count as files; links to directories are not followed.
        .filter(|entry| entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file()))
        .map(walkdir::DirEntry::into_path)
        .filter(|path| Format::is_recognized(path));
    Ok(files)
}

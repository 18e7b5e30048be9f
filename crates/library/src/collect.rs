use crate::discover::discover;
use crate::error::{Error, ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use librarian_archive::{Entries, Format, gzip};
use librarian_fb2::ParsedRecord;
use rayon::prelude::*;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Where to collect books from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Every book file below a directory. Unreadable files are skipped.
    Directory(PathBuf),
    /// A single book file. Any failure is fatal.
    File(PathBuf),
}

/// A file that was left out of a [`Collection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: PathBuf,
    /// The error and its causes, outermost first, joined by `": "`.
    pub reason: String,
}

/// The records collected from a [`Source`], in no particular order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    pub records: Vec<ParsedRecord>,
    pub skipped: Vec<Skipped>,
}

/// Collect every record from `source`.
///
/// `workers` sizes the pool used for directories, defaulting to the
/// available parallelism.
pub fn find_books(source: &Source, workers: Option<NonZeroUsize>) -> Result<Collection> {
    match source {
        Source::Directory(dir) => books_from_directory(dir, workers),
        Source::File(path) => Ok(Collection { records: books_from_file(path)?, skipped: Vec::new() }),
    }
}

/// Extract the records of one book file, dispatching on its extension.
///
/// Plain documents and gzip files yield a single record; zip archives yield
/// one record per file entry, in listing order. Every document has to parse
/// for the file to count.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn books_from_file(path: impl AsRef<Path>) -> Result<Vec<ParsedRecord>> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_raise(|| ErrorKind::UnsupportedFile(path.to_path_buf()))?;
    if !path.is_file() {
        exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
    }
    debug!(%format, "reading book file");
    let records = match format {
        Format::Plain => vec![librarian_fb2::parse_file(path).or_raise(|| ErrorKind::Parse)?],
        Format::Gzip => {
            let xml = gzip::read_to_string(path).or_raise(|| ErrorKind::Archive)?;
            vec![librarian_fb2::parse(&xml).or_raise(|| ErrorKind::Parse)?]
        },
        Format::Zip => {
            let mut records = Vec::new();
            for entry in Entries::open(path).or_raise(|| ErrorKind::Archive)? {
                let entry = entry.or_raise(|| ErrorKind::Archive)?;
                let record = librarian_fb2::parse(&entry.content).or_raise(|| ErrorKind::Parse)?;
                debug!(entry = %entry.name, "parsed archive entry");
                records.push(record);
            }
            records
        },
    };
    Ok(records)
}

/// Collect the records of every book file below `dir`.
///
/// Files are processed on a dedicated pool of `workers` threads. A file that
/// fails is logged, listed in [`Collection::skipped`] and contributes nothing;
/// only a missing directory or a pool that can't be started fails the call.
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn books_from_directory(dir: impl AsRef<Path>, workers: Option<NonZeroUsize>) -> Result<Collection> {
    let paths: Vec<PathBuf> = discover(dir)?.collect();
    let workers = workers.or_else(|| std::thread::available_parallelism().ok()).map_or(1, NonZeroUsize::get);
    debug!(files = paths.len(), workers, "collecting books");
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("librarian-collect-{index}"))
        .build()
        .or_raise(|| ErrorKind::WorkerPool)?;
    let results: Vec<(PathBuf, Result<Vec<ParsedRecord>>)> = pool.install(|| {
        paths
            .into_par_iter()
            .map(|path| {
                let result = books_from_file(&path);
                (path, result)
            })
            .collect()
    });

    let mut collection = Collection::default();
    for (path, result) in results {
        match result {
            Ok(records) => collection.records.extend(records),
            Err(error) => {
                warn!(path = %path.display(), ?error, "skipping book file");
                collection.skipped.push(Skipped { path, reason: describe(&error) });
            },
        }
    }
    Ok(collection)
}

/// Render an error with the chain of causes below it.
fn describe(error: &Error) -> String {
    let mut causes = Vec::new();
    let mut frame = Some(error.frame());
    while let Some(current) = frame {
        causes.push(current.error().to_string());
        frame = current.children().first();
    }
    causes.join(": ")
}

//! Book discovery and record collection.
//!
//! A directory is walked for files with a recognized extension, and each file
//! is turned into [`ParsedRecord`]s through its container format: plain
//! documents are parsed directly, gzip files are decompressed first and zip
//! archives contribute one record per entry.
//!
//! Files are independent of each other, so a directory is processed on a
//! worker pool and the resulting records come back in no particular order.

mod collect;
mod discover;
pub mod error;

pub use crate::collect::{Collection, Skipped, Source, books_from_directory, books_from_file, find_books};
pub use crate::discover::discover;
pub use librarian_fb2::ParsedRecord;

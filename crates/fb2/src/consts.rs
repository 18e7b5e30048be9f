//! Element paths, relative to the `FictionBook` root, for each extracted field.

pub(crate) const BOOK_TITLE: &[&str] = &["description", "title-info", "book-title"];
pub(crate) const AUTHOR_FIRST_NAME: &[&str] = &["description", "title-info", "author", "first-name"];
pub(crate) const AUTHOR_LAST_NAME: &[&str] = &["description", "title-info", "author", "last-name"];
pub(crate) const PUBLISH_YEAR: &[&str] = &["description", "publish-info", "year"];

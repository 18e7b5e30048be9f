//! SQLite catalog of authors and books.
//!
//! # Architecture
//! The catalog stores two entity types:
//! - **Authors**: unique by the exact `(first_name, last_name)` pair. Only ever
//!   created during ingestion, and only when both halves of the name are known.
//! - **Books**: unique by `(name, year, author_id)`, where a missing year or
//!   author is part of the identity. Deleting an author detaches its books.
//!
//! A [`Database`] is the store handle; every operation runs inside a
//! [`Session`] (one transaction) that the caller commits when done:
//! - [`reconcile`] persists parsed records with find-or-create semantics,
//! - [`search`] looks books up by name, optionally by author and year,
//! - [`delete`] removes one book or purges the whole catalog.

mod db;
pub mod delete;
pub mod error;
pub mod models;
pub mod query;
pub mod reconcile;
mod session;

pub use crate::db::{DEFAULT_MAX_CONNECTIONS, Database};
pub use crate::delete::{Deletion, delete};
pub use crate::models::{Author, Book, BookFilter, Match, NewBook};
pub use crate::query::{BookView, SearchQuery, SearchResults, search};
pub use crate::reconcile::{Outcome, Reconciliation, Summary, reconcile};
pub use crate::session::Session;
pub use librarian_fb2::{AuthorName, ParsedRecord};

//! Find-or-create persistence of parsed records.
//!
//! Every record is resolved against the session it is given, in order, so the
//! rows created for record `N` are visible when record `N + 1` is looked up.
//! A batch that mentions the same author many times creates it exactly once.

use crate::error::Result;
use crate::models::{Author, Book, BookFilter, NewBook};
use crate::session::Session;
use librarian_fb2::{AuthorName, ParsedRecord};
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::{debug, instrument};

/// What happened to the book row of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(Book),
    /// An existing row was overwritten with the record's name and year.
    Updated(Book),
    /// An existing row matched and was left as it is.
    Unchanged(Book),
}
impl Outcome {
    pub fn book(&self) -> &Book {
        match self {
            Outcome::Created(book) | Outcome::Updated(book) | Outcome::Unchanged(book) => book,
        }
    }
}

/// Per-record outcomes of one ingestion batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub outcomes: Vec<Outcome>,
    pub authors_created: usize,
}
impl Reconciliation {
    pub fn summary(&self) -> Summary {
        let mut summary = Summary { authors_created: self.authors_created, ..Summary::default() };
        for outcome in &self.outcomes {
            match outcome {
                Outcome::Created(_) => summary.books_created += 1,
                Outcome::Updated(_) => summary.books_updated += 1,
                Outcome::Unchanged(_) => summary.books_unchanged += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub authors_created: usize,
    pub books_created: usize,
    pub books_updated: usize,
    pub books_unchanged: usize,
}
impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} book(s) created, {} updated, {} unchanged; {} author(s) created",
            self.books_created, self.books_updated, self.books_unchanged, self.authors_created
        )
    }
}

/// Persist `records`, creating authors and books that don't exist yet.
///
/// With `update`, a record whose book already exists overwrites the row's
/// name and year; a record that only differs from an existing row of the same
/// name and author by its year moves that row to the new year instead of
/// adding a second one. Without `update`, existing rows are never touched.
///
/// Nothing is committed here: the caller commits `session` once the whole
/// batch has gone through, and any error leaves it to be rolled back.
#[instrument(skip_all, fields(records = records.len(), update = update))]
pub async fn reconcile(session: &mut Session, records: &[ParsedRecord], update: bool) -> Result<Reconciliation> {
    let mut reconciliation = Reconciliation::default();
    for record in records {
        let author_id = match record.author() {
            Some(name) => Some(resolve_author(session, &name, &mut reconciliation.authors_created).await?.id),
            None => None,
        };
        let book = NewBook::new(&record.name, record.year, author_id);
        let outcome = resolve_book(session, book, update).await?;
        debug!(?outcome, "reconciled record");
        reconciliation.outcomes.push(outcome);
    }
    Ok(reconciliation)
}

async fn resolve_author(session: &mut Session, name: &AuthorName, created: &mut usize) -> Result<Author> {
    if let Some(author) = session.find_author(name).await? {
        return Ok(author);
    }
    let author = session.insert_author(name).await?;
    *created += 1;
    Ok(author)
}

async fn resolve_book(session: &mut Session, book: NewBook, update: bool) -> Result<Outcome> {
    let existing = session.find_books(&BookFilter::identity(&book)).await?.into_iter().next();
    match existing {
        Some(existing) if update => overwrite(session, existing, book).await,
        Some(existing) => Ok(Outcome::Unchanged(existing)),
        None if update => {
            let same_work = BookFilter::named(&book.name).author_id(book.author_id);
            match session.find_books(&same_work).await?.into_iter().next() {
                Some(existing) => overwrite(session, existing, book).await,
                None => Ok(Outcome::Created(session.insert_book(&book).await?)),
            }
        },
        None => Ok(Outcome::Created(session.insert_book(&book).await?)),
    }
}

async fn overwrite(session: &mut Session, mut existing: Book, book: NewBook) -> Result<Outcome> {
    existing.name = book.name;
    existing.year = book.year;
    session.update_book(&existing).await?;
    Ok(Outcome::Updated(existing))
}

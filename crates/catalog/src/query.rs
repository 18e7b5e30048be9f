//! Book search.

use crate::error::Result;
use crate::models::{Book, BookFilter};
use crate::session::Session;
use librarian_fb2::AuthorName;
use serde::Serialize;
use tracing::{debug, instrument};

/// Search predicates. The book name is always matched exactly; author and
/// year only constrain the search when given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub name: String,
    /// Both halves of the author's name, or no author filter at all.
    pub author: Option<AuthorName>,
    pub year: Option<i32>,
    /// Project the matches to their ids instead of [`BookView`]s.
    pub ids_only: bool,
}
impl SearchQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), author: None, year: None, ids_only: false }
    }

    pub fn author(mut self, author: impl Into<Option<AuthorName>>) -> Self {
        self.author = author.into();
        self
    }

    pub fn year(mut self, year: impl Into<Option<i32>>) -> Self {
        self.year = year.into();
        self
    }

    pub fn ids_only(mut self, ids_only: bool) -> Self {
        self.ids_only = ids_only;
        self
    }
}

/// A matched book as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookView {
    pub name: String,
    pub year: Option<i32>,
    /// Only present when the search was filtered by author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorName>,
}
impl BookView {
    fn new(book: Book, author: Option<&AuthorName>) -> Self {
        Self { name: book.name, year: book.year, author: author.cloned() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResults {
    Ids(Vec<i64>),
    Books(Vec<BookView>),
}
impl SearchResults {
    fn empty(ids_only: bool) -> Self {
        if ids_only { Self::Ids(Vec::new()) } else { Self::Books(Vec::new()) }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Ids(ids) => ids.len(),
            Self::Books(books) => books.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Find every book matching `query`.
///
/// An author filter naming an author that isn't cataloged matches nothing.
/// Without an author filter, books by any author (or none) match.
#[instrument(skip(session))]
pub async fn search(session: &mut Session, query: &SearchQuery) -> Result<SearchResults> {
    let mut filter = BookFilter::named(&query.name);
    if let Some(year) = query.year {
        filter = filter.year(Some(year));
    }
    if let Some(name) = &query.author {
        let Some(author) = session.find_author(name).await? else {
            debug!(author = %name, "no such author");
            return Ok(SearchResults::empty(query.ids_only));
        };
        filter = filter.author_id(Some(author.id));
    }
    let books = session.find_books(&filter).await?;
    debug!(matches = books.len(), "search complete");
    Ok(match query.ids_only {
        true => SearchResults::Ids(books.into_iter().map(|book| book.id).collect()),
        false => SearchResults::Books(
            books.into_iter().map(|book| BookView::new(book, query.author.as_ref())).collect(),
        ),
    })
}

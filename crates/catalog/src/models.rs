use librarian_fb2::AuthorName;
use serde::Serialize;

/// A persisted author, unique by its exact first/last name pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, sqlx::FromRow)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}
impl Author {
    pub fn name(&self) -> AuthorName {
        AuthorName::new(&self.first_name, &self.last_name)
    }
}

/// A persisted book, unique by its `(name, year, author_id)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub year: Option<i32>,
    /// `None` when the book has no known author.
    pub author_id: Option<i64>,
}

/// A book that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub name: String,
    pub year: Option<i32>,
    pub author_id: Option<i64>,
}
impl NewBook {
    pub fn new(name: impl Into<String>, year: Option<i32>, author_id: Option<i64>) -> Self {
        Self { name: name.into(), year, author_id }
    }
}

/// A column constraint in a [`BookFilter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Match<T> {
    /// No constraint on the column.
    #[default]
    Any,
    /// The column must equal the value, where `None` matches only `NULL`.
    Exactly(T),
}

/// Predicate over book rows. The name always has to match exactly; year and
/// author are unconstrained unless set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFilter {
    pub name: String,
    pub year: Match<Option<i32>>,
    pub author_id: Match<Option<i64>>,
}
impl BookFilter {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), year: Match::Any, author_id: Match::Any }
    }

    pub fn year(mut self, year: Option<i32>) -> Self {
        self.year = Match::Exactly(year);
        self
    }

    pub fn author_id(mut self, author_id: Option<i64>) -> Self {
        self.author_id = Match::Exactly(author_id);
        self
    }

    /// Matches exactly one identity triple, `NULL`s included.
    pub fn identity(book: &NewBook) -> Self {
        Self::named(&book.name).year(book.year).author_id(book.author_id)
    }
}

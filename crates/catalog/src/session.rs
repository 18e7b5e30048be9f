//! Scoped transactions and the storage-access operations run inside them.

use crate::error::{ErrorKind, QueryResultExt, Result};
use crate::models::{Author, Book, BookFilter, Match, NewBook};
use exn::ResultExt;
use librarian_fb2::AuthorName;
use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use tracing::instrument;

/// One unit of catalog work.
///
/// Owns an open transaction (and therefore a pooled connection) for its
/// whole lifetime. [`commit`](Self::commit) persists everything; dropping the
/// session on any other path, including `?` and panics, rolls back and
/// returns the connection to the pool.
pub struct Session {
    tx: Transaction<'static, Sqlite>,
}
impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub(crate) async fn begin(pool: &SqlitePool) -> Result<Self> {
        let tx = pool.begin().await.or_raise_query()?;
        Ok(Self { tx })
    }

    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await.or_raise_query()
    }

    /// Roll back explicitly, surfacing any error that dropping would hide.
    pub async fn rollback(self) -> Result<()> {
        self.tx.rollback().await.or_raise_query()
    }

    // =========================================================================
    // Authors
    // =========================================================================

    #[instrument(level = "trace", skip(self))]
    pub async fn find_author(&mut self, name: &AuthorName) -> Result<Option<Author>> {
        sqlx::query_as(include_str!("../queries/find_author.sql"))
            .bind(&name.first_name)
            .bind(&name.last_name)
            .fetch_optional(&mut *self.tx)
            .await
            .or_raise_query()
    }

    /// Fails with [`ErrorKind::Constraint`] if the author already exists.
    #[instrument(level = "trace", skip(self))]
    pub async fn insert_author(&mut self, name: &AuthorName) -> Result<Author> {
        sqlx::query_as(include_str!("../queries/insert_author.sql"))
            .bind(&name.first_name)
            .bind(&name.last_name)
            .fetch_one(&mut *self.tx)
            .await
            .or_raise_query()
    }

    pub async fn count_authors(&mut self) -> Result<u64> {
        self.count(include_str!("../queries/count_authors.sql")).await
    }

    /// Returns the number of authors removed. Their books are kept, with the
    /// author reference cleared.
    pub async fn delete_all_authors(&mut self) -> Result<u64> {
        let result = sqlx::query(include_str!("../queries/delete_authors.sql"))
            .execute(&mut *self.tx)
            .await
            .or_raise_query()?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    // Books
    // =========================================================================

    /// All books matching `filter`, in insertion order.
    #[instrument(level = "trace", skip(self))]
    pub async fn find_books(&mut self, filter: &BookFilter) -> Result<Vec<Book>> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT id, name, year, author_id FROM books WHERE name = ");
        query.push_bind(filter.name.clone());
        // `IS` rather than `=` so that `Exactly(None)` matches NULL columns.
        if let Match::Exactly(year) = filter.year {
            query.push(" AND year IS ").push_bind(year);
        }
        if let Match::Exactly(author_id) = filter.author_id {
            query.push(" AND author_id IS ").push_bind(author_id);
        }
        query.push(" ORDER BY id");
        query.build_query_as::<Book>().fetch_all(&mut *self.tx).await.or_raise_query()
    }

    pub async fn get_book(&mut self, id: i64) -> Result<Option<Book>> {
        sqlx::query_as(include_str!("../queries/get_book.sql"))
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .or_raise_query()
    }

    /// Fails with [`ErrorKind::Constraint`] if the identity triple is taken.
    #[instrument(level = "trace", skip(self))]
    pub async fn insert_book(&mut self, book: &NewBook) -> Result<Book> {
        if book.name.is_empty() {
            exn::bail!(ErrorKind::InvalidData("book name"));
        }
        sqlx::query_as(include_str!("../queries/insert_book.sql"))
            .bind(&book.name)
            .bind(book.year)
            .bind(book.author_id)
            .fetch_one(&mut *self.tx)
            .await
            .or_raise_query()
    }

    /// Write `name` and `year` back to the row with the book's id. The author
    /// reference is never changed.
    #[instrument(level = "trace", skip(self))]
    pub async fn update_book(&mut self, book: &Book) -> Result<()> {
        if book.name.is_empty() {
            exn::bail!(ErrorKind::InvalidData("book name"));
        }
        sqlx::query(include_str!("../queries/update_book.sql"))
            .bind(&book.name)
            .bind(book.year)
            .bind(book.id)
            .execute(&mut *self.tx)
            .await
            .or_raise_query()?;
        Ok(())
    }

    /// Returns the number of rows removed: `0` or `1`.
    pub async fn delete_book(&mut self, id: i64) -> Result<u64> {
        let result = sqlx::query(include_str!("../queries/delete_book.sql"))
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .or_raise_query()?;
        Ok(result.rows_affected())
    }

    pub async fn delete_all_books(&mut self) -> Result<u64> {
        let result = sqlx::query(include_str!("../queries/delete_books.sql"))
            .execute(&mut *self.tx)
            .await
            .or_raise_query()?;
        Ok(result.rows_affected())
    }

    pub async fn count_books(&mut self) -> Result<u64> {
        self.count(include_str!("../queries/count_books.sql")).await
    }

    async fn count(&mut self, sql: &'static str) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(&mut *self.tx).await.or_raise_query()?;
        u64::try_from(count).or_raise(|| ErrorKind::InvalidData("row count"))
    }
}

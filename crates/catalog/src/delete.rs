//! Removal of cataloged books.

use crate::error::Result;
use crate::session::Session;
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::{debug, instrument};

/// What to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    /// A single book, by id.
    Book(i64),
    /// Every book and every author.
    All,
}
impl Display for Deletion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Deletion::Book(id) => write!(f, "book {id}"),
            Deletion::All => f.write_str("all books and authors"),
        }
    }
}

/// Perform `deletion` and return the number of rows removed.
///
/// Deleting a book that doesn't exist removes nothing and returns `0`.
/// Deleting everything returns books and authors removed, combined.
#[instrument(skip_all, fields(deletion = %deletion))]
pub async fn delete(session: &mut Session, deletion: Deletion) -> Result<u64> {
    let count = match deletion {
        Deletion::Book(id) => match session.get_book(id).await? {
            Some(book) => session.delete_book(book.id).await?,
            None => 0,
        },
        Deletion::All => {
            // Books first, so no author is ever left referenced mid-purge.
            let books = session.delete_all_books().await?;
            let authors = session.delete_all_authors().await?;
            books + authors
        },
    };
    debug!(count, "deleted rows");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use crate::models::NewBook;
    use librarian_fb2::AuthorName;

    async fn seeded() -> (Database, Session, i64) {
        let db = Database::connect_in_memory().await.unwrap();
        let mut session = db.session().await.unwrap();
        let author = session.insert_author(&AuthorName::new("John", "Doe")).await.unwrap();
        let book = session.insert_book(&NewBook::new("Test", Some(1), Some(author.id))).await.unwrap();
        session.insert_book(&NewBook::new("Other", None, None)).await.unwrap();
        (db, session, book.id)
    }

    #[tokio::test]
    async fn test_delete_book() {
        let (_db, mut session, id) = seeded().await;
        assert_eq!(delete(&mut session, Deletion::Book(id)).await.unwrap(), 1);
        assert_eq!(session.get_book(id).await.unwrap(), None);
        assert_eq!(session.count_books().await.unwrap(), 1);
        // The author stays.
        assert_eq!(session.count_authors().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_book() {
        let (_db, mut session, _) = seeded().await;
        assert_eq!(delete(&mut session, Deletion::Book(9999)).await.unwrap(), 0);
        assert_eq!(session.count_books().await.unwrap(), 2);
        assert_eq!(session.count_authors().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let (_db, mut session, _) = seeded().await;
        assert_eq!(delete(&mut session, Deletion::All).await.unwrap(), 3);
        assert_eq!(session.count_books().await.unwrap(), 0);
        assert_eq!(session.count_authors().await.unwrap(), 0);
        assert_eq!(delete(&mut session, Deletion::All).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_is_scoped_to_session() {
        let (db, mut session, id) = seeded().await;
        session.commit().await.unwrap();
        {
            let mut session = db.session().await.unwrap();
            delete(&mut session, Deletion::Book(id)).await.unwrap();
        }
        let mut session = db.session().await.unwrap();
        assert!(session.get_book(id).await.unwrap().is_some());
    }

    #[test]
    fn test_display() {
        assert_eq!(Deletion::Book(7).to_string(), "book 7");
        assert_eq!(Deletion::All.to_string(), "all books and authors");
    }
}

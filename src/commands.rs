//! Subcommand implementations.
//!
//! Each command runs its catalog work in exactly one session, committed only
//! once everything succeeded.

use crate::cli::{DeleteArgs, IngestArgs, SearchArgs, parse_author};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use librarian_catalog::{Database, SearchQuery, SearchResults, Summary};
use librarian_library::find_books;
use std::io::Write;
use std::num::NonZeroUsize;
use tracing::{info, instrument, warn};

#[instrument(skip_all, fields(update = args.update))]
pub async fn ingest(db: &Database, args: &IngestArgs, workers: Option<NonZeroUsize>) -> Result<Summary> {
    let source = args.source()?;
    let collection = tokio::task::spawn_blocking(move || find_books(&source, workers))
        .await
        .or_raise(|| ErrorKind::Collect)?
        .or_raise(|| ErrorKind::Collect)?;
    if !collection.skipped.is_empty() {
        warn!(skipped = collection.skipped.len(), "some files could not be read and were left out");
    }

    let mut session = db.session().await.or_raise(|| ErrorKind::Database)?;
    let reconciliation = librarian_catalog::reconcile(&mut session, &collection.records, args.update)
        .await
        .or_raise(|| ErrorKind::Database)?;
    session.commit().await.or_raise(|| ErrorKind::Database)?;

    let summary = reconciliation.summary();
    info!(%summary, "ingestion complete");
    Ok(summary)
}

/// Print matches to `out`: one id per line, or one JSON object per line.
#[instrument(skip_all, fields(name = %args.name))]
pub async fn search(db: &Database, args: &SearchArgs, out: &mut impl Write) -> Result<usize> {
    let author = args.author.as_deref().and_then(|raw| {
        let author = parse_author(raw);
        if author.is_none() {
            warn!(author = raw, "expected the author as \"FIRST LAST\", searching without an author filter");
        }
        author
    });
    let query = SearchQuery::new(&args.name).author(author).year(args.year).ids_only(args.ids);

    let mut session = db.session().await.or_raise(|| ErrorKind::Database)?;
    let results = librarian_catalog::search(&mut session, &query).await.or_raise(|| ErrorKind::Database)?;
    session.commit().await.or_raise(|| ErrorKind::Database)?;

    match &results {
        SearchResults::Ids(ids) => {
            for id in ids {
                writeln!(out, "{id}").or_raise(|| ErrorKind::Output)?;
            }
        },
        SearchResults::Books(books) => {
            for book in books {
                serde_json::to_writer(&mut *out, book).or_raise(|| ErrorKind::Output)?;
                writeln!(out).or_raise(|| ErrorKind::Output)?;
            }
        },
    }
    Ok(results.len())
}

/// Print the number of deleted rows to `out`.
#[instrument(skip_all)]
pub async fn delete(db: &Database, args: &DeleteArgs, out: &mut impl Write) -> Result<u64> {
    let deletion = args.deletion()?;
    let mut session = db.session().await.or_raise(|| ErrorKind::Database)?;
    let count = librarian_catalog::delete(&mut session, deletion).await.or_raise(|| ErrorKind::Database)?;
    session.commit().await.or_raise(|| ErrorKind::Database)?;
    writeln!(out, "deleted {count} row(s)").or_raise(|| ErrorKind::Output)?;
    Ok(count)
}

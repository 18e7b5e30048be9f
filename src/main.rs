mod cli;
mod commands;
mod error;

use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use librarian_catalog::Database;
use librarian_config::Config;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = librarian_config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    init_tracing(&cli, &config)?;
    debug!(?config, "configuration loaded");

    let db = Database::connect(&config.database.path, Some(config.database.max_connections))
        .await
        .or_raise(|| ErrorKind::Database)?;
    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Command::Ingest(args) => commands::ingest(&db, args, config.collect.workers()).await.map(drop),
        Command::Search(args) => commands::search(&db, args, &mut stdout).await.map(drop),
        Command::Delete(args) => commands::delete(&db, args, &mut stdout).await.map(drop),
    };
    db.close().await;
    result
}

/// Install the global subscriber, logging to stderr.
///
/// `-v`/`-q` win over `RUST_LOG`, which wins over the configured filter.
fn init_tracing(cli: &Cli, config: &Config) -> Result<()> {
    let filter = match cli.verbosity() {
        Some(directive) => EnvFilter::try_new(directive),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log)),
    }
    .or_raise(|| ErrorKind::Logging)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .or_raise(|| ErrorKind::Logging)
}

//! Layered configuration.
//!
//! Values are merged from, in increasing order of precedence:
//! 1. built-in defaults,
//! 2. `librarian.toml` in the platform configuration directory,
//! 3. an explicitly requested file (TOML, YAML or JSON, by extension),
//! 4. `LIBRARIAN_`-prefixed environment variables, with `__` separating
//!    nested keys (`LIBRARIAN_DATABASE__PATH` sets `database.path`).

pub mod error;
mod load;

use crate::error::{ErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::PathBuf;

pub use crate::load::{ENV_PREFIX, load, user_config_path};

const APPLICATION: &str = "librarian";
const DATABASE_FILENAME: &str = "catalog.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub collect: CollectConfig,
    /// Default `tracing` filter directive, used when `RUST_LOG` is unset.
    pub log: String,
}
impl Default for Config {
    fn default() -> Self {
        Self { database: DatabaseConfig::default(), collect: CollectConfig::default(), log: "warn".to_string() }
    }
}
impl Config {
    /// Reject configurations that would only fail later, deep inside a command.
    pub fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("database.path must not be empty".to_string()));
        }
        if self.database.max_connections == 0 {
            exn::bail!(ErrorKind::Invalid("database.max_connections must be at least 1".to_string()));
        }
        if self.collect.workers == Some(0) {
            exn::bail!(ErrorKind::Invalid("collect.workers must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite catalog file, created on first use.
    pub path: PathBuf,
    pub max_connections: u32,
}
impl Default for DatabaseConfig {
    fn default() -> Self {
        let path = directories::ProjectDirs::from("", "", APPLICATION)
            .map(|dirs| dirs.data_dir().join(DATABASE_FILENAME))
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILENAME));
        Self { path, max_connections: 5 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectConfig {
    /// Worker threads for directory collection; unset means one per core.
    pub workers: Option<usize>,
}
impl CollectConfig {
    pub fn workers(&self) -> Option<NonZeroUsize> {
        self.workers.and_then(NonZeroUsize::new)
    }
}

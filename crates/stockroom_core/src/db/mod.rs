//! Inventory store bootstrap.
//!
//! # Responsibility
//! - Open SQLite connections for the product tables and migrate them.
//! - Report which store failed so the inventory boundary can log it.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - Satellite tables reference `products(id)`; foreign keys are enforced.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, MEMORY_STORE};

pub type DbResult<T> = Result<T, DbError>;

/// Storage failure below the repository layer.
#[derive(Debug)]
pub enum DbError {
    /// The store file could not be opened or created.
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    /// Statement, pragma or transaction failure on an open store.
    Sqlite(rusqlite::Error),
    /// Store was migrated by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open inventory store `{}`: {source}", path.display())
            }
            Self::Sqlite(source) => write!(f, "inventory store error: {source}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "inventory store schema v{found} needs a newer build (this build supports up to v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Sqlite(source) => Some(source),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(source: rusqlite::Error) -> Self {
        Self::Sqlite(source)
    }
}

//! Connection bootstrap for the inventory store.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{debug, error};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Path reported for in-memory stores.
pub const MEMORY_STORE: &str = ":memory:";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) the inventory database file and migrates it.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    bootstrap("file", path, || Connection::open(path))
}

/// Opens a private in-memory inventory database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    bootstrap("memory", Path::new(MEMORY_STORE), Connection::open_in_memory)
}

fn bootstrap(
    mode: &str,
    path: &Path,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = open()
        .map_err(|source| DbError::Open {
            path: PathBuf::from(path),
            source,
        })
        .and_then(|mut conn| configure(&mut conn).map(|()| conn));

    match &result {
        Ok(_) => debug!(
            "event=db_open module=db status=ok mode={mode} path={} duration_ms={}",
            path.display(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} path={} duration_ms={} error={err}",
            path.display(),
            started_at.elapsed().as_millis()
        ),
    }
    result
}

fn configure(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}

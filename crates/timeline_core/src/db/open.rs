//! Connection bootstrap for the note store.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a busy timeout.
//! - Returned connections have every migration applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult, IN_MEMORY_LOCATION};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a note store file and applies pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let location = path.display().to_string();
    open_with(&location, || Connection::open(path))
}

/// Opens an in-memory note store and applies pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with(IN_MEMORY_LOCATION, Connection::open_in_memory)
}

fn open_with(
    location: &str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start location={location}");

    let mut conn = connect().map_err(|source| {
        error!(
            "event=db_open module=db status=error location={} duration_ms={} error_code=db_open_failed error={}",
            location,
            started_at.elapsed().as_millis(),
            source
        );
        DbError::Open {
            location: location.to_string(),
            source,
        }
    })?;

    if let Err(err) = bootstrap_connection(&mut conn) {
        error!(
            "event=db_open module=db status=error location={} duration_ms={} error_code=db_bootstrap_failed error={}",
            location,
            started_at.elapsed().as_millis(),
            err
        );
        return Err(err.at(location));
    }

    info!(
        "event=db_open module=db status=ok location={} duration_ms={}",
        location,
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}

//! Connection bootstrap for the key-value storage file.
//!
//! # Responsibility
//! - Open file-backed or in-memory connections.
//! - Create `kv_entries` and stamp the format version on first use.
//!
//! # Invariants
//! - Files stamped by a newer build are rejected before any pragma runs.
//! - File-backed connections run with `journal_mode=WAL`.
//! - Table creation and the version stamp commit together.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Storage format written by this build.
pub const STORAGE_FORMAT_VERSION: u32 = 1;

const KV_ENTRIES_SQL: &str = "
CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenMode {
    File,
    Memory,
}

impl OpenMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
        }
    }
}

/// Opens the on-device storage file, creating it when missing.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with(OpenMode::File, || Connection::open(path))
}

/// Opens throwaway in-memory storage.
///
/// Used by tests and by sessions that must not touch the device.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with(OpenMode::Memory, Connection::open_in_memory)
}

fn open_with(
    mode: OpenMode,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={}", mode.as_str());

    let result = connect().map_err(DbError::Connect).and_then(|mut conn| {
        prepare(&mut conn, mode)?;
        Ok(conn)
    });

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={} duration_ms={}",
            mode.as_str(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={} duration_ms={} error={}",
            mode.as_str(),
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn prepare(conn: &mut Connection, mode: OpenMode) -> DbResult<()> {
    let found = conn
        .query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .map_err(DbError::Connect)?;
    if found > STORAGE_FORMAT_VERSION {
        return Err(DbError::NewerFormat {
            found,
            supported: STORAGE_FORMAT_VERSION,
        });
    }

    if mode == OpenMode::File {
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })
        .map_err(DbError::Connect)?;
    }
    conn.busy_timeout(Duration::from_secs(5)).map_err(DbError::Connect)?;
    if found == STORAGE_FORMAT_VERSION {
        return Ok(());
    }

    let tx = conn.transaction().map_err(DbError::Bootstrap)?;
    tx.execute_batch(KV_ENTRIES_SQL).map_err(DbError::Bootstrap)?;
    tx.pragma_update(None, "user_version", STORAGE_FORMAT_VERSION)
        .map_err(DbError::Bootstrap)?;
    tx.commit().map_err(DbError::Bootstrap)?;

    info!(
        "event=db_bootstrap module=db status=ok mode={} format_version={}",
        mode.as_str(),
        STORAGE_FORMAT_VERSION
    );
    Ok(())
}

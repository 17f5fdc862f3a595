//! SQLite file backing device-local storage.
//!
//! # Responsibility
//! - Open the storage file (or an in-memory stand-in) ready for keyed reads
//!   and writes.
//! - Refuse files stamped by a newer build.
//!
//! # Invariants
//! - The storage format is stamped in `PRAGMA user_version`.
//! - No entry is read or written before the `kv_entries` table exists.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, open_db_in_memory, STORAGE_FORMAT_VERSION};

pub type DbResult<T> = Result<T, DbError>;

/// Failure at the SQLite layer beneath keyed storage.
#[derive(Debug)]
pub enum DbError {
    /// The file could not be opened or its pragmas applied.
    Connect(rusqlite::Error),
    /// Creating `kv_entries` or stamping the format version failed.
    Bootstrap(rusqlite::Error),
    /// Reading or writing an entry failed.
    Entry(rusqlite::Error),
    /// The file was stamped by a newer build; it is left untouched.
    NewerFormat { found: u32, supported: u32 },
}

impl DbError {
    /// Whether the storage file needs a newer build to be opened.
    pub fn requires_newer_build(&self) -> bool {
        matches!(self, Self::NewerFormat { .. })
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connect(err) => write!(f, "cannot open storage: {err}"),
            Self::Bootstrap(err) => write!(f, "cannot prepare storage: {err}"),
            Self::Entry(err) => write!(f, "storage entry access failed: {err}"),
            Self::NewerFormat { found, supported } => write!(
                f,
                "storage format {found} is newer than supported {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connect(err) | Self::Bootstrap(err) | Self::Entry(err) => Some(err),
            Self::NewerFormat { .. } => None,
        }
    }
}

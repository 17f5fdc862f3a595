//! Device-local key-value storage.
//!
//! # Responsibility
//! - Define the keyed-entry contract the store persists through.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - `write` fully replaces the previous value of a key.
//! - Entries under different keys are independent.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Key holding the serialized record list.
pub const RECORDS_KEY: &str = "propertyDashboard";
/// Key holding the serialized dark-mode flag.
pub const DARK_MODE_KEY: &str = "propertyDashboard_darkMode";

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer failure.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Key rejected before reaching the backend.
    InvalidKey(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid storage key `{key}`"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Entry(value))
    }
}

/// Keyed string storage, analogous to a browser's local storage.
pub trait KeyValueStorage {
    /// Returns the stored value, or `None` when the key was never written.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    /// Overwrites the value under `key`.
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }
}

pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

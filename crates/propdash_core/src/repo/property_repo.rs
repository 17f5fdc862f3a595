//! JSON codec over keyed storage entries.
//!
//! # Responsibility
//! - Read/write the `propertyDashboard` record list entry.
//! - Read/write the `propertyDashboard_darkMode` theme entry.
//!
//! # Invariants
//! - Absent entries are reported as `None`, never as defaults.
//! - Malformed entries surface as `RepoError::InvalidData`.
//! - Only finite prices are written, so every saved list loads back.

use crate::model::property::{Property, PropertyId};
use crate::storage::{KeyValueStorage, StorageError, DARK_MODE_KEY, RECORDS_KEY};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persisted state access.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    /// Entry exists but cannot be decoded.
    InvalidData {
        key: &'static str,
        message: String,
    },
    /// A record carries a NaN or infinite price, which JSON cannot hold.
    NonFinitePrice { id: PropertyId, price: f64 },
    /// In-memory state cannot be encoded.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::InvalidData { key, message } => {
                write!(f, "invalid persisted data under `{key}`: {message}")
            }
            Self::NonFinitePrice { id, price } => {
                write!(f, "property {id} has non-finite price {price}")
            }
            Self::Encode(err) => write!(f, "failed to encode state: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::InvalidData { .. } | Self::NonFinitePrice { .. } => None,
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Typed access to the two persisted entries.
pub struct PropertyRepository<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> PropertyRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Loads the record list, or `None` when it was never persisted.
    pub fn load_properties(&self) -> RepoResult<Option<Vec<Property>>> {
        let Some(raw) = self.storage.read(RECORDS_KEY)? else {
            return Ok(None);
        };
        let properties = serde_json::from_str::<Vec<Property>>(&raw).map_err(|err| {
            RepoError::InvalidData {
                key: RECORDS_KEY,
                message: err.to_string(),
            }
        })?;
        Ok(Some(properties))
    }

    /// Overwrites the persisted record list with `properties`.
    ///
    /// # Errors
    /// - `NonFinitePrice` before anything is written; the stored entry is
    ///   left as it was.
    pub fn save_properties(&mut self, properties: &[Property]) -> RepoResult<()> {
        if let Some(bad) = properties.iter().find(|property| !property.price.is_finite()) {
            return Err(RepoError::NonFinitePrice {
                id: bad.id.clone(),
                price: bad.price,
            });
        }
        let raw = serde_json::to_string(properties).map_err(RepoError::Encode)?;
        self.storage.write(RECORDS_KEY, &raw)?;
        Ok(())
    }

    /// Loads the theme flag, or `None` when it was never persisted.
    pub fn load_dark_mode(&self) -> RepoResult<Option<bool>> {
        let Some(raw) = self.storage.read(DARK_MODE_KEY)? else {
            return Ok(None);
        };
        let dark_mode = serde_json::from_str::<bool>(&raw).map_err(|err| RepoError::InvalidData {
            key: DARK_MODE_KEY,
            message: err.to_string(),
        })?;
        Ok(Some(dark_mode))
    }

    pub fn save_dark_mode(&mut self, dark_mode: bool) -> RepoResult<()> {
        let raw = serde_json::to_string(&dark_mode).map_err(RepoError::Encode)?;
        self.storage.write(DARK_MODE_KEY, &raw)?;
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Releases the underlying storage.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::{PropertyRepository, RepoError};
    use crate::model::seed::seed_properties;
    use crate::storage::{KeyValueStorage, MemoryStorage, DARK_MODE_KEY, RECORDS_KEY};
    use chrono::Utc;

    #[test]
    fn missing_entries_load_as_none() {
        let repo = PropertyRepository::new(MemoryStorage::new());
        assert!(repo.load_properties().unwrap().is_none());
        assert!(repo.load_dark_mode().unwrap().is_none());
    }

    #[test]
    fn persisted_layout_uses_camel_case_and_type_name() {
        let mut repo = PropertyRepository::new(MemoryStorage::new());
        repo.save_properties(&seed_properties(Utc::now())).unwrap();

        let raw = repo.storage().read(RECORDS_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let third = &json[2];
        assert_eq!(third["id"], "3");
        assert_eq!(third["type"], "Retail Store");
        assert!(third["createdAt"].is_string());
        assert!(third["updatedAt"].is_string());
        assert!(third.get("created_at").is_none());
    }

    #[test]
    fn corrupted_records_entry_is_reported_not_reseeded() {
        let mut storage = MemoryStorage::new();
        storage.write(RECORDS_KEY, "[{not json").unwrap();
        let repo = PropertyRepository::new(storage);

        let err = repo.load_properties().unwrap_err();
        assert!(matches!(err, RepoError::InvalidData { key, .. } if key == RECORDS_KEY));
    }

    #[test]
    fn non_finite_price_is_refused_before_writing() {
        let mut repo = PropertyRepository::new(MemoryStorage::new());
        let seed = seed_properties(Utc::now());
        repo.save_properties(&seed).unwrap();

        let mut broken = seed.clone();
        broken[4].price = f64::INFINITY;
        let err = repo.save_properties(&broken).unwrap_err();
        assert!(matches!(err, RepoError::NonFinitePrice { ref id, .. } if id.as_str() == "5"));

        assert_eq!(repo.load_properties().unwrap().unwrap(), seed);
    }

    #[test]
    fn dark_mode_entry_is_a_json_boolean() {
        let mut repo = PropertyRepository::new(MemoryStorage::new());
        repo.save_dark_mode(true).unwrap();
        assert_eq!(
            repo.storage().read(DARK_MODE_KEY).unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(repo.load_dark_mode().unwrap(), Some(true));
    }

    #[test]
    fn records_written_by_browser_clients_are_accepted() {
        let mut storage = MemoryStorage::new();
        storage
            .write(
                RECORDS_KEY,
                r#"[{"id":"1718000000000","name":"Hill Flat","type":"Apartment","location":"Goa","price":99000.5,"description":"Sea view.","image":"","createdAt":"2024-06-10T06:13:20.000Z","updatedAt":"2024-06-10T06:13:20.000Z"}]"#,
            )
            .unwrap();
        let repo = PropertyRepository::new(storage);

        let properties = repo.load_properties().unwrap().unwrap();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].id.as_str(), "1718000000000");
        assert_eq!(properties[0].price, 99000.5);
        assert_eq!(properties[0].image.as_deref(), Some(""));
    }
}

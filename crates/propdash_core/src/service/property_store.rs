//! Record Store: authoritative property list with write-through persistence.
//!
//! # Responsibility
//! - Load persisted state on open, bootstrapping the seed set when absent.
//! - Apply create/update/delete and mirror the full list to storage.
//! - Own the persisted dark-mode flag.
//!
//! # Invariants
//! - Ids are assigned by the store and unique across live records.
//! - List order is insertion order; new records are appended.
//! - Every mutation rewrites the whole persisted list before returning.
//! - In-memory state changes only after the persisted write succeeds.
//! - Update/delete of an unknown id leave the list unchanged.

use crate::model::property::{Property, PropertyDraft, PropertyId, PropertyPatch};
use crate::model::seed::{seed_properties, SEED_VERSION};
use crate::repo::property_repo::{PropertyRepository, RepoResult};
use crate::storage::KeyValueStorage;
use chrono::{DateTime, Utc};
use log::{debug, error, info};

/// Where the active theme flag came from at open time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// Read from the persisted theme entry.
    Persisted,
    /// Fallback to the host's light/dark preference.
    Ambient,
}

/// Explicitly owned store instance; one per running process.
pub struct PropertyStore<S: KeyValueStorage> {
    repo: PropertyRepository<S>,
    properties: Vec<Property>,
    dark_mode: bool,
    theme_source: ThemeSource,
}

impl<S: KeyValueStorage> PropertyStore<S> {
    /// Loads persisted state from `storage`.
    ///
    /// `ambient_dark` is the host preference used when no theme entry
    /// exists; that fallback is not written back.
    ///
    /// # Errors
    /// - Storage failures and malformed entries are returned unchanged.
    pub fn open(storage: S, ambient_dark: bool) -> RepoResult<Self> {
        let repo = PropertyRepository::new(storage);
        let loaded = repo.load_properties()?;
        let (dark_mode, theme_source) = match repo.load_dark_mode()? {
            Some(value) => (value, ThemeSource::Persisted),
            None => (ambient_dark, ThemeSource::Ambient),
        };

        let mut store = Self {
            repo,
            properties: Vec::new(),
            dark_mode,
            theme_source,
        };

        match loaded {
            Some(properties) => {
                store.properties = properties;
                info!(
                    "event=store_open module=store status=ok source=persisted count={} dark_mode={}",
                    store.properties.len(),
                    store.dark_mode
                );
            }
            None => {
                store.bootstrap_seed(Utc::now())?;
                info!(
                    "event=store_open module=store status=ok source=seed seed_version={} count={} dark_mode={}",
                    SEED_VERSION,
                    store.properties.len(),
                    store.dark_mode
                );
            }
        }

        Ok(store)
    }

    /// Installs the fixed seed set and persists it immediately.
    fn bootstrap_seed(&mut self, now: DateTime<Utc>) -> RepoResult<()> {
        self.commit(seed_properties(now), "seed")
    }

    /// Current records in insertion order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn get(&self, id: &PropertyId) -> Option<&Property> {
        self.properties.iter().find(|property| &property.id == id)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn theme_source(&self) -> ThemeSource {
        self.theme_source
    }

    /// Appends a new record built from `draft`.
    ///
    /// No field validation happens here; callers validate user input.
    pub fn create(&mut self, draft: PropertyDraft) -> RepoResult<Property> {
        let property = Property::from_draft(self.fresh_id(), draft, Utc::now());
        let mut next = self.properties.clone();
        next.push(property.clone());
        self.commit(next, "create")?;
        debug!(
            "event=property_create module=store status=ok id={} count={}",
            property.id,
            self.properties.len()
        );
        Ok(property)
    }

    /// Merges `patch` into the record with `id`.
    ///
    /// Returns the updated record, or `None` when `id` is unknown (the list
    /// is left unchanged but still persisted).
    pub fn update(
        &mut self,
        id: &PropertyId,
        patch: PropertyPatch,
    ) -> RepoResult<Option<Property>> {
        let now = Utc::now();
        let mut updated = None;
        let next = self
            .properties
            .iter()
            .map(|property| {
                if &property.id != id {
                    return property.clone();
                }
                let mut merged = property.clone();
                merged.apply_patch(patch.clone(), now);
                updated = Some(merged.clone());
                merged
            })
            .collect::<Vec<_>>();
        self.commit(next, "update")?;
        debug!(
            "event=property_update module=store status={} id={}",
            if updated.is_some() { "ok" } else { "noop" },
            id
        );
        Ok(updated)
    }

    /// Removes every record with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &PropertyId) -> RepoResult<bool> {
        let next = self
            .properties
            .iter()
            .filter(|property| &property.id != id)
            .cloned()
            .collect::<Vec<_>>();
        let removed = next.len() != self.properties.len();
        self.commit(next, "delete")?;
        debug!(
            "event=property_delete module=store status={} id={} count={}",
            if removed { "ok" } else { "noop" },
            id,
            self.properties.len()
        );
        Ok(removed)
    }

    /// Flips the dark-mode flag, persists it and returns the new value.
    pub fn toggle_dark_mode(&mut self) -> RepoResult<bool> {
        let next = !self.dark_mode;
        self.repo.save_dark_mode(next)?;
        self.dark_mode = next;
        self.theme_source = ThemeSource::Persisted;
        info!("event=theme_toggle module=store status=ok dark_mode={next}");
        Ok(next)
    }

    /// Releases the underlying storage.
    pub fn into_storage(self) -> S {
        self.repo.into_storage()
    }

    fn fresh_id(&self) -> PropertyId {
        loop {
            let id = PropertyId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Persists `next` and, only once that succeeds, makes it current.
    fn commit(&mut self, next: Vec<Property>, reason: &str) -> RepoResult<()> {
        if let Err(err) = self.repo.save_properties(&next) {
            error!(
                "event=store_persist module=store status=error reason={} count={} error={}",
                reason,
                next.len(),
                err
            );
            return Err(err);
        }
        self.properties = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PropertyStore, ThemeSource};
    use crate::model::property::{PropertyDraft, PropertyId, PropertyType};
    use crate::storage::{KeyValueStorage, MemoryStorage, DARK_MODE_KEY};

    #[test]
    fn ambient_theme_is_not_written_back() {
        let mut storage = MemoryStorage::new();
        let store = PropertyStore::open(&mut storage, true).unwrap();
        assert!(store.dark_mode());
        assert_eq!(store.theme_source(), ThemeSource::Ambient);
        drop(store);

        assert!(storage.read(DARK_MODE_KEY).unwrap().is_none());
    }

    #[test]
    fn persisted_theme_wins_over_ambient_preference() {
        let mut storage = MemoryStorage::new();
        storage.write(DARK_MODE_KEY, "false").unwrap();

        let store = PropertyStore::open(storage, true).unwrap();
        assert!(!store.dark_mode());
        assert_eq!(store.theme_source(), ThemeSource::Persisted);
    }

    #[test]
    fn generated_ids_are_not_seed_ids() {
        let mut store = PropertyStore::open(MemoryStorage::new(), false).unwrap();
        let created = store
            .create(PropertyDraft {
                name: "Corner Shop".to_string(),
                kind: PropertyType::Commercial,
                location: "Surat".to_string(),
                price: 42_000.0,
                description: "Busy junction.".to_string(),
                image: None,
            })
            .unwrap();

        assert!((1..=8).all(|n| created.id != PropertyId::new(n.to_string())));
        assert_eq!(created.created_at, created.updated_at);
    }
}

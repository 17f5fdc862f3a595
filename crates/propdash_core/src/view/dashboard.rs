//! Dashboard interaction state.
//!
//! # Responsibility
//! - Track search text, type filter, the create form and the open record.
//! - Route validated input to the store passed in by the caller.
//!
//! # Invariants
//! - `open` holds at most one record; opening another replaces it.
//! - The working copy is private to the view until `save` succeeds.
//! - Closing discards unsaved edits.

use super::form::PropertyForm;
use super::{ViewError, ViewResult};
use crate::model::property::{
    ParsePropertyTypeError, Property, PropertyId, PropertyPatch, PropertyType,
};
use crate::search::filter::PropertyFilter;
use crate::service::property_store::PropertyStore;
use crate::storage::KeyValueStorage;
use log::debug;

/// Whether the open record is displayed read-only or being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    View,
    Edit,
}

/// The single record currently open, with its working copy.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenRecord {
    pub id: PropertyId,
    pub mode: ModalMode,
    /// Editable copy loaded when the record was opened.
    pub working: PropertyForm,
}

/// Ephemeral UI state for the listing dashboard.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    filter: PropertyFilter,
    create_form: Option<PropertyForm>,
    open: Option<OpenRecord>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &PropertyFilter {
        &self.filter
    }

    pub fn search_term(&self) -> &str {
        &self.filter.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    pub fn type_filter(&self) -> Option<PropertyType> {
        self.filter.property_type
    }

    /// Sets the type filter from a select value; `""` clears it.
    pub fn select_type(&mut self, value: &str) -> Result<(), ParsePropertyTypeError> {
        self.filter.property_type = PropertyFilter::parse_type(value)?;
        Ok(())
    }

    /// Records passing the current filter, in store order.
    pub fn projection<'a, S: KeyValueStorage>(
        &self,
        store: &'a PropertyStore<S>,
    ) -> Vec<&'a Property> {
        self.filter.apply(store.properties())
    }

    /// Number of records in the current projection.
    pub fn listing_count<S: KeyValueStorage>(&self, store: &PropertyStore<S>) -> usize {
        self.projection(store).len()
    }

    pub fn open_create_form(&mut self) -> &mut PropertyForm {
        self.create_form.get_or_insert_with(PropertyForm::new)
    }

    pub fn create_form(&self) -> Option<&PropertyForm> {
        self.create_form.as_ref()
    }

    pub fn create_form_mut(&mut self) -> Option<&mut PropertyForm> {
        self.create_form.as_mut()
    }

    /// Validates the create form and appends the record to the store.
    ///
    /// On success the form is reset and closed. On validation failure the
    /// form stays open with its input intact and the store is untouched.
    pub fn submit_create<S: KeyValueStorage>(
        &mut self,
        store: &mut PropertyStore<S>,
    ) -> ViewResult<Property> {
        let form = self.create_form.as_ref().ok_or(ViewError::NothingOpen)?;
        let draft = form.validate()?;
        let created = store.create(draft)?;
        self.create_form = None;
        Ok(created)
    }

    /// Opens `id` in `mode`, loading a fresh working copy.
    pub fn open_record<S: KeyValueStorage>(
        &mut self,
        store: &PropertyStore<S>,
        id: &PropertyId,
        mode: ModalMode,
    ) -> ViewResult<()> {
        let property = store
            .get(id)
            .ok_or_else(|| ViewError::NotFound(id.clone()))?;
        self.open = Some(OpenRecord {
            id: id.clone(),
            mode,
            working: PropertyForm::from_property(property),
        });
        debug!("event=record_open module=view status=ok id={id} mode={mode:?}");
        Ok(())
    }

    pub fn open(&self) -> Option<&OpenRecord> {
        self.open.as_ref()
    }

    /// The store's copy of the open record, if it still exists.
    pub fn selected<'a, S: KeyValueStorage>(
        &self,
        store: &'a PropertyStore<S>,
    ) -> Option<&'a Property> {
        self.open.as_ref().and_then(|open| store.get(&open.id))
    }

    /// Switches the open record to edit mode.
    pub fn enter_edit(&mut self) -> ViewResult<()> {
        let open = self.open.as_mut().ok_or(ViewError::NothingOpen)?;
        open.mode = ModalMode::Edit;
        Ok(())
    }

    /// Mutable working copy; only available in edit mode.
    pub fn working_copy_mut(&mut self) -> Option<&mut PropertyForm> {
        self.open
            .as_mut()
            .filter(|open| open.mode == ModalMode::Edit)
            .map(|open| &mut open.working)
    }

    /// Validates the working copy and writes it through `Update`.
    ///
    /// Returns to view mode with the working copy refreshed from the store.
    pub fn save<S: KeyValueStorage>(
        &mut self,
        store: &mut PropertyStore<S>,
    ) -> ViewResult<Property> {
        let open = self
            .open
            .as_mut()
            .filter(|open| open.mode == ModalMode::Edit)
            .ok_or(ViewError::NothingOpen)?;
        let draft = open.working.validate()?;
        let updated = store
            .update(&open.id, PropertyPatch::replace_all(draft))?
            .ok_or_else(|| ViewError::NotFound(open.id.clone()))?;

        open.mode = ModalMode::View;
        open.working = PropertyForm::from_property(&updated);
        Ok(updated)
    }

    /// Closes the open record, discarding unsaved edits.
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Deletes `id` from the store, closing it if it was open.
    pub fn delete<S: KeyValueStorage>(
        &mut self,
        store: &mut PropertyStore<S>,
        id: &PropertyId,
    ) -> ViewResult<bool> {
        let removed = store.delete(id)?;
        if self.open.as_ref().is_some_and(|open| &open.id == id) {
            self.open = None;
        }
        Ok(removed)
    }
}

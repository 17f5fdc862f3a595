//! Core domain logic for the property listing dashboard.
//! This crate is the single source of truth for listing invariants.

pub mod db;
pub mod image;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod storage;
pub mod view;

pub use image::{load_image_data_url, ImageError};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::property::{
    ParsePropertyTypeError, Property, PropertyDraft, PropertyId, PropertyPatch, PropertyType,
};
pub use model::seed::{seed_properties, SEED_VERSION};
pub use repo::property_repo::{PropertyRepository, RepoError, RepoResult};
pub use search::filter::PropertyFilter;
pub use service::property_store::{PropertyStore, ThemeSource};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageError};
pub use view::{
    format_price, DashboardView, FormError, FormField, ModalMode, PropertyForm, ViewError,
    ViewResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

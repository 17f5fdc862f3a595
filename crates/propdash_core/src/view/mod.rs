//! View/Query layer state.
//!
//! # Responsibility
//! - Hold ephemeral UI state: search text, type filter, create form, and
//!   the single open record with its working copy.
//! - Derive the filtered projection from a store passed in by the caller.
//! - Validate user input before it reaches the store.
//!
//! # Invariants
//! - The view never owns a second copy of the record list.
//! - At most one record is open at a time.

use crate::model::property::PropertyId;
use crate::repo::property_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod dashboard;
pub mod form;
pub mod format;

pub use dashboard::{DashboardView, ModalMode, OpenRecord};
pub use form::{FormError, FormField, PropertyForm};
pub use format::format_price;

pub type ViewResult<T> = Result<T, ViewError>;

/// Failure of a view-level action.
#[derive(Debug)]
pub enum ViewError {
    /// User input rejected before reaching the store.
    Validation(FormError),
    /// Store write failed.
    Store(RepoError),
    /// The requested record is not in the store.
    NotFound(PropertyId),
    /// The action needs an open record (or edit mode) and there is none.
    NothingOpen,
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "property not found: {id}"),
            Self::NothingOpen => write!(f, "no property is open for editing"),
        }
    }
}

impl Error for ViewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound(_) | Self::NothingOpen => None,
        }
    }
}

impl From<FormError> for ViewError {
    fn from(value: FormError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ViewError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

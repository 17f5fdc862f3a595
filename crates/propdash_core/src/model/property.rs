//! Property listing domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted by the store.
//! - Define the create (`PropertyDraft`) and partial update (`PropertyPatch`)
//!   inputs, so callers can never supply ids or timestamps.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `kind` is always one of the six `PropertyType` values.
//! - Wire shape uses camelCase field names and `type` for the kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Opaque stable identifier of a property record.
///
/// Seed records carry short numeric ids; runtime-created records carry
/// UUID v4 strings. Callers must not interpret the contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(String);

impl PropertyId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for PropertyId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Closed set of listing categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    Plot,
    Shed,
    #[serde(rename = "Retail Store")]
    RetailStore,
    Apartment,
    House,
    Commercial,
}

impl PropertyType {
    /// All categories in form/select order.
    pub const ALL: [PropertyType; 6] = [
        PropertyType::Plot,
        PropertyType::Shed,
        PropertyType::RetailStore,
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Commercial,
    ];

    /// Display and wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plot => "Plot",
            Self::Shed => "Shed",
            Self::RetailStore => "Retail Store",
            Self::Apartment => "Apartment",
            Self::House => "House",
            Self::Commercial => "Commercial",
        }
    }
}

impl Display for PropertyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the six category names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePropertyTypeError(String);

impl Display for ParsePropertyTypeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown property type `{}`; expected one of Plot|Shed|Retail Store|Apartment|House|Commercial",
            self.0
        )
    }
}

impl Error for ParsePropertyTypeError {}

impl FromStr for PropertyType {
    type Err = ParsePropertyTypeError;

    /// Exact, case-sensitive match on the display name.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| ParsePropertyTypeError(value.to_string()))
    }
}

/// Canonical property record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    /// Serialized as `type` to match the persisted layout.
    #[serde(rename = "type")]
    pub kind: PropertyType,
    pub location: String,
    /// Non-negative amount in whole currency units (fractions allowed).
    pub price: f64,
    pub description: String,
    /// Embedded image payload, usually a `data:` URL or a remote URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Builds a record from a draft with store-assigned identity and time.
    pub fn from_draft(id: PropertyId, draft: PropertyDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            kind: draft.kind,
            location: draft.location,
            price: draft.price,
            description: draft.description,
            image: draft.image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges `patch` over this record and refreshes `updated_at`.
    ///
    /// # Invariants
    /// - `id` and `created_at` are untouched.
    /// - `updated_at` never moves before `created_at`.
    pub fn apply_patch(&mut self, patch: PropertyPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        self.updated_at = now.max(self.created_at);
    }

    /// Returns the draft view of this record's editable fields.
    pub fn to_draft(&self) -> PropertyDraft {
        PropertyDraft {
            name: self.name.clone(),
            kind: self.kind,
            location: self.location.clone(),
            price: self.price,
            description: self.description.clone(),
            image: self.image.clone(),
        }
    }
}

/// Create input: every record field except identity and timestamps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyDraft {
    pub name: String,
    pub kind: PropertyType,
    pub location: String,
    pub price: f64,
    pub description: String,
    pub image: Option<String>,
}

/// Partial update input. `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyPatch {
    pub name: Option<String>,
    pub kind: Option<PropertyType>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    /// `Some(None)` clears the image, `Some(Some(_))` replaces it.
    pub image: Option<Option<String>>,
}

impl PropertyPatch {
    /// Patch that changes only the price.
    pub fn price(price: f64) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }

    /// Patch replacing every editable field with the draft's values.
    pub fn replace_all(draft: PropertyDraft) -> Self {
        Self {
            name: Some(draft.name),
            kind: Some(draft.kind),
            location: Some(draft.location),
            price: Some(draft.price),
            description: Some(draft.description),
            image: Some(draft.image),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::{Property, PropertyDraft, PropertyId, PropertyPatch, PropertyType};
    use chrono::{Duration, TimeZone, Utc};

    fn sample() -> Property {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Property::from_draft(
            PropertyId::new("p-1"),
            PropertyDraft {
                name: "Lake House".to_string(),
                kind: PropertyType::House,
                location: "Nashik".to_string(),
                price: 120_000.0,
                description: "Quiet place by the water.".to_string(),
                image: Some("data:image/png;base64,AAAA".to_string()),
            },
            created,
        )
    }

    #[test]
    fn property_type_parses_display_names_exactly() {
        for kind in PropertyType::ALL {
            assert_eq!(kind.as_str().parse::<PropertyType>().unwrap(), kind);
        }
        assert!("retail store".parse::<PropertyType>().is_err());
        assert!("".parse::<PropertyType>().is_err());
    }

    #[test]
    fn apply_patch_clears_image_with_explicit_none() {
        let mut property = sample();
        let patch = PropertyPatch {
            image: Some(None),
            ..PropertyPatch::default()
        };
        property.apply_patch(patch, property.created_at + Duration::seconds(1));
        assert_eq!(property.image, None);
        assert_eq!(property.name, "Lake House");
    }

    #[test]
    fn apply_patch_never_moves_updated_at_before_created_at() {
        let mut property = sample();
        let earlier = property.created_at - Duration::hours(3);
        property.apply_patch(PropertyPatch::price(1.0), earlier);
        assert_eq!(property.updated_at, property.created_at);
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(PropertyPatch::default().is_empty());
        assert!(!PropertyPatch::price(5.0).is_empty());
    }
}

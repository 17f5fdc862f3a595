//! Combined text + type filter over property records.
//!
//! # Invariants
//! - A record passes iff the text predicate and the type predicate both hold.
//! - Empty search text matches every record.
//! - Output preserves input order; nothing is sorted or deduplicated.

use crate::model::property::{ParsePropertyTypeError, Property, PropertyType};

/// Filter criteria held by the view layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    /// Raw user text. Matched case-insensitively as a substring.
    pub search_term: String,
    /// Exact type match; `None` means no type filter.
    pub property_type: Option<PropertyType>,
}

impl PropertyFilter {
    pub fn new(search_term: impl Into<String>, property_type: Option<PropertyType>) -> Self {
        Self {
            search_term: search_term.into(),
            property_type,
        }
    }

    /// Parses a select-box value: the empty string means "all types".
    pub fn parse_type(value: &str) -> Result<Option<PropertyType>, ParsePropertyTypeError> {
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some)
    }

    /// Returns whether neither predicate narrows the list.
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty() && self.property_type.is_none()
    }

    pub fn matches(&self, property: &Property) -> bool {
        let needle = self.search_term.to_lowercase();
        matches_text(property, &needle) && self.matches_type(property)
    }

    /// Projects `properties` through the filter, preserving order.
    pub fn apply<'a>(&self, properties: &'a [Property]) -> Vec<&'a Property> {
        let needle = self.search_term.to_lowercase();
        properties
            .iter()
            .filter(|property| matches_text(property, &needle) && self.matches_type(property))
            .collect()
    }

    fn matches_type(&self, property: &Property) -> bool {
        self.property_type.map_or(true, |kind| property.kind == kind)
    }
}

fn matches_text(property: &Property, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        property.name.as_str(),
        property.location.as_str(),
        property.description.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

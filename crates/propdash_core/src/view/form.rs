//! Form state and input validation.
//!
//! # Invariants
//! - `name`, `location`, `price` and `description` are required.
//! - `price` must parse as a finite, non-negative number.
//! - A blank image selection is stored as "no image".

use crate::image::normalize_image;
use crate::model::property::{Property, PropertyDraft, PropertyType};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Required form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Location,
    Price,
    Description,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Location => "location",
            Self::Price => "price",
            Self::Description => "description",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    MissingField(FormField),
    InvalidPrice(String),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => {
                write!(f, "please fill in all required fields: `{}` is empty", field.label())
            }
            Self::InvalidPrice(raw) => {
                write!(f, "price must be a non-negative number, got `{raw}`")
            }
        }
    }
}

impl Error for FormError {}

/// Raw user input for one property, as typed into a form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyForm {
    pub name: String,
    pub kind: PropertyType,
    pub location: String,
    /// Unparsed price text.
    pub price: String,
    pub description: String,
    pub image: Option<String>,
}

impl PropertyForm {
    /// Empty create form; type defaults to `Plot`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled with a record's current values.
    pub fn from_property(property: &Property) -> Self {
        Self {
            name: property.name.clone(),
            kind: property.kind,
            location: property.location.clone(),
            price: property.price.to_string(),
            description: property.description.clone(),
            image: property.image.clone(),
        }
    }

    pub fn set_image(&mut self, data_url: impl Into<String>) {
        self.image = Some(data_url.into());
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Checks required fields and converts the input into a draft.
    pub fn validate(&self) -> Result<PropertyDraft, FormError> {
        require(&self.name, FormField::Name)?;
        require(&self.location, FormField::Location)?;
        require(&self.price, FormField::Price)?;
        require(&self.description, FormField::Description)?;
        let price = parse_price(&self.price)?;

        Ok(PropertyDraft {
            name: self.name.clone(),
            kind: self.kind,
            location: self.location.clone(),
            price,
            description: self.description.clone(),
            image: normalize_image(self.image.clone()),
        })
    }

    /// Clears every input back to the create-form defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn require(value: &str, field: FormField) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(())
}

/// Parses price text as typed by a user.
pub fn parse_price(raw: &str) -> Result<f64, FormError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(FormError::InvalidPrice(trimmed.to_string())),
    }
}

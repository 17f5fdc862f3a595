//! Fixed bootstrap dataset.
//!
//! # Responsibility
//! - Provide the sample listings written to storage on first launch.
//!
//! # Invariants
//! - The set is fixed per `SEED_VERSION`; changing any record requires a
//!   version bump.
//! - Seed ids are unique and never collide with generated UUID ids.

use crate::model::property::{Property, PropertyId, PropertyType};
use chrono::{DateTime, Utc};

/// Version tag of the bundled seed dataset.
pub const SEED_VERSION: u32 = 1;

struct SeedRow {
    id: &'static str,
    name: &'static str,
    kind: PropertyType,
    location: &'static str,
    price: f64,
    description: &'static str,
    image: &'static str,
}

const PLOT_IMAGE: &str =
    "https://images.pexels.com/photos/1396122/pexels-photo-1396122.jpeg?auto=compress&cs=tinysrgb&w=800";
const SHED_IMAGE: &str =
    "https://images.pexels.com/photos/2219024/pexels-photo-2219024.jpeg?auto=compress&cs=tinysrgb&w=800";
const STORE_IMAGE: &str =
    "https://images.pexels.com/photos/1267320/pexels-photo-1267320.jpeg?auto=compress&cs=tinysrgb&w=800";

const SEED_ROWS: &[SeedRow] = &[
    SeedRow {
        id: "1",
        name: "Green Valley Plot",
        kind: PropertyType::Plot,
        location: "Pune",
        price: 250_000.0,
        description: "A large plot of land available for development.",
        image: PLOT_IMAGE,
    },
    SeedRow {
        id: "2",
        name: "Modern Shed",
        kind: PropertyType::Shed,
        location: "Bangalore",
        price: 76_000.0,
        description: "An industrial shed in a prime location.",
        image: SHED_IMAGE,
    },
    SeedRow {
        id: "3",
        name: "City Center Store",
        kind: PropertyType::RetailStore,
        location: "Hyderabad",
        price: 150_000.0,
        description: "A commercial retail space in city center.",
        image: STORE_IMAGE,
    },
    SeedRow {
        id: "4",
        name: "Premium Plot Store",
        kind: PropertyType::Plot,
        location: "Khermai",
        price: 200_000.0,
        description: "A spacious plot situated in a serene area.",
        image: "https://images.pexels.com/photos/1546168/pexels-photo-1546168.jpeg?auto=compress&cs=tinysrgb&w=800",
    },
    SeedRow {
        id: "5",
        name: "Urban Plot",
        kind: PropertyType::Plot,
        location: "Chennai",
        price: 300_000.0,
        description: "A spacious plot situated in serene area.",
        image: "https://images.pexels.com/photos/87223/pexels-photo-87223.jpeg?auto=compress&cs=tinysrgb&w=800",
    },
    SeedRow {
        id: "6",
        name: "Industrial Shed",
        kind: PropertyType::Shed,
        location: "Mumbai",
        price: 30_000.0,
        description: "A together industrial shed.",
        image: SHED_IMAGE,
    },
    SeedRow {
        id: "7",
        name: "Commercial Space",
        kind: PropertyType::RetailStore,
        location: "Kolkata",
        price: 175_000.0,
        description: "A commercial retail space in city center.",
        image: STORE_IMAGE,
    },
    SeedRow {
        id: "8",
        name: "Development Land",
        kind: PropertyType::Plot,
        location: "Jaipur",
        price: 160_000.0,
        description: "A large plot of land available for development.",
        image: PLOT_IMAGE,
    },
];

/// Number of records in the bundled seed set.
pub fn seed_len() -> usize {
    SEED_ROWS.len()
}

/// Materializes the seed set, stamping every record with `now`.
pub fn seed_properties(now: DateTime<Utc>) -> Vec<Property> {
    SEED_ROWS
        .iter()
        .map(|row| Property {
            id: PropertyId::new(row.id),
            name: row.name.to_string(),
            kind: row.kind,
            location: row.location.to_string(),
            price: row.price,
            description: row.description.to_string(),
            image: Some(row.image.to_string()),
            created_at: now,
            updated_at: now,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{seed_len, seed_properties};
    use chrono::Utc;
    use std::collections::HashSet;

    #[test]
    fn seed_set_has_eight_unique_ids() {
        let seeds = seed_properties(Utc::now());
        assert_eq!(seeds.len(), 8);
        assert_eq!(seed_len(), 8);

        let ids = seeds.iter().map(|p| p.id.clone()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), seeds.len());
    }

    #[test]
    fn seed_records_share_bootstrap_timestamp() {
        let now = Utc::now();
        for property in seed_properties(now) {
            assert_eq!(property.created_at, now);
            assert_eq!(property.updated_at, now);
            assert!(property.price >= 0.0);
        }
    }
}

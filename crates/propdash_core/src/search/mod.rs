//! Listing search and filter.
//!
//! # Responsibility
//! - Define the combined text/type predicate used to project the store.
//! - Keep projection ordering identical to store ordering.

pub mod filter;

//! Core use-case services.
//!
//! # Responsibility
//! - Own the authoritative record list and mediate every mutation.
//! - Keep presentation layers decoupled from storage details.

pub mod property_store;

//! Persisted state codec.
//!
//! # Responsibility
//! - Encode and decode the record list and theme flag to storage entries.
//! - Isolate serialization details from the store's mutation logic.
//!
//! # Invariants
//! - Record list writes are whole-list overwrites, never deltas.
//! - Read paths reject malformed persisted data instead of masking it.

pub mod property_repo;

//! Domain model for property listings.
//!
//! # Responsibility
//! - Define the canonical property record and its create/patch inputs.
//! - Own the fixed, versioned seed dataset used to bootstrap empty storage.
//!
//! # Invariants
//! - Every record is identified by a stable, unique `PropertyId`.
//! - Deletion is a hard delete; there are no tombstones.
//! - `updated_at >= created_at` for every record.

pub mod property;
pub mod seed;

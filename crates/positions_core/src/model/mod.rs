//! Pick domain model.
//!
//! # Responsibility
//! - Define the `Entry` record and the seed fixture.
//! - Own the numeric range and invariant checks shared by every layer.
//!
//! # Invariants
//! - No two entries in a collection share a date.
//! - No two entries in a collection share a number.
//! - Entries are never edited or removed once committed.

pub mod entry;

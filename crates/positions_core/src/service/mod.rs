//! Command-level orchestration.
//!
//! # Responsibility
//! - Map each shell command onto validation, confirmation and storage.
//! - Own the process-local view state next to the entry store.
//!
//! # Invariants
//! - Every mutation passes validation and an explicit confirmation first.
//! - A declined confirmation leaves entries and storage untouched.

pub mod tracker_service;

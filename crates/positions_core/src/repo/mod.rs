//! Persistence layer.
//!
//! # Responsibility
//! - `document_repo`: keyed whole-document storage over SQLite.
//! - `entry_store`: the authoritative entry collection on top of it.
//!
//! # Invariants
//! - Callers above this layer never see SQL or raw JSON documents.

pub mod document_repo;
pub mod entry_store;

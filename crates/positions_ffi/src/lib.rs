//! UI-facing bindings for the positions tracker core.

pub mod api;

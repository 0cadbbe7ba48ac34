//! View state and pure view derivations.
//!
//! # Responsibility
//! - Track which month and which board filter the shell is showing.
//! - Derive calendar, number board and progress data from entries.
//!
//! # Invariants
//! - Nothing here mutates or persists entries.
//! - Derivations depend only on their arguments (no clock reads).

pub mod board;
pub mod calendar;
pub mod progress;
pub mod state;

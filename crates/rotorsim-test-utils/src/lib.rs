//! Shared test fixtures and utilities for rotorsim crates.
//!
//! Provides deterministic RNG setup, random membership triples and the
//! reference motor configurations used across crate tests.

pub mod fixtures;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use fixtures::{reference_motor, replay_bang_bang};
pub use rng::{random_ordered_triple, seeded_rng};

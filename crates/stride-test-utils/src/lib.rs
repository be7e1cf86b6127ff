//! Shared test fixtures and utilities for stride crates.
//!
//! Provides parameter-backed trajectory providers, central finite
//! differences for checking analytic Jacobians, and deterministic RNG setup.

pub mod finite_diff;
pub mod mocks;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use finite_diff::{FD_STEP, central_difference, central_gradient};
pub use mocks::{ConstantFootholds, ConstantLoads, QuadraticBaseMotion};
pub use rng::{random_durations, seeded_rng};

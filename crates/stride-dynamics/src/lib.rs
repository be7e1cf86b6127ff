//! Analytic dynamics and contact timing for legged trajectory optimization.
//!
//! At any query time a nonlinear solver asks this crate for:
//!
//! 1. **Contact activation** ([`ContactTimings`]): a smooth value in `[0, 1]`
//!    per end-effector describing how much of the contact applies, and its
//!    derivative with respect to the phase durations being optimized.
//! 2. **Base acceleration** ([`DynamicModel`]): the centroidal linear
//!    acceleration produced by the contact loads and footholds, and its
//!    derivatives with respect to the base, load and foothold unknowns.
//!
//! All derivatives are closed-form.
//!
//! # Architecture
//!
//! The base, force and foothold trajectories are owned by the caller and
//! read through the traits in [`providers`]. Variable groups live in a
//! [`ProblemVariables`] arena and are referenced by handle. Every
//! evaluation is a pure function of the stored values and its arguments, so
//! a time grid can be evaluated in parallel as long as no `set_values` runs
//! concurrently.

pub mod centroidal;
pub mod model;
pub mod providers;
pub mod timing;
pub mod variables;

pub use centroidal::{Cop, LinearInvertedPendulum};
pub use model::{DynamicModel, Dynamics};
pub use providers::{BaseMotion, DynamicsInputs, EndeffectorsForce, EndeffectorsMotion};
pub use timing::{ContactTimings, PhaseType, smoothstep, smoothstep_derivative};
pub use variables::{ProblemVariables, VariableGroup};

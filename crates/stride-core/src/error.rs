use thiserror::Error;

/// Top-level error type for stride.
#[derive(Debug, Error)]
pub enum StrideError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dynamics error: {0}")]
    Dynamics(#[from] DynamicsError),
}

pub type StrideResult<T> = Result<T, StrideError>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid pendulum_height: {0} (must be > 0)")]
    InvalidPendulumHeight(f64),

    #[error("Invalid mass: {0} (must be > 0)")]
    InvalidMass(f64),

    #[error("Invalid gravity: {0} (must be > 0)")]
    InvalidGravity(f64),

    #[error("Invalid transition_width: {0} (must be > 0)")]
    InvalidTransitionWidth(f64),

    #[error("Invalid min_phase_duration: {0} (must be >= 0)")]
    InvalidMinPhaseDuration(f64),

    #[error("Invalid min_total_load: {0} (must be >= 0)")]
    InvalidMinTotalLoad(f64),
}

/// Errors raised while evaluating the dynamics model.
///
/// Copy so it can be returned from per-sample evaluation without allocation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DynamicsError {
    #[error("No ground contact at t={t}: total load {total_load} leaves the center of pressure undefined")]
    NoGroundContact { t: f64, total_load: f64 },

    #[error("Unknown end-effector {ee} (model has {count})")]
    UnknownEndeffector { ee: usize, count: usize },
}

pub type DynamicsResult<T> = Result<T, DynamicsError>;

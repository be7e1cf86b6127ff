use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ConfigError, StrideResult};

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

/// Standard gravity in m/s^2.
pub const GRAVITY: f64 = 9.80665;

const fn default_pendulum_height() -> f64 {
    0.58
}
const fn default_mass() -> f64 {
    80.0
}
const fn default_gravity() -> f64 {
    GRAVITY
}
const fn default_min_total_load() -> f64 {
    1e-9
}
const fn default_transition_width() -> f64 {
    0.05
}
const fn default_min_phase_duration() -> f64 {
    0.1
}
const fn default_true() -> bool {
    true
}

fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

fn is_non_negative(x: f64) -> bool {
    x.is_finite() && x >= 0.0
}

// ---------------------------------------------------------------------------
// StrideConfig
// ---------------------------------------------------------------------------

/// Top-level configuration of the dynamics and timing layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrideConfig {
    #[serde(default)]
    pub dynamics: DynamicsConfig,

    #[serde(default)]
    pub timing: TimingConfig,
}

impl StrideConfig {
    /// Validate both sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dynamics.validate()?;
        self.timing.validate()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StrideResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(ConfigError::from)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), model = ?config.dynamics.model, "loaded stride config");
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// DynamicsConfig
// ---------------------------------------------------------------------------

/// Which dynamics model evaluates the centroidal acceleration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DynamicsModelKind {
    #[default]
    LinearInvertedPendulum,
}

/// Physical constants of the dynamics model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicsConfig {
    #[serde(default)]
    pub model: DynamicsModelKind,

    /// Constant CoM height above the ground in meters (default: 0.58).
    #[serde(default = "default_pendulum_height")]
    pub pendulum_height: f64,

    /// Total robot mass in kg (default: 80).
    #[serde(default = "default_mass")]
    pub mass: f64,

    /// Gravitational acceleration magnitude in m/s^2.
    #[serde(default = "default_gravity")]
    pub gravity: f64,

    /// Summed normal load at or below which the robot is treated as
    /// having no ground contact.
    #[serde(default = "default_min_total_load")]
    pub min_total_load: f64,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            model: DynamicsModelKind::default(),
            pendulum_height: default_pendulum_height(),
            mass: default_mass(),
            gravity: default_gravity(),
            min_total_load: default_min_total_load(),
        }
    }
}

impl DynamicsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.pendulum_height) {
            return Err(ConfigError::InvalidPendulumHeight(self.pendulum_height));
        }
        if !is_positive(self.mass) {
            return Err(ConfigError::InvalidMass(self.mass));
        }
        if !is_positive(self.gravity) {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        if !is_non_negative(self.min_total_load) {
            return Err(ConfigError::InvalidMinTotalLoad(self.min_total_load));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TimingConfig
// ---------------------------------------------------------------------------

/// Parameters of the per-end-effector phase timing variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Width of the smooth contact transition in seconds (default: 0.05).
    #[serde(default = "default_transition_width")]
    pub transition_width: f64,

    /// Lower bound on every free phase duration in seconds (default: 0.1).
    #[serde(default = "default_min_phase_duration")]
    pub min_phase_duration: f64,

    /// Derive the last phase duration from the fixed total instead of
    /// exposing it as a free unknown (default: true).
    #[serde(default = "default_true")]
    pub drop_last_duration: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            transition_width: default_transition_width(),
            min_phase_duration: default_min_phase_duration(),
            drop_last_duration: true,
        }
    }
}

impl TimingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.transition_width) {
            return Err(ConfigError::InvalidTransitionWidth(self.transition_width));
        }
        if !is_non_negative(self.min_phase_duration) {
            return Err(ConfigError::InvalidMinPhaseDuration(self.min_phase_duration));
        }
        Ok(())
    }
}

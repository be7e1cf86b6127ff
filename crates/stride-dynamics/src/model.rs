//! Interface of a model mapping contact forces to base acceleration.

use nalgebra::Vector3;
use stride_core::{ConfigError, Coords3D, DynamicsConfig, DynamicsModelKind, DynamicsResult, JacobianRow};

use crate::centroidal::LinearInvertedPendulum;
use crate::providers::{BaseMotion, DynamicsInputs};

/// Base acceleration produced by the contact forces, and its partial
/// derivatives with respect to the unknowns of each provider.
///
/// All Jacobians are closed-form; no numerical differentiation is involved.
/// A model may treat some dependencies as constant, in which case it
/// documents them on its implementation.
pub trait DynamicModel {
    /// Linear base acceleration at `t`.
    fn base_acceleration(&self, inputs: &DynamicsInputs<'_>, t: f64) -> DynamicsResult<Vector3<f64>>;

    /// Row over the base unknowns for acceleration component `dim`.
    fn jacobian_of_acc_wrt_base(&self, base: &dyn BaseMotion, t: f64, dim: Coords3D) -> JacobianRow;

    /// Row over the force unknowns for acceleration component `dim`,
    /// through the load of end-effector `ee`.
    fn jacobian_of_acc_wrt_load(
        &self,
        inputs: &DynamicsInputs<'_>,
        t: f64,
        ee: usize,
        dim: Coords3D,
    ) -> DynamicsResult<JacobianRow>;

    /// Row over the foothold unknowns for acceleration component `dim`,
    /// through the position of end-effector `ee`.
    fn jacobian_of_acc_wrt_ee_pos(
        &self,
        inputs: &DynamicsInputs<'_>,
        t: f64,
        ee: usize,
        dim: Coords3D,
    ) -> DynamicsResult<JacobianRow>;
}

/// All available dynamics models.
#[derive(Clone, Debug, PartialEq)]
pub enum Dynamics {
    LinearInvertedPendulum(LinearInvertedPendulum),
}

impl Dynamics {
    /// Build the model selected in `config`.
    pub fn from_config(config: &DynamicsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(match config.model {
            DynamicsModelKind::LinearInvertedPendulum => {
                Self::LinearInvertedPendulum(LinearInvertedPendulum::from_config(config))
            }
        })
    }

    pub const fn kind(&self) -> DynamicsModelKind {
        match self {
            Self::LinearInvertedPendulum(_) => DynamicsModelKind::LinearInvertedPendulum,
        }
    }
}

impl Default for Dynamics {
    fn default() -> Self {
        Self::LinearInvertedPendulum(LinearInvertedPendulum::default())
    }
}

impl From<LinearInvertedPendulum> for Dynamics {
    fn from(model: LinearInvertedPendulum) -> Self {
        Self::LinearInvertedPendulum(model)
    }
}

impl DynamicModel for Dynamics {
    fn base_acceleration(&self, inputs: &DynamicsInputs<'_>, t: f64) -> DynamicsResult<Vector3<f64>> {
        match self {
            Self::LinearInvertedPendulum(m) => m.base_acceleration(inputs, t),
        }
    }

    fn jacobian_of_acc_wrt_base(&self, base: &dyn BaseMotion, t: f64, dim: Coords3D) -> JacobianRow {
        match self {
            Self::LinearInvertedPendulum(m) => m.jacobian_of_acc_wrt_base(base, t, dim),
        }
    }

    fn jacobian_of_acc_wrt_load(
        &self,
        inputs: &DynamicsInputs<'_>,
        t: f64,
        ee: usize,
        dim: Coords3D,
    ) -> DynamicsResult<JacobianRow> {
        match self {
            Self::LinearInvertedPendulum(m) => m.jacobian_of_acc_wrt_load(inputs, t, ee, dim),
        }
    }

    fn jacobian_of_acc_wrt_ee_pos(
        &self,
        inputs: &DynamicsInputs<'_>,
        t: f64,
        ee: usize,
        dim: Coords3D,
    ) -> DynamicsResult<JacobianRow> {
        match self {
            Self::LinearInvertedPendulum(m) => m.jacobian_of_acc_wrt_ee_pos(inputs, t, ee, dim),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config() {
        let dynamics = Dynamics::from_config(&DynamicsConfig::default()).unwrap();
        assert_eq!(dynamics.kind(), DynamicsModelKind::LinearInvertedPendulum);
        assert_eq!(dynamics, Dynamics::default());
    }

    #[test]
    fn from_invalid_config_fails() {
        let config = DynamicsConfig {
            pendulum_height: -0.58,
            ..DynamicsConfig::default()
        };
        assert!(matches!(
            Dynamics::from_config(&config),
            Err(ConfigError::InvalidPendulumHeight(_))
        ));
    }

    #[test]
    fn from_model() {
        let lip = LinearInvertedPendulum::new(0.4, 30.0);
        let dynamics: Dynamics = lip.clone().into();
        assert_eq!(dynamics, Dynamics::LinearInvertedPendulum(lip));
    }
}

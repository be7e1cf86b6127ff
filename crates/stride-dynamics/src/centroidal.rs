//! Linear inverted pendulum model of the centroidal dynamics.
//!
//! The CoM is held at a constant height `h` above the ground. Its
//! horizontal acceleration is then linear in the offset from the center of
//! pressure (CoP):
//!
//! ```text
//! a_xy = g/h (c_xy - u)          u = Σ λ_i p_i / Σ λ_i
//! a_z  = commanded base a_z
//! ```
//!
//! with `λ_i` the normal load and `p_i` the horizontal foothold of
//! end-effector `i`. Differentiating through the weighted average:
//!
//! ```text
//! ∂u/∂λ_i = (p_i - u) / Σ λ      ∂u_d/∂p_i,d = λ_i / Σ λ
//! ```
//!
//! The CoM position is treated as constant when differentiating with respect
//! to the base unknowns: only the vertical row is non-zero.
//!
//! The CoP is undefined when the loads sum to zero (no foot on the ground).
//! Those instants are reported as [`DynamicsError::NoGroundContact`] so the
//! caller can exclude them, typically via the contact activation.

use nalgebra::{Vector2, Vector3};
use stride_core::{Coords3D, DynamicsConfig, DynamicsError, DynamicsResult, JacobianRow};
use tracing::debug;

use crate::model::DynamicModel;
use crate::providers::{BaseMotion, DynamicsInputs};

/// Center of pressure in the ground plane.
pub type Cop = Vector2<f64>;

/// Linear inverted pendulum with constant height.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearInvertedPendulum {
    /// CoM height above the ground (m).
    pendulum_height: f64,
    /// Total robot mass (kg).
    mass: f64,
    /// Gravitational acceleration (m/s^2).
    gravity: f64,
    /// Summed load at or below which no foot is considered on the ground.
    min_total_load: f64,
}

impl Default for LinearInvertedPendulum {
    fn default() -> Self {
        Self::from_config(&DynamicsConfig::default())
    }
}

impl LinearInvertedPendulum {
    /// Pendulum of height `pendulum_height` under standard gravity.
    ///
    /// # Panics
    /// If `pendulum_height` or `mass` is not finite and positive.
    pub fn new(pendulum_height: f64, mass: f64) -> Self {
        let config = DynamicsConfig {
            pendulum_height,
            mass,
            ..DynamicsConfig::default()
        };
        if let Err(err) = config.validate() {
            panic!("invalid linear inverted pendulum: {err}");
        }
        Self::from_config(&config)
    }

    /// Take the constants from an already validated config.
    pub fn from_config(config: &DynamicsConfig) -> Self {
        Self {
            pendulum_height: config.pendulum_height,
            mass: config.mass,
            gravity: config.gravity,
            min_total_load: config.min_total_load,
        }
    }

    pub const fn pendulum_height(&self) -> f64 {
        self.pendulum_height
    }

    pub const fn mass(&self) -> f64 {
        self.mass
    }

    pub const fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Pendulum constant `g/h`.
    pub fn omega_squared(&self) -> f64 {
        self.gravity / self.pendulum_height
    }

    /// Sum of all end-effector loads at `t`.
    pub fn load_sum(&self, inputs: &DynamicsInputs<'_>, t: f64) -> f64 {
        (0..inputs.endeffector_count())
            .map(|ee| inputs.forces.load(t, ee))
            .sum()
    }

    /// Load sum at `t`, or an error if no foot is on the ground.
    fn checked_load_sum(&self, inputs: &DynamicsInputs<'_>, t: f64) -> DynamicsResult<f64> {
        let total_load = self.load_sum(inputs, t);
        if total_load <= self.min_total_load {
            debug!(t, total_load, "no ground contact, center of pressure undefined");
            return Err(DynamicsError::NoGroundContact { t, total_load });
        }
        Ok(total_load)
    }

    fn check_endeffector(inputs: &DynamicsInputs<'_>, ee: usize) -> DynamicsResult<()> {
        let count = inputs.endeffector_count();
        if ee >= count {
            return Err(DynamicsError::UnknownEndeffector { ee, count });
        }
        Ok(())
    }

    /// Load-weighted average of the footholds at `t`.
    pub fn center_of_pressure(&self, inputs: &DynamicsInputs<'_>, t: f64) -> DynamicsResult<Cop> {
        let total_load = self.checked_load_sum(inputs, t)?;
        Ok(Self::weighted_footholds(inputs, t) / total_load)
    }

    fn weighted_footholds(inputs: &DynamicsInputs<'_>, t: f64) -> Vector2<f64> {
        (0..inputs.endeffector_count())
            .map(|ee| inputs.footholds.position(t, ee) * inputs.forces.load(t, ee))
            .sum()
    }

    /// Derivative of the CoP at `t` with respect to the load of `ee`.
    pub fn derivative_of_cop_wrt_load(
        &self,
        inputs: &DynamicsInputs<'_>,
        t: f64,
        ee: usize,
    ) -> DynamicsResult<Cop> {
        Self::check_endeffector(inputs, ee)?;
        let total_load = self.checked_load_sum(inputs, t)?;
        let cop = Self::weighted_footholds(inputs, t) / total_load;
        Ok((inputs.footholds.position(t, ee) - cop) / total_load)
    }
}

impl DynamicModel for LinearInvertedPendulum {
    fn base_acceleration(&self, inputs: &DynamicsInputs<'_>, t: f64) -> DynamicsResult<Vector3<f64>> {
        let cop = self.center_of_pressure(inputs, t)?;
        let com = inputs.base.com_position(t);
        let acc_z = inputs.base.com_acceleration(t).z;

        let acc_xy = (com.xy() - cop) * self.omega_squared();
        Ok(Vector3::new(acc_xy.x, acc_xy.y, acc_z))
    }

    fn jacobian_of_acc_wrt_base(&self, base: &dyn BaseMotion, t: f64, dim: Coords3D) -> JacobianRow {
        match dim {
            // vertical acceleration is passed through from the base
            Coords3D::Z => base.jacobian_of_acc_wrt_coefficients(t, Coords3D::Z),
            // horizontal acceleration is driven by the CoP only
            Coords3D::X | Coords3D::Y => JacobianRow::zeros(base.variable_count()),
        }
    }

    fn jacobian_of_acc_wrt_load(
        &self,
        inputs: &DynamicsInputs<'_>,
        t: f64,
        ee: usize,
        dim: Coords3D,
    ) -> DynamicsResult<JacobianRow> {
        Self::check_endeffector(inputs, ee)?;
        if !dim.is_horizontal() {
            return Ok(JacobianRow::zeros(inputs.forces.variable_count()));
        }

        let dcop = self.derivative_of_cop_wrt_load(inputs, t, ee)?;
        let dacc = -self.omega_squared() * dcop[dim.index()];
        Ok(inputs.forces.load_jacobian(t, ee).scaled(dacc))
    }

    fn jacobian_of_acc_wrt_ee_pos(
        &self,
        inputs: &DynamicsInputs<'_>,
        t: f64,
        ee: usize,
        dim: Coords3D,
    ) -> DynamicsResult<JacobianRow> {
        Self::check_endeffector(inputs, ee)?;
        if !dim.is_horizontal() {
            return Ok(JacobianRow::zeros(inputs.footholds.variable_count()));
        }

        // same for x and y
        let load_share = inputs.forces.load(t, ee) / self.checked_load_sum(inputs, t)?;
        let dacc = -self.omega_squared() * load_share;
        Ok(inputs.footholds.position_jacobian(t, ee, dim).scaled(dacc))
    }
}

//! Interfaces to the trajectory representations the dynamics model reads.
//!
//! The base, force and foothold trajectories are parameterized elsewhere
//! (splines, piecewise constants, ...). The dynamics model only needs their
//! values at a query time and how those values change with the
//! representation's own unknowns.

use nalgebra::{Vector2, Vector3};
use stride_core::{Coords3D, JacobianRow};

/// Center-of-mass trajectory of the base.
pub trait BaseMotion {
    /// Number of unknowns parameterizing the trajectory.
    fn variable_count(&self) -> usize;

    /// CoM position at `t`.
    fn com_position(&self, t: f64) -> Vector3<f64>;

    /// Commanded CoM linear acceleration at `t`.
    fn com_acceleration(&self, t: f64) -> Vector3<f64>;

    /// Derivative of the `dim` acceleration component at `t` with respect
    /// to the trajectory unknowns.
    fn jacobian_of_acc_wrt_coefficients(&self, t: f64, dim: Coords3D) -> JacobianRow;
}

/// Normal load of every end-effector.
pub trait EndeffectorsForce {
    /// Number of unknowns parameterizing all load trajectories.
    fn variable_count(&self) -> usize;

    fn endeffector_count(&self) -> usize;

    /// Normal load of `ee` at `t`.
    fn load(&self, t: f64, ee: usize) -> f64;

    /// Derivative of the load of `ee` at `t` with respect to the unknowns.
    ///
    /// For a piecewise-constant load this holds a single 1.0 at the column
    /// of the active load value.
    fn load_jacobian(&self, t: f64, ee: usize) -> JacobianRow;
}

/// Horizontal foothold of every end-effector.
pub trait EndeffectorsMotion {
    /// Number of unknowns parameterizing all footholds.
    fn variable_count(&self) -> usize;

    fn endeffector_count(&self) -> usize;

    /// Horizontal position of `ee` at `t`.
    fn position(&self, t: f64, ee: usize) -> Vector2<f64>;

    /// Derivative of the `dim` position component of `ee` at `t` with
    /// respect to the unknowns.
    fn position_jacobian(&self, t: f64, ee: usize, dim: Coords3D) -> JacobianRow;
}

/// The providers a dynamics model reads during one evaluation.
///
/// Borrowed only; the optimization problem keeps ownership.
#[derive(Clone, Copy)]
pub struct DynamicsInputs<'a> {
    pub base: &'a dyn BaseMotion,
    pub forces: &'a dyn EndeffectorsForce,
    pub footholds: &'a dyn EndeffectorsMotion,
}

impl<'a> DynamicsInputs<'a> {
    /// # Panics
    /// If `forces` and `footholds` disagree on the number of end-effectors.
    pub fn new(
        base: &'a dyn BaseMotion,
        forces: &'a dyn EndeffectorsForce,
        footholds: &'a dyn EndeffectorsMotion,
    ) -> Self {
        assert_eq!(
            forces.endeffector_count(),
            footholds.endeffector_count(),
            "force and foothold providers disagree on the number of end-effectors"
        );
        Self {
            base,
            forces,
            footholds,
        }
    }

    pub fn endeffector_count(&self) -> usize {
        self.forces.endeffector_count()
    }
}

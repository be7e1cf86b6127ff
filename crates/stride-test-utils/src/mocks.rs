//! Parameter-backed trajectory providers for testing.
//!
//! Each mock stores its unknowns in a [`ParameterSet`] and implements both
//! [`OptimizationVariables`] (so tests can perturb the unknowns) and the
//! matching provider trait (so the dynamics model can read them).

use nalgebra::{DVector, Vector2, Vector3};
use stride_core::{Coords3D, JacobianRow, OptimizationVariables, ParameterSet, VecBound};
use stride_dynamics::{BaseMotion, EndeffectorsForce, EndeffectorsMotion};

macro_rules! delegate_variables {
    ($ty:ty) => {
        impl OptimizationVariables for $ty {
            fn id(&self) -> &str {
                self.params.id()
            }

            fn count(&self) -> usize {
                self.params.count()
            }

            fn values(&self) -> DVector<f64> {
                self.params.values()
            }

            fn set_values(&mut self, x: &DVector<f64>) {
                self.params.set_values(x);
            }

            fn bounds(&self) -> VecBound {
                self.params.bounds()
            }
        }
    };
}

// ---------------------------------------------------------------------------
// QuadraticBaseMotion
// ---------------------------------------------------------------------------

/// CoM trajectory `p0 + v0 t + ½ a t²` with unknowns `[p0, v0, a]`.
pub struct QuadraticBaseMotion {
    params: ParameterSet,
}

impl QuadraticBaseMotion {
    pub fn new(p0: Vector3<f64>, v0: Vector3<f64>, acc: Vector3<f64>) -> Self {
        let mut values = DVector::zeros(9);
        values.fixed_rows_mut::<3>(0).copy_from(&p0);
        values.fixed_rows_mut::<3>(3).copy_from(&v0);
        values.fixed_rows_mut::<3>(6).copy_from(&acc);
        Self {
            params: ParameterSet::with_values("base_motion", values),
        }
    }

    /// Base resting at `com`.
    pub fn at_rest(com: Vector3<f64>) -> Self {
        Self::new(com, Vector3::zeros(), Vector3::zeros())
    }

    fn block(&self, start: usize) -> Vector3<f64> {
        self.params.as_vector().fixed_rows::<3>(start).into()
    }
}

delegate_variables!(QuadraticBaseMotion);

impl BaseMotion for QuadraticBaseMotion {
    fn variable_count(&self) -> usize {
        self.params.count()
    }

    fn com_position(&self, t: f64) -> Vector3<f64> {
        self.block(0) + self.block(3) * t + self.block(6) * (0.5 * t * t)
    }

    fn com_acceleration(&self, _t: f64) -> Vector3<f64> {
        self.block(6)
    }

    fn jacobian_of_acc_wrt_coefficients(&self, _t: f64, dim: Coords3D) -> JacobianRow {
        let mut jac = JacobianRow::zeros(self.params.count());
        jac.insert(6 + dim.index(), 1.0);
        jac
    }
}

// ---------------------------------------------------------------------------
// ConstantLoads
// ---------------------------------------------------------------------------

/// One constant normal load per end-effector.
pub struct ConstantLoads {
    params: ParameterSet,
}

impl ConstantLoads {
    pub fn new(loads: &[f64]) -> Self {
        Self {
            params: ParameterSet::with_values("ee_load", DVector::from_column_slice(loads)),
        }
    }
}

delegate_variables!(ConstantLoads);

impl EndeffectorsForce for ConstantLoads {
    fn variable_count(&self) -> usize {
        self.params.count()
    }

    fn endeffector_count(&self) -> usize {
        self.params.count()
    }

    fn load(&self, _t: f64, ee: usize) -> f64 {
        self.params.value(ee)
    }

    fn load_jacobian(&self, _t: f64, ee: usize) -> JacobianRow {
        let mut jac = JacobianRow::zeros(self.params.count());
        jac.insert(ee, 1.0);
        jac
    }
}

// ---------------------------------------------------------------------------
// ConstantFootholds
// ---------------------------------------------------------------------------

/// One constant horizontal foothold per end-effector, unknowns `[x0, y0, x1, y1, ...]`.
pub struct ConstantFootholds {
    params: ParameterSet,
}

impl ConstantFootholds {
    pub fn new(footholds: &[Vector2<f64>]) -> Self {
        let values = DVector::from_iterator(
            2 * footholds.len(),
            footholds.iter().flat_map(|p| [p.x, p.y]),
        );
        Self {
            params: ParameterSet::with_values("ee_motion", values),
        }
    }
}

delegate_variables!(ConstantFootholds);

impl EndeffectorsMotion for ConstantFootholds {
    fn variable_count(&self) -> usize {
        self.params.count()
    }

    fn endeffector_count(&self) -> usize {
        self.params.count() / 2
    }

    fn position(&self, _t: f64, ee: usize) -> Vector2<f64> {
        Vector2::new(self.params.value(2 * ee), self.params.value(2 * ee + 1))
    }

    fn position_jacobian(&self, _t: f64, ee: usize, dim: Coords3D) -> JacobianRow {
        let mut jac = JacobianRow::zeros(self.params.count());
        if dim.is_horizontal() {
            jac.insert(2 * ee + dim.index(), 1.0);
        }
        jac
    }
}

//! The variable groups an optimization problem stores in its arena.

use nalgebra::DVector;
use stride_core::{OptimizationVariables, ParameterSet, VariableArena, VecBound};

use crate::timing::ContactTimings;

/// Any variable group of the problem.
#[derive(Clone, Debug, PartialEq)]
pub enum VariableGroup {
    /// Plain bounded parameters (spline coefficients, loads, footholds).
    Parameters(ParameterSet),
    /// Phase durations of one end-effector.
    ContactTimings(ContactTimings),
}

/// Arena holding every variable group of one problem.
pub type ProblemVariables = VariableArena<VariableGroup>;

impl VariableGroup {
    pub const fn as_parameters(&self) -> Option<&ParameterSet> {
        match self {
            Self::Parameters(p) => Some(p),
            Self::ContactTimings(_) => None,
        }
    }

    pub const fn as_contact_timings(&self) -> Option<&ContactTimings> {
        match self {
            Self::ContactTimings(t) => Some(t),
            Self::Parameters(_) => None,
        }
    }
}

impl From<ParameterSet> for VariableGroup {
    fn from(p: ParameterSet) -> Self {
        Self::Parameters(p)
    }
}

impl From<ContactTimings> for VariableGroup {
    fn from(t: ContactTimings) -> Self {
        Self::ContactTimings(t)
    }
}

impl OptimizationVariables for VariableGroup {
    fn id(&self) -> &str {
        match self {
            Self::Parameters(p) => p.id(),
            Self::ContactTimings(t) => t.id(),
        }
    }

    fn count(&self) -> usize {
        match self {
            Self::Parameters(p) => p.count(),
            Self::ContactTimings(t) => t.count(),
        }
    }

    fn values(&self) -> DVector<f64> {
        match self {
            Self::Parameters(p) => p.values(),
            Self::ContactTimings(t) => t.values(),
        }
    }

    fn set_values(&mut self, x: &DVector<f64>) {
        match self {
            Self::Parameters(p) => p.set_values(x),
            Self::ContactTimings(t) => t.set_values(x),
        }
    }

    fn bounds(&self) -> VecBound {
        match self {
            Self::Parameters(p) => p.bounds(),
            Self::ContactTimings(t) => t.bounds(),
        }
    }
}

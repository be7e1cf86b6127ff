//! Named groups of scalar optimization unknowns with box bounds.
//!
//! Every variable group handed to the solver implements
//! [`OptimizationVariables`]. [`ParameterSet`] is the plain implementation:
//! values and bounds are stored as given. Groups that derive their bounds
//! from other state (e.g. contact timings) compute them in
//! [`OptimizationVariables::bounds`] on every call instead of caching.

use nalgebra::DVector;

use crate::types::{Bound, VecBound};

/// A fixed-size group of scalar unknowns exposed to the solver.
pub trait OptimizationVariables {
    /// Diagnostic label of what these parameters represent.
    fn id(&self) -> &str;

    /// Number of scalar unknowns. Fixed after construction.
    fn count(&self) -> usize;

    /// Current values, length [`count`](Self::count).
    fn values(&self) -> DVector<f64>;

    /// Replace the current values.
    ///
    /// # Panics
    /// If `x.len() != self.count()`.
    fn set_values(&mut self, x: &DVector<f64>);

    /// One bound per scalar, in value order. Recomputed on every call.
    fn bounds(&self) -> VecBound;
}

impl<T: OptimizationVariables + ?Sized> OptimizationVariables for Box<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn count(&self) -> usize {
        (**self).count()
    }

    fn values(&self) -> DVector<f64> {
        (**self).values()
    }

    fn set_values(&mut self, x: &DVector<f64>) {
        (**self).set_values(x);
    }

    fn bounds(&self) -> VecBound {
        (**self).bounds()
    }
}

// ---------------------------------------------------------------------------
// ParameterSet
// ---------------------------------------------------------------------------

/// Generic bounded parameter container.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    id: String,
    values: DVector<f64>,
    bounds: VecBound,
}

impl ParameterSet {
    /// `count` zero-valued, unbounded parameters.
    pub fn new(id: impl Into<String>, count: usize) -> Self {
        Self {
            id: id.into(),
            values: DVector::zeros(count),
            bounds: vec![Bound::UNBOUNDED; count],
        }
    }

    /// Unbounded parameters initialised from `values`.
    pub fn with_values(id: impl Into<String>, values: DVector<f64>) -> Self {
        let count = values.len();
        Self {
            id: id.into(),
            values,
            bounds: vec![Bound::UNBOUNDED; count],
        }
    }

    /// Apply the same bound to every parameter.
    pub fn set_all_bounds(&mut self, bound: Bound) {
        self.bounds.fill(bound);
    }

    /// Bound a single parameter.
    pub fn set_bound(&mut self, index: usize, bound: Bound) {
        self.bounds[index] = bound;
    }

    /// Value of a single parameter.
    pub fn value(&self, index: usize) -> f64 {
        self.values[index]
    }

    /// Stored values without copying.
    pub const fn as_vector(&self) -> &DVector<f64> {
        &self.values
    }
}

impl OptimizationVariables for ParameterSet {
    fn id(&self) -> &str {
        &self.id
    }

    fn count(&self) -> usize {
        self.values.len()
    }

    fn values(&self) -> DVector<f64> {
        self.values.clone()
    }

    fn set_values(&mut self, x: &DVector<f64>) {
        assert_eq!(
            x.len(),
            self.count(),
            "{}: expected {} values, got {}",
            self.id,
            self.count(),
            x.len()
        );
        self.values.copy_from(x);
    }

    fn bounds(&self) -> VecBound {
        self.bounds.clone()
    }
}

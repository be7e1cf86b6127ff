//! Handle-based ownership of variable groups.
//!
//! The optimization problem owns every variable group in one
//! [`VariableArena`]. Constraint and cost evaluators keep a
//! [`VariableHandle`] and borrow the group from the arena when they need it,
//! so no group is shared through reference counting.
//!
//! The arena also defines the layout of the stacked unknown vector seen by
//! the solver: groups are concatenated in insertion order.

use nalgebra::DVector;

use crate::types::VecBound;
use crate::variables::OptimizationVariables;

/// Stable index of a group inside a [`VariableArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableHandle(usize);

impl VariableHandle {
    /// Position of the group in insertion order.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Owner of all variable groups of one problem.
#[derive(Debug, Clone)]
pub struct VariableArena<G> {
    groups: Vec<G>,
}

impl<G> Default for VariableArena<G> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<G: OptimizationVariables> VariableArena<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `group` and return its handle.
    pub fn insert(&mut self, group: G) -> VariableHandle {
        self.groups.push(group);
        VariableHandle(self.groups.len() - 1)
    }

    pub fn get(&self, handle: VariableHandle) -> &G {
        &self.groups[handle.0]
    }

    pub fn get_mut(&mut self, handle: VariableHandle) -> &mut G {
        &mut self.groups[handle.0]
    }

    /// Handle of the first group carrying `id`.
    pub fn find_by_id(&self, id: &str) -> Option<VariableHandle> {
        self.groups
            .iter()
            .position(|g| g.id() == id)
            .map(VariableHandle)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableHandle, &G)> {
        self.groups
            .iter()
            .enumerate()
            .map(|(i, g)| (VariableHandle(i), g))
    }

    /// Total number of scalar unknowns across all groups.
    pub fn count(&self) -> usize {
        self.groups.iter().map(OptimizationVariables::count).sum()
    }

    /// Column of the first unknown of `handle` in the stacked vector.
    pub fn offset(&self, handle: VariableHandle) -> usize {
        assert!(handle.0 < self.groups.len(), "stale variable handle {handle:?}");
        self.groups[..handle.0]
            .iter()
            .map(OptimizationVariables::count)
            .sum()
    }

    /// Stacked values of all groups.
    pub fn values(&self) -> DVector<f64> {
        let mut x = DVector::zeros(self.count());
        let mut row = 0;
        for g in &self.groups {
            let n = g.count();
            x.rows_mut(row, n).copy_from(&g.values());
            row += n;
        }
        x
    }

    /// Split `x` by group sizes and write each slice into its group.
    ///
    /// # Panics
    /// If `x.len()` differs from [`count`](Self::count).
    pub fn set_values(&mut self, x: &DVector<f64>) {
        assert_eq!(
            x.len(),
            self.count(),
            "stacked vector has {} entries, arena holds {} unknowns",
            x.len(),
            self.count()
        );
        let mut row = 0;
        for g in &mut self.groups {
            let n = g.count();
            g.set_values(&x.rows(row, n).clone_owned());
            row += n;
        }
    }

    /// Stacked bounds of all groups.
    pub fn bounds(&self) -> VecBound {
        self.groups.iter().flat_map(OptimizationVariables::bounds).collect()
    }
}

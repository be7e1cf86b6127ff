use nalgebra::DVector;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Coords3D
// ---------------------------------------------------------------------------

/// Cartesian axis of a linear quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coords3D {
    X,
    Y,
    Z,
}

impl Coords3D {
    /// All three axes in storage order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// The two horizontal axes.
    pub const HORIZONTAL: [Self; 2] = [Self::X, Self::Y];

    /// Row index of this axis in a 3-vector.
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Whether this axis lies in the ground plane.
    pub const fn is_horizontal(self) -> bool {
        !matches!(self, Self::Z)
    }
}

// ---------------------------------------------------------------------------
// Bound
// ---------------------------------------------------------------------------

/// Box bound `[lower, upper]` on a single scalar unknown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub lower: f64,
    pub upper: f64,
}

/// One bound per scalar, in value order.
pub type VecBound = Vec<Bound>;

impl Bound {
    /// Bound pinning a scalar to zero.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Bound that does not restrict the scalar.
    pub const UNBOUNDED: Self = Self::new(f64::NEG_INFINITY, f64::INFINITY);

    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Whether `x` lies inside the closed interval.
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

impl Default for Bound {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

// ---------------------------------------------------------------------------
// JacobianRow
// ---------------------------------------------------------------------------

/// Sparse row vector of partial derivatives with respect to a group of
/// unknowns.
///
/// Entries are kept sorted by column; writing the same column twice
/// overwrites the previous value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JacobianRow {
    cols: usize,
    entries: Vec<(usize, f64)>,
}

impl JacobianRow {
    /// An all-zero row over `cols` unknowns.
    pub const fn zeros(cols: usize) -> Self {
        Self {
            cols,
            entries: Vec::new(),
        }
    }

    /// Number of columns (unknowns) the row spans.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored (structurally non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Whether every entry is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|&(_, v)| v == 0.0)
    }

    /// Value at column `col`; zero if not stored.
    pub fn get(&self, col: usize) -> f64 {
        assert!(col < self.cols, "column {col} out of range for {} columns", self.cols);
        self.entries
            .binary_search_by_key(&col, |&(c, _)| c)
            .map_or(0.0, |i| self.entries[i].1)
    }

    /// Write `value` at column `col`.
    pub fn insert(&mut self, col: usize, value: f64) {
        assert!(col < self.cols, "column {col} out of range for {} columns", self.cols);
        match self.entries.binary_search_by_key(&col, |&(c, _)| c) {
            Ok(i) => self.entries[i].1 = value,
            Err(i) => self.entries.insert(i, (col, value)),
        }
    }

    /// Stored `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Dense copy of the row.
    pub fn to_dense(&self) -> DVector<f64> {
        let mut dense = DVector::zeros(self.cols);
        for &(c, v) in &self.entries {
            dense[c] = v;
        }
        dense
    }

    /// Multiply every entry by `factor`.
    #[must_use]
    pub fn scaled(mut self, factor: f64) -> Self {
        for entry in &mut self.entries {
            entry.1 *= factor;
        }
        self
    }
}

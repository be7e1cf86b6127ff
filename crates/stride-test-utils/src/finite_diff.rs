//! Central finite differences for checking analytic Jacobians in tests.

use nalgebra::DVector;

/// Default step of [`central_difference`].
pub const FD_STEP: f64 = 1e-6;

/// Central difference of `f` at `x` along coordinate `i`.
///
/// `f` receives a perturbed copy of `x`; the original is not modified.
pub fn central_difference<F>(mut f: F, x: &DVector<f64>, i: usize, h: f64) -> f64
where
    F: FnMut(&DVector<f64>) -> f64,
{
    let mut x_plus = x.clone();
    x_plus[i] += h;
    let mut x_minus = x.clone();
    x_minus[i] -= h;
    (f(&x_plus) - f(&x_minus)) / (2.0 * h)
}

/// Central-difference gradient of `f` at `x`.
pub fn central_gradient<F>(mut f: F, x: &DVector<f64>, h: f64) -> DVector<f64>
where
    F: FnMut(&DVector<f64>) -> f64,
{
    DVector::from_iterator(x.len(), (0..x.len()).map(|i| central_difference(&mut f, x, i, h)))
}

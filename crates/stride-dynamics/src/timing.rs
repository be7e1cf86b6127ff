//! Phase durations of one end-effector as optimization unknowns.
//!
//! An end-effector runs through a fixed alternating sequence of phases,
//! starting in contact:
//!
//! ```text
//! phase:   0 (stance) | 1 (swing) | 2 (stance) | 3 (swing) | ...
//! ```
//!
//! The solver may change every phase duration except the last, which is
//! derived so that the sum always equals the total duration fixed at
//! construction.
//!
//! Each phase boundary is blurred into a transition of width ε. The
//! *expanded schedule* splits the horizon into plain phases and transitions,
//! whose types cycle through [`PhaseType`]:
//!
//! ```text
//! [d0 - ε/2] [ε] [d1 - ε] [ε] [d2 - ε] ... [ε] [dn - ε/2]
//!  InContact  Brk  Flight  Make  InContact ...
//! ```
//!
//! Inside a transition the contact activation follows the cubic smoothstep
//! `s(τ) = τ²/ε³ (3ε - 2τ)`, which has zero slope at both ends, so the
//! activation and its time derivative are continuous everywhere.

use nalgebra::DVector;
use stride_core::segmentation;
use stride_core::{Bound, JacobianRow, OptimizationVariables, TimingConfig, VecBound};
use tracing::debug;

/// Prefix of the [`ContactTimings`] id; the end-effector index is appended.
pub const CONTACT_TIMINGS_ID: &str = "contact_timings_";

/// Type of a segment of the expanded schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseType {
    /// Foot on the ground, activation 1.
    InContact,
    /// Foot lifting off, activation falls from 1 to 0.
    BreakContact,
    /// Foot in the air, activation 0.
    Flight,
    /// Foot touching down, activation rises from 0 to 1.
    MakeContact,
}

impl PhaseType {
    /// Length of the repeating cycle.
    pub const COUNT: usize = 4;

    /// Type of the `segment`-th entry of an expanded schedule.
    pub fn from_segment(segment: usize) -> Self {
        match segment % Self::COUNT {
            0 => Self::InContact,
            1 => Self::BreakContact,
            2 => Self::Flight,
            3 => Self::MakeContact,
            other => unreachable!("phase type {other} is outside the contact cycle"),
        }
    }
}

/// Cubic smoothstep on `[0, eps]`: `s(0) = 0`, `s(eps) = 1`, zero slope at both ends.
pub fn smoothstep(tau: f64, eps: f64) -> f64 {
    // clamp away rounding at the ends so activations stay within [0, 1]
    (tau.powi(2) / eps.powi(3) * (3.0 * eps - 2.0 * tau)).clamp(0.0, 1.0)
}

/// Derivative of [`smoothstep`] with respect to `tau`.
pub fn smoothstep_derivative(tau: f64, eps: f64) -> f64 {
    6.0 * tau / eps.powi(3) * (eps - tau)
}

/// Shortest initial duration of phase `i` out of `n` that keeps every
/// segment of the expanded schedule non-negative.
fn shortest_phase(i: usize, n: usize, config: &TimingConfig) -> f64 {
    let eps = config.transition_width;
    let transitions = match (i == 0, i + 1 == n) {
        (true, true) => 0.0,
        (true, false) | (false, true) => eps / 2.0,
        (false, false) => eps,
    };
    transitions.max(config.min_phase_duration)
}

/// Phase durations of one end-effector.
#[derive(Clone, Debug, PartialEq)]
pub struct ContactTimings {
    id: String,
    ee: usize,
    /// All phase durations, including the derived last one.
    durations: Vec<f64>,
    /// Sum of the initial durations. Never changes.
    total_duration: f64,
    /// Width ε of a contact transition.
    transition_width: f64,
    /// Lower bound of every free duration.
    min_phase_duration: f64,
    /// Whether the last duration is derived rather than free.
    drop_last_duration: bool,
}

impl ContactTimings {
    /// Create the timings of end-effector `ee` from its initial durations.
    ///
    /// # Panics
    /// If `config` is invalid, `durations` is empty, or any duration is not
    /// finite or too short to hold its transitions (ε for inner phases, ε/2
    /// for the first and last) and the minimum phase duration.
    pub fn new(ee: usize, durations: Vec<f64>, config: &TimingConfig) -> Self {
        if let Err(err) = config.validate() {
            panic!("invalid timing config for end-effector {ee}: {err}");
        }
        assert!(!durations.is_empty(), "end-effector {ee} needs at least one phase");

        let n = durations.len();
        for (i, &d) in durations.iter().enumerate() {
            let shortest = shortest_phase(i, n, config);
            assert!(
                d.is_finite() && d >= shortest,
                "phase {i} of end-effector {ee} lasts {d}, shorter than the minimum {shortest}"
            );
        }

        let total_duration = durations.iter().sum();
        Self {
            id: format!("{CONTACT_TIMINGS_ID}{ee}"),
            ee,
            durations,
            total_duration,
            transition_width: config.transition_width,
            min_phase_duration: config.min_phase_duration,
            drop_last_duration: config.drop_last_duration,
        }
    }

    /// Create with the default [`TimingConfig`].
    pub fn with_defaults(ee: usize, durations: Vec<f64>) -> Self {
        Self::new(ee, durations, &TimingConfig::default())
    }

    /// End-effector these timings belong to.
    pub const fn endeffector(&self) -> usize {
        self.ee
    }

    /// Number of phases, free and derived.
    pub fn phase_count(&self) -> usize {
        self.durations.len()
    }

    /// All phase durations, including the derived last one.
    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    /// Sum of the initial durations.
    pub const fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Width ε of a contact transition.
    pub const fn transition_width(&self) -> f64 {
        self.transition_width
    }

    /// The expanded schedule: phases interleaved with transitions of width ε.
    ///
    /// Computed from the current durations on every call.
    pub fn durations_with_transitions(&self) -> Vec<f64> {
        let eps = self.transition_width;
        let mut expanded = Vec::with_capacity(2 * self.durations.len() - 1);

        // first phase has no transition at its front
        expanded.push(self.durations[0] - eps / 2.0);
        for &d in &self.durations[1..] {
            expanded.push(eps);
            expanded.push(d - eps);
        }
        // nor the last one at its end
        if let Some(last) = expanded.last_mut() {
            *last += eps / 2.0;
        }

        expanded
    }

    /// Type of the expanded segment enclosing `t_global`.
    pub fn phase_type(&self, t_global: f64) -> PhaseType {
        let segment = segmentation::segment_id(t_global, &self.durations_with_transitions());
        PhaseType::from_segment(segment)
    }

    /// Index of the phase whose duration controls the activation at `t_global`.
    ///
    /// A transition straddles a boundary symmetrically, so its first half
    /// lies in the phase that is ending. Shifting the query back by ε/2
    /// attributes the whole transition to that phase.
    pub fn phase_index(&self, t_global: f64) -> usize {
        let t_eval = (t_global - self.transition_width / 2.0).max(0.0);
        segmentation::segment_id(t_eval, &self.durations)
    }

    /// Contact activation in `[0, 1]` at `t_global`.
    pub fn contact_value(&self, t_global: f64) -> f64 {
        let (segment, t_local) =
            segmentation::locate(t_global, &self.durations_with_transitions());
        let trans = smoothstep(t_local, self.transition_width);

        match PhaseType::from_segment(segment) {
            PhaseType::InContact => 1.0,
            PhaseType::BreakContact => 1.0 - trans,
            PhaseType::Flight => 0.0,
            PhaseType::MakeContact => trans,
        }
    }

    /// Time derivative of the contact activation at `t_global`.
    pub fn contact_value_rate(&self, t_global: f64) -> f64 {
        let (segment, t_local) =
            segmentation::locate(t_global, &self.durations_with_transitions());
        let rate = smoothstep_derivative(t_local, self.transition_width);

        match PhaseType::from_segment(segment) {
            PhaseType::InContact | PhaseType::Flight => 0.0,
            PhaseType::BreakContact => -rate,
            PhaseType::MakeContact => rate,
        }
    }

    /// Derivative of the contact activation at `t_global` with respect to
    /// the free durations.
    ///
    /// Only the phase owning the current transition gets an entry.
    /// Lengthening that phase delays the transition, so the entry is the
    /// negated time derivative. Earlier phases also shift the transition
    /// and are left out.
    pub fn jacobian_of_contact_value_wrt_timings(&self, t_global: f64) -> JacobianRow {
        let mut jac = JacobianRow::zeros(self.count());

        match self.phase_type(t_global) {
            // contact value does not depend on timings
            PhaseType::InContact | PhaseType::Flight => {}
            PhaseType::BreakContact | PhaseType::MakeContact => {
                let idx = self.phase_index(t_global);
                debug_assert!(idx < jac.cols(), "transition owned by the derived last phase");
                jac.insert(idx, -self.contact_value_rate(t_global));
            }
        }

        jac
    }

    fn report_short_last_phase(&self) {
        let Some(&last) = self.durations.last() else {
            return;
        };
        if last < self.min_phase_duration || last < self.transition_width / 2.0 {
            debug!(
                id = %self.id,
                last_duration = last,
                min_phase_duration = self.min_phase_duration,
                "derived last phase is shorter than allowed"
            );
        }
    }
}

impl OptimizationVariables for ContactTimings {
    fn id(&self) -> &str {
        &self.id
    }

    fn count(&self) -> usize {
        if self.drop_last_duration {
            self.durations.len() - 1
        } else {
            self.durations.len()
        }
    }

    fn values(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.durations[..self.count()])
    }

    fn set_values(&mut self, x: &DVector<f64>) {
        let n = self.count();
        assert_eq!(
            x.len(),
            n,
            "{}: expected {n} durations, got {}",
            self.id,
            x.len()
        );

        self.durations[..n].copy_from_slice(x.as_slice());
        if self.drop_last_duration {
            // keep the total duration constant
            if let Some(last) = self.durations.last_mut() {
                *last = self.total_duration - x.sum();
            }
            self.report_short_last_phase();
        }
    }

    fn bounds(&self) -> VecBound {
        vec![Bound::new(self.min_phase_duration, self.total_duration); self.count()]
    }
}

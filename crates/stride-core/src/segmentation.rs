//! Mapping of a global time onto a sequence of consecutive segments.
//!
//! A schedule is a list of non-negative segment durations laid end to end
//! starting at `t = 0`. Queries return the enclosing segment and the time
//! elapsed since that segment started.
//!
//! - An instant on a boundary belongs to the earlier segment (within
//!   [`BOUNDARY_TOLERANCE`]).
//! - Negative times are treated as `0`.
//! - Times at or past the end clamp to the last segment, with the local
//!   offset equal to that segment's full duration.

/// Slack used when comparing a query time against a segment end.
pub const BOUNDARY_TOLERANCE: f64 = 1e-10;

/// Index of the segment enclosing `t_global` and the local offset in it.
///
/// # Panics
/// If `durations` is empty.
pub fn locate(t_global: f64, durations: &[f64]) -> (usize, f64) {
    assert!(!durations.is_empty(), "cannot segment an empty schedule");

    let t_global = t_global.max(0.0);
    let mut t_start = 0.0;
    for (i, &d) in durations.iter().enumerate() {
        let t_end = t_start + d;
        if t_end >= t_global - BOUNDARY_TOLERANCE {
            let local = (t_global - t_start).clamp(0.0, d);
            return (i, local);
        }
        t_start = t_end;
    }

    let last = durations.len() - 1;
    (last, durations[last])
}

/// Index of the segment enclosing `t_global`.
pub fn segment_id(t_global: f64, durations: &[f64]) -> usize {
    locate(t_global, durations).0
}

/// Time elapsed since the start of the segment enclosing `t_global`.
pub fn local_time(t_global: f64, durations: &[f64]) -> f64 {
    locate(t_global, durations).1
}

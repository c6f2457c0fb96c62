//! Snap refinement
//!
//! A selected grid time is only an approximation of the musical event it
//! represents; the true onset peak may sit a few frames away. Snapping
//! replaces each selected time with the argmax of the normalized novelty
//! curve inside a small window, falling back to the original time when the
//! window holds no samples.

use crate::features::TimeSeries;

/// Time of the maximum novelty value within `t0 +/- half_window`
///
/// Ties resolve to the earliest sample in the window. Returns `t0` unchanged
/// when the window is empty.
pub fn snap_to_peak(times: &[f64], values: &[f64], t0: f64, half_window: f64) -> f64 {
    let lo = times.partition_point(|&t| t < t0 - half_window);
    let hi = times.partition_point(|&t| t <= t0 + half_window);
    if hi <= lo {
        return t0;
    }
    let mut best = lo;
    for i in lo + 1..hi {
        if values[i] > values[best] {
            best = i;
        }
    }
    times[best]
}

/// Snap every selected time to its local novelty peak and sort ascending
///
/// Snapping moves points by at most the window width, which can reorder
/// near-coincident selections; the final sort restores global ordering.
pub fn snap_times(selected: &[f64], novelty: &TimeSeries, half_window: f64) -> Vec<f64> {
    let mut snapped: Vec<f64> = selected
        .iter()
        .map(|&t| snap_to_peak(&novelty.times, &novelty.values, t, half_window))
        .collect();
    snapped.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    snapped
}

//! Grid point salience scoring
//!
//! Each grid point is scored by max-pooling the normalized novelty curve in a
//! small symmetric window around its time, then multiplying by the rhythmic
//! accent weight of its phase. Max-pooling (rather than interpolation) lets a
//! slot claim a nearby onset peak even when the grid and the novelty sampling
//! are slightly misaligned.

use crate::features::TimeSeries;
use crate::grid::{phase_weight, TatumGrid};

/// Maximum novelty value within `t0 +/- half_window`
///
/// Window bounds are binary-searched: the left edge is inclusive, the right
/// edge inclusive as well (`searchsorted` left/right semantics). Returns 0.0
/// when no samples fall in the window.
pub fn window_max(times: &[f64], values: &[f64], t0: f64, half_window: f64) -> f64 {
    let lo = times.partition_point(|&t| t < t0 - half_window);
    let hi = times.partition_point(|&t| t <= t0 + half_window);
    if hi <= lo {
        return 0.0;
    }
    values[lo..hi].iter().copied().fold(f64::MIN, f64::max)
}

/// Score every grid point: local novelty max x phase accent weight
///
/// # Arguments
///
/// * `grid` - Tatum grid
/// * `novelty` - Normalized novelty curve
/// * `score_window_sec` - Half-window for max-pooling, in seconds
///
/// # Returns
///
/// One raw score per grid point, parallel to `grid.times`
pub fn score_grid(grid: &TatumGrid, novelty: &TimeSeries, score_window_sec: f64) -> Vec<f64> {
    let scores: Vec<f64> = grid
        .times
        .iter()
        .zip(grid.phases.iter())
        .map(|(&t, &p)| {
            window_max(&novelty.times, &novelty.values, t, score_window_sec) * phase_weight(p)
        })
        .collect();

    log::debug!(
        "Scored {} grid points (window +/-{} s)",
        scores.len(),
        score_window_sec
    );

    scores
}

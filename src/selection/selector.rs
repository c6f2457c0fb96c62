//! Adaptive selection with bounded constraint relaxation
//!
//! One selection attempt filters grid points by allowed phase, thresholds
//! their scores at a quantile, and greedily accepts the highest-scoring
//! candidates subject to a minimum spacing. When the target count is not
//! reached the constraints are relaxed one step per attempt in a strict
//! priority order: admit the next-strongest phase, then lower the quantile,
//! then shrink the spacing toward a hard floor. The loop is bounded, the
//! constraints only ever loosen, and the spacing floor is never crossed, so
//! the engine degrades to fewer notes rather than overlapping ones.

use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::features::TimeSeries;
use crate::grid::{TatumGrid, PHASE_EXPANSION_ORDER, TATUM_COUNT};
use crate::selection::snap::snap_times;
use crate::selection::{CandidateNote, SelectionOutcome};

/// Maximum number of selection attempts
const MAX_ATTEMPTS: usize = 10;

/// Quantile threshold lower bound and per-step decrement
const QUANTILE_FLOOR: f64 = 0.10;
const QUANTILE_STEP: f64 = 0.10;

/// Spacing never shrinks below this fraction of the initial minimum spacing
const SPACING_FLOOR_FRACTION: f64 = 0.80;

/// Per-step spacing shrink factor
const SPACING_SHRINK: f64 = 0.95;

/// Quantile thresholding is skipped below this candidate count
const MIN_CANDIDATES_FOR_THRESHOLD: usize = 9;

/// Select note times from the scored grid, relaxing constraints as needed
///
/// # Arguments
///
/// * `grid` - Tatum grid
/// * `scores` - Raw score per grid point, parallel to the grid
/// * `beat_times` - Beat timeline, for the reference period and beat count
/// * `novelty` - Normalized novelty curve, for snap refinement
/// * `difficulty` - Difficulty level (EASY never relaxes)
/// * `profile` - Validated selection profile for the difficulty
/// * `snap_window_sec` - Half-window for snap refinement, in seconds
///
/// # Returns
///
/// Snapped, ascending note times plus relaxation diagnostics. The result may
/// hold fewer notes than the target when the constraints cannot be satisfied,
/// never more.
pub fn select_with_relaxation(
    grid: &TatumGrid,
    scores: &[f64],
    beat_times: &[f64],
    novelty: &TimeSeries,
    difficulty: Difficulty,
    profile: &DifficultyProfile,
    snap_window_sec: f64,
) -> SelectionOutcome {
    let beat_period = median_beat_period(beat_times);
    let n_beats = beat_times.len().saturating_sub(1).max(1);
    let target_count = (profile.target_notes_per_beat * n_beats as f64).round() as usize;

    let min_spacing = profile.min_spacing_fraction * beat_period;
    let spacing_floor = min_spacing * SPACING_FLOOR_FRACTION;

    // Mutable relaxation state, local to this call
    let mut allowed = [false; TATUM_COUNT];
    for &p in profile.allowed_phases {
        allowed[p] = true;
    }
    let mut pending: Vec<usize> = PHASE_EXPANSION_ORDER
        .iter()
        .copied()
        .filter(|&p| !allowed[p])
        .collect();
    let mut quantile = profile.base_quantile;
    let mut spacing = min_spacing;

    let mut best: Vec<f64> = Vec::new();
    let mut attempts = 0;

    for step in 0..MAX_ATTEMPTS {
        attempts = step + 1;

        let chosen = run_attempt(grid, scores, &allowed, quantile, spacing, target_count);

        if !chosen.is_empty() {
            let snapped = snap_times(&chosen, novelty, snap_window_sec);
            // Any non-empty acceptance overwrites the previous best, even a
            // shorter one: the most recent attempt reflects the current
            // constraint state.
            best = snapped;

            if best.len() >= target_count {
                log::debug!(
                    "Selection converged: step={} count={} target={} q={:.2} phases={} spacing={:.3}",
                    step,
                    best.len(),
                    target_count,
                    quantile,
                    allowed.iter().filter(|&&a| a).count(),
                    spacing
                );
                return SelectionOutcome {
                    times: best,
                    target_count,
                    reached_target: true,
                    attempts,
                    final_quantile: quantile,
                    final_spacing: spacing,
                    final_phase_count: allowed.iter().filter(|&&a| a).count(),
                };
            }
        }

        // Relax one step, strongest lever first (NORMAL/HARD only)
        if difficulty.relaxes() {
            if !pending.is_empty() {
                let p = pending.remove(0);
                allowed[p] = true;
            } else if quantile > QUANTILE_FLOOR {
                quantile = (quantile - QUANTILE_STEP).max(QUANTILE_FLOOR);
            } else if spacing > spacing_floor {
                spacing = (spacing * SPACING_SHRINK).max(spacing_floor);
            } else {
                break;
            }
        } else {
            break;
        }
    }

    log::debug!(
        "Selection exhausted: count={} target={} q={:.2} phases={} spacing={:.3}",
        best.len(),
        target_count,
        quantile,
        allowed.iter().filter(|&&a| a).count(),
        spacing
    );

    SelectionOutcome {
        times: best,
        target_count,
        reached_target: false,
        attempts,
        final_quantile: quantile,
        final_spacing: spacing,
        final_phase_count: allowed.iter().filter(|&&a| a).count(),
    }
}

/// One selection attempt under the current constraint state
fn run_attempt(
    grid: &TatumGrid,
    scores: &[f64],
    allowed: &[bool; TATUM_COUNT],
    quantile: f64,
    spacing: f64,
    target_count: usize,
) -> Vec<f64> {
    let mut candidates: Vec<CandidateNote> = grid
        .times
        .iter()
        .zip(grid.phases.iter())
        .zip(scores.iter())
        .filter(|((_, &p), _)| allowed[p])
        .map(|((&t, _), &s)| CandidateNote { time: t, score: s })
        .collect();

    if candidates.is_empty() {
        return Vec::new();
    }

    // Degenerate quantiles on tiny samples would discard everything
    let threshold = if candidates.len() >= MIN_CANDIDATES_FOR_THRESHOLD {
        let score_values: Vec<f64> = candidates.iter().map(|c| c.score).collect();
        score_quantile(&score_values, quantile)
    } else {
        0.0
    };
    candidates.retain(|c| c.score >= threshold);

    // Stable sort: equal scores resolve to the earlier grid point, keeping
    // selection deterministic
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut chosen: Vec<f64> = Vec::new();
    for candidate in &candidates {
        if chosen.iter().all(|&t| (candidate.time - t).abs() >= spacing) {
            chosen.push(candidate.time);
            if chosen.len() >= target_count {
                break;
            }
        }
    }

    chosen
}

/// Quantile of a non-empty slice with linear interpolation between ranks
fn score_quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let h = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
}

/// Median of consecutive beat differences; 0.5 s when fewer than two beats
fn median_beat_period(beat_times: &[f64]) -> f64 {
    if beat_times.len() < 2 {
        return 0.5;
    }
    let mut periods: Vec<f64> = beat_times.windows(2).map(|w| w[1] - w[0]).collect();
    periods.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = periods.len();
    if n % 2 == 0 {
        (periods[n / 2 - 1] + periods[n / 2]) * 0.5
    } else {
        periods[n / 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_tatum_grid;
    use crate::selection::score_grid;

    fn flat_novelty(extent: f64, hop: f64) -> TimeSeries {
        let n = (extent / hop) as usize + 1;
        let times: Vec<f64> = (0..n).map(|i| i as f64 * hop).collect();
        let values = vec![1.0; n];
        TimeSeries::new(times, values)
    }

    fn run(
        beats: &[f64],
        novelty: &TimeSeries,
        difficulty: Difficulty,
    ) -> SelectionOutcome {
        let grid = build_tatum_grid(beats);
        let scores = score_grid(&grid, novelty, 0.040);
        let profile = difficulty.profile();
        select_with_relaxation(&grid, &scores, beats, novelty, difficulty, &profile, 0.040)
    }

    #[test]
    fn test_score_quantile_interpolates() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        assert!((score_quantile(&values, 0.0) - 1.0).abs() < 1e-12);
        assert!((score_quantile(&values, 1.0) - 4.0).abs() < 1e-12);
        assert!((score_quantile(&values, 0.5) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_flat_novelty_normal_hits_target() {
        let beats = vec![0.0, 0.5, 1.0, 1.5, 2.0];
        let novelty = flat_novelty(2.2, 0.01);
        let outcome = run(&beats, &novelty, Difficulty::Normal);

        assert_eq!(outcome.target_count, 4);
        assert!(outcome.reached_target);
        assert_eq!(outcome.times.len(), 4);
    }

    #[test]
    fn test_spacing_floor_holds_after_relaxation() {
        // Novelty concentrated in one beat: forces deep relaxation on HARD
        let hop = 0.01;
        let n = 221;
        let times: Vec<f64> = (0..n).map(|i| i as f64 * hop).collect();
        let values: Vec<f64> = times
            .iter()
            .map(|&t| if t < 0.5 { 1.0 } else { 0.01 })
            .collect();
        let novelty = TimeSeries::new(times, values);

        let beats = vec![0.0, 0.5, 1.0, 1.5, 2.0];
        let outcome = run(&beats, &novelty, Difficulty::Hard);

        let beat_period = 0.5;
        let floor = Difficulty::Hard.profile().min_spacing_fraction
            * beat_period
            * SPACING_FLOOR_FRACTION;
        for w in outcome.times.windows(2) {
            assert!(
                w[1] - w[0] >= floor - 1e-9,
                "spacing {} below floor {}",
                w[1] - w[0],
                floor
            );
        }
    }

    #[test]
    fn test_never_exceeds_target() {
        let beats: Vec<f64> = (0..17).map(|i| i as f64 * 0.5).collect();
        let novelty = flat_novelty(8.2, 0.01);
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let outcome = run(&beats, &novelty, difficulty);
            assert!(
                outcome.times.len() <= outcome.target_count,
                "{:?}: {} > {}",
                difficulty,
                outcome.times.len(),
                outcome.target_count
            );
        }
    }

    #[test]
    fn test_easy_does_not_relax_phases() {
        // Spike only at a phase-9 tatum (0.375 into a 0.5 s beat); EASY allows
        // phases {0, 6} and must ignore the spike entirely.
        let hop = 0.005;
        let n = 441;
        let times: Vec<f64> = (0..n).map(|i| i as f64 * hop).collect();
        let values: Vec<f64> = times
            .iter()
            .map(|&t| {
                let in_beat = t % 0.5;
                if (in_beat - 0.375).abs() < 0.01 {
                    1.0
                } else {
                    0.05
                }
            })
            .collect();
        let novelty = TimeSeries::new(times, values);

        let beats = vec![0.0, 0.5, 1.0, 1.5, 2.0];
        let grid = build_tatum_grid(&beats);
        let scores = score_grid(&grid, &novelty, 0.040);
        let profile = Difficulty::Easy.profile();
        let outcome = select_with_relaxation(
            &grid,
            &scores,
            &beats,
            &novelty,
            Difficulty::Easy,
            &profile,
            0.0, // no snapping: keep grid times for phase inspection
        );

        assert_eq!(outcome.attempts, 1);
        for &t in &outcome.times {
            let in_beat = t % 0.5;
            let on_downbeat = in_beat < 1e-9 || (0.5 - in_beat) < 1e-9;
            let on_half = (in_beat - 0.25).abs() < 1e-9;
            assert!(
                on_downbeat || on_half,
                "EASY selected a non-{{0,6}} phase at t={}",
                t
            );
        }
    }

    #[test]
    fn test_clustered_novelty_forces_relaxation() {
        // Strong novelty only in the first 1.5 s of an 8-interval track: the
        // quantile threshold keeps only clustered candidates, the spacing
        // constraint caps how many of them fit, and the first attempt falls
        // short of the target.
        let hop = 0.01;
        let n = 411;
        let times: Vec<f64> = (0..n).map(|i| i as f64 * hop).collect();
        let values: Vec<f64> = times
            .iter()
            .map(|&t| if t < 1.5 { 1.0 } else { 0.05 })
            .collect();
        let novelty = TimeSeries::new(times, values);

        let beats: Vec<f64> = (0..9).map(|i| i as f64 * 0.5).collect();
        let outcome = run(&beats, &novelty, Difficulty::Normal);

        assert_eq!(outcome.target_count, 8);
        assert!(outcome.attempts > 1, "expected relaxation, got 1 attempt");
        assert!(!outcome.times.is_empty());
        assert!(outcome.times.len() <= outcome.target_count);
    }

    #[test]
    fn test_empty_grid_returns_empty() {
        let grid = build_tatum_grid(&[]);
        let novelty = flat_novelty(1.0, 0.01);
        let profile = Difficulty::Normal.profile();
        let outcome = select_with_relaxation(
            &grid,
            &[],
            &[],
            &novelty,
            Difficulty::Normal,
            &profile,
            0.040,
        );
        assert!(outcome.times.is_empty());
        assert!(!outcome.reached_target);
    }

    #[test]
    fn test_idempotent() {
        let beats = vec![0.0, 0.52, 1.01, 1.49, 2.03];
        let hop = 0.01;
        let times: Vec<f64> = (0..230).map(|i| i as f64 * hop).collect();
        let values: Vec<f64> = times.iter().map(|&t| (t * 7.3).sin().abs()).collect();
        let novelty = TimeSeries::new(times, values);

        let a = run(&beats, &novelty, Difficulty::Hard);
        let b = run(&beats, &novelty, Difficulty::Hard);
        assert_eq!(a.times, b.times);
        assert_eq!(a.attempts, b.attempts);
    }
}

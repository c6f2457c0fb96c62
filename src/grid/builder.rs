//! Tatum grid builder

use super::{TatumGrid, TATUM_COUNT};

/// Build the dense tatum grid for a beat timeline
///
/// Each consecutive beat pair `(b1, b2)` contributes `TATUM_COUNT` equally
/// spaced slots starting at `b1` with step `(b2 - b1) / TATUM_COUNT` and phase
/// indices `0..TATUM_COUNT`. One trailing phase-0 slot is appended at the
/// final beat so the last downbeat is itself a candidate.
///
/// # Arguments
///
/// * `beat_times` - Beat timestamps in seconds, strictly increasing
///
/// # Returns
///
/// The grid; empty when `beat_times` is empty.
pub fn build_tatum_grid(beat_times: &[f64]) -> TatumGrid {
    let n_intervals = beat_times.len().saturating_sub(1);
    let mut times = Vec::with_capacity(n_intervals * TATUM_COUNT + 1);
    let mut phases = Vec::with_capacity(n_intervals * TATUM_COUNT + 1);

    for w in beat_times.windows(2) {
        let (b1, b2) = (w[0], w[1]);
        let step = (b2 - b1) / TATUM_COUNT as f64;
        for p in 0..TATUM_COUNT {
            times.push(b1 + step * p as f64);
            phases.push(p);
        }
    }

    if let Some(&last) = beat_times.last() {
        times.push(last);
        phases.push(0);
    }

    log::debug!(
        "Built tatum grid: {} beats -> {} slots",
        beat_times.len(),
        times.len()
    );

    TatumGrid { times, phases }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_beats() {
        let grid = build_tatum_grid(&[]);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_single_beat_yields_single_downbeat() {
        let grid = build_tatum_grid(&[1.25]);
        assert_eq!(grid.times, vec![1.25]);
        assert_eq!(grid.phases, vec![0]);
    }

    #[test]
    fn test_slot_count_and_phases() {
        let beats = vec![0.0, 0.5, 1.0, 1.5, 2.0];
        let grid = build_tatum_grid(&beats);

        // 4 intervals * 12 slots + trailing downbeat
        assert_eq!(grid.len(), 4 * TATUM_COUNT + 1);
        assert_eq!(grid.phases[0], 0);
        assert_eq!(grid.phases[TATUM_COUNT], 0);
        assert_eq!(grid.phases[grid.len() - 1], 0);
        assert_eq!(grid.phases[1], 1);
        assert_eq!(grid.phases[TATUM_COUNT - 1], TATUM_COUNT - 1);
    }

    #[test]
    fn test_slot_spacing_within_interval() {
        let beats = vec![0.0, 0.6];
        let grid = build_tatum_grid(&beats);
        let step = 0.6 / TATUM_COUNT as f64;
        for (i, &t) in grid.times.iter().take(TATUM_COUNT).enumerate() {
            assert!((t - step * i as f64).abs() < 1e-12);
        }
        assert!((grid.times[TATUM_COUNT] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_times_non_decreasing() {
        let beats = vec![0.0, 0.48, 0.97, 1.52];
        let grid = build_tatum_grid(&beats);
        for w in grid.times.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }
}

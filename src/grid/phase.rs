//! Rhythmic phase accent weighting

use super::TATUM_COUNT;

/// Phase indices ordered strongest to weakest for relaxation
///
/// Downbeat, half, then quarters, then the remaining eighth/sixteenth slots.
/// The selector walks this table when expanding its allowed-phase set; it is a
/// fixed lookup, never re-derived, so selection stays deterministic.
pub const PHASE_EXPANSION_ORDER: [usize; TATUM_COUNT] = [0, 6, 3, 9, 2, 4, 8, 10, 1, 5, 7, 11];

/// Rhythmic accent weight for a phase index
///
/// A smooth cosine accent peaking at the downbeat, boosted by a fixed
/// multiplier for metrically strong positions. The multiplier tests run in
/// priority order (downbeat, half, quarter) so a slot receives only the
/// highest applicable boost.
pub fn phase_weight(phase: usize) -> f64 {
    let mut w = 1.0 + 0.5 * (2.0 * std::f64::consts::PI * phase as f64 / TATUM_COUNT as f64).cos();
    if phase % TATUM_COUNT == 0 {
        w *= 1.4;
    } else if phase % (TATUM_COUNT / 2) == 0 {
        w *= 1.2;
    } else if phase % (TATUM_COUNT / 4) == 0 {
        w *= 1.1;
    }
    w
}

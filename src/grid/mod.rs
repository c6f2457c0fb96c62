//! Tatum grid construction and rhythmic phase weighting
//!
//! The grid subdivides every inter-beat interval into `TATUM_COUNT` equal
//! slots, each tagged with a phase index encoding its rhythmic role
//! (downbeat, half, quarter, ...). Phase indices drive both the accent
//! weighting during scoring and the phase eligibility rules during selection.

pub mod builder;
pub mod phase;

pub use builder::build_tatum_grid;
pub use phase::{phase_weight, PHASE_EXPANSION_ORDER};

/// Number of tatum subdivisions per beat interval
pub const TATUM_COUNT: usize = 12;

/// Dense rhythmic grid over the beat timeline
///
/// Parallel arrays: `times[i]` is the slot time in seconds and `phases[i]` its
/// phase index in `[0, TATUM_COUNT)`. Phase 0 is the downbeat of its interval.
/// Times are monotonically non-decreasing across interval boundaries.
#[derive(Debug, Clone)]
pub struct TatumGrid {
    /// Slot times in seconds
    pub times: Vec<f64>,

    /// Phase index per slot
    pub phases: Vec<usize>,
}

impl TatumGrid {
    /// Number of grid points
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True if the grid has no points
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

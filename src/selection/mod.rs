//! Note selection engine
//!
//! Turns scored tatum grid points into the final note timeline:
//! - Local max-pooled salience scoring per grid point
//! - Greedy highest-score-first selection under a minimum-spacing constraint
//! - Bounded constraint relaxation toward the difficulty's target density
//! - Snap refinement of selected times onto true novelty peaks

pub mod scoring;
pub mod selector;
pub mod snap;

pub use scoring::score_grid;
pub use selector::select_with_relaxation;

/// A scored grid point eligible for selection
///
/// Ephemeral: produced per attempt from the grid and consumed entirely by the
/// greedy pass.
#[derive(Debug, Clone, Copy)]
pub struct CandidateNote {
    /// Candidate time in seconds
    pub time: f64,

    /// Salience score (local novelty max x phase weight)
    pub score: f64,
}

/// Result of one selection run, including relaxation diagnostics
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    /// Selected note times, snapped to novelty peaks and sorted ascending
    pub times: Vec<f64>,

    /// Target note count derived from the difficulty's density
    pub target_count: usize,

    /// True if the target count was reached
    pub reached_target: bool,

    /// Number of selection attempts performed
    pub attempts: usize,

    /// Quantile threshold in effect at termination
    pub final_quantile: f64,

    /// Spacing constraint in effect at termination, in seconds
    pub final_spacing: f64,

    /// Number of allowed phases at termination
    pub final_phase_count: usize,
}

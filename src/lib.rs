//! # Pulsemap
//!
//! An adaptive note-placement engine for rhythm game beatmaps, converting a
//! precomputed musical analysis (beat times, onset novelty, RMS energy) into
//! a discrete sequence of note hit times at a chosen difficulty.
//!
//! ## Features
//!
//! - **Tatum grid**: 12 rhythmic slots per beat interval with phase-indexed
//!   accent weighting
//! - **Salience scoring**: local median normalization, mild RMS re-weighting,
//!   and max-pooled novelty per grid slot
//! - **Adaptive selection**: greedy highest-score-first placement under a
//!   minimum-spacing constraint, with bounded constraint relaxation toward
//!   the difficulty's target density
//! - **Snap refinement**: selected times land on true local novelty peaks
//!
//! ## Quick Start
//!
//! ```no_run
//! use pulsemap::{generate_notes, Difficulty, GeneratorConfig, TimeSeries, TrackFeatures};
//!
//! // Features from your beat tracker / onset detector
//! let features = TrackFeatures {
//!     beat_times: vec![],
//!     onset: TimeSeries::new(vec![], vec![]),
//!     energy: None,
//! };
//!
//! let result = generate_notes(&features, Difficulty::Normal, &GeneratorConfig::default())?;
//! println!("{} notes ({:.2}/s)", result.notes.len(), result.metadata.notes_per_second);
//! # Ok::<(), pulsemap::GenerationError>(())
//! ```
//!
//! ## Architecture
//!
//! The pipeline is a single synchronous pass with strictly downstream
//! dataflow:
//!
//! ```text
//! Features -> Novelty Normalization -> Tatum Grid -> Scoring -> Selection -> Snap -> Notes
//! ```
//!
//! Waveform decoding, beat tracking, and onset extraction are upstream
//! collaborators; serialization of the returned notes is downstream.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod beatmap;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod features;
pub mod grid;
pub mod preprocessing;
pub mod selection;

// Re-export main types
pub use beatmap::{Beatmap, BeatmapResult, GenerationMetadata, Note};
pub use config::GeneratorConfig;
pub use difficulty::{Difficulty, DifficultyProfile};
pub use error::GenerationError;
pub use features::{TimeSeries, TrackFeatures};

/// Algorithm version tag carried in generation metadata
pub const ALGORITHM_VERSION: &str = "auto-map 0.1.0";

/// Generate the note timeline for a track
///
/// Runs the full pipeline: novelty normalization, tatum grid construction,
/// salience scoring, adaptive selection with relaxation, and snap refinement.
/// The returned notes are strictly ascending in time with no duplicates.
///
/// # Arguments
///
/// * `features` - Precomputed beat times, onset novelty, and optional energy
/// * `difficulty` - Difficulty level selecting the density/spacing profile
/// * `config` - Generator tunables (window widths, energy exponent)
///
/// # Returns
///
/// `BeatmapResult` with the ordered note list and generation diagnostics
///
/// # Errors
///
/// Returns `GenerationError` when the configuration or profile is degenerate
/// or the input features fail validation (see [`TrackFeatures::validate`]).
///
/// # Example
///
/// ```no_run
/// use pulsemap::{generate_notes, Difficulty, GeneratorConfig, TimeSeries, TrackFeatures};
///
/// let features = TrackFeatures {
///     beat_times: vec![0.0, 0.5, 1.0],
///     onset: TimeSeries::new(vec![0.0, 0.5, 1.0], vec![1.0, 0.2, 0.8]),
///     energy: None,
/// };
/// let result = generate_notes(&features, Difficulty::Easy, &GeneratorConfig::default())?;
/// # Ok::<(), pulsemap::GenerationError>(())
/// ```
pub fn generate_notes(
    features: &TrackFeatures,
    difficulty: Difficulty,
    config: &GeneratorConfig,
) -> Result<BeatmapResult, GenerationError> {
    config.validate()?;
    let profile = difficulty.profile();
    profile.validate()?;
    features.validate()?;

    log::debug!(
        "Generating notes: {} beats, {} onset samples, difficulty {}",
        features.beat_times.len(),
        features.onset.len(),
        difficulty.name()
    );

    // No grid can be built from fewer than two beats
    if features.beat_times.len() < 2 {
        return Ok(degenerate_result(features, &profile));
    }

    // Stage 1: novelty normalization
    let hop = features.onset.hop().ok_or_else(|| {
        GenerationError::InvalidInput(
            "Onset curve needs at least 2 samples to derive its hop".to_string(),
        )
    })?;
    let window = preprocessing::novelty::window_frames(config.median_window_sec, hop)?;
    let mut novelty_values =
        preprocessing::novelty::local_median_normalize(&features.onset.values, window);
    if let Some(energy) = &features.energy {
        preprocessing::energy::apply_energy_weighting(
            &mut novelty_values,
            &features.onset.times,
            energy,
            config.energy_exponent,
        );
    }
    let novelty = TimeSeries::new(features.onset.times.clone(), novelty_values);

    // Stage 2: dense tatum grid
    let grid = grid::build_tatum_grid(&features.beat_times);

    // Stage 3: per-slot salience scores
    let scores = selection::score_grid(&grid, &novelty, config.score_window_sec);

    // Stages 4-5: adaptive selection and snap refinement
    let outcome = selection::select_with_relaxation(
        &grid,
        &scores,
        &features.beat_times,
        &novelty,
        difficulty,
        &profile,
        config.snap_window_sec,
    );

    // Rounding to 6 decimals can only collide for times closer than the
    // spacing floor allows; dedup keeps the output strictly ascending anyway.
    let mut notes: Vec<Note> = outcome.times.iter().map(|&t| Note::at(t)).collect();
    notes.dedup_by(|a, b| a.hit_time == b.hit_time);

    let extent = features.extent();
    let notes_per_second = if extent > 0.0 {
        notes.len() as f64 / extent
    } else {
        0.0
    };

    log::info!(
        "Generated {} notes ({}, {:.2} notes/sec, target {})",
        notes.len(),
        difficulty.name(),
        notes_per_second,
        outcome.target_count
    );

    Ok(BeatmapResult {
        metadata: GenerationMetadata {
            note_count: notes.len(),
            target_count: outcome.target_count,
            reached_target: outcome.reached_target,
            relaxation_attempts: outcome.attempts,
            final_quantile: outcome.final_quantile,
            final_spacing: outcome.final_spacing,
            final_phase_count: outcome.final_phase_count,
            beat_period: features.median_beat_period(),
            notes_per_second,
            algorithm_version: ALGORITHM_VERSION.to_string(),
        },
        notes,
    })
}

/// Result for tracks where no grid can be built (< 2 beats)
///
/// No beats at all yields no notes; a single beat on a non-empty track gets
/// one fallback note at time 0 so the chart is playable.
fn degenerate_result(features: &TrackFeatures, profile: &DifficultyProfile) -> BeatmapResult {
    let extent = features.extent();
    let notes = if !features.beat_times.is_empty() && extent > 0.0 {
        vec![Note::at(0.0)]
    } else {
        Vec::new()
    };

    log::debug!(
        "Degenerate input: {} beats, extent {:.3} s -> {} fallback notes",
        features.beat_times.len(),
        extent,
        notes.len()
    );

    let notes_per_second = if extent > 0.0 {
        notes.len() as f64 / extent
    } else {
        0.0
    };

    BeatmapResult {
        metadata: GenerationMetadata {
            note_count: notes.len(),
            target_count: notes.len(),
            reached_target: true,
            relaxation_attempts: 0,
            final_quantile: profile.base_quantile,
            final_spacing: 0.0,
            final_phase_count: profile.allowed_phases.len(),
            beat_period: features.median_beat_period(),
            notes_per_second,
            algorithm_version: ALGORITHM_VERSION.to_string(),
        },
        notes,
    }
}

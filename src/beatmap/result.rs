//! Generation result types

use serde::{Deserialize, Serialize};

/// A single note in the beatmap
///
/// Hit times carry 6 decimal digits (microsecond resolution). The note type
/// is a single tap note (0) and spawn points are assigned by the host game,
/// so the spawn index is always emitted as -1 here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Hit time in seconds, rounded to 6 decimals
    #[serde(rename = "hitTime")]
    pub hit_time: f64,

    /// Note type tag (always 0: single tap)
    #[serde(rename = "type")]
    pub note_type: i32,

    /// Spawn point index (always -1: assigned downstream)
    #[serde(rename = "spawnPointIndex")]
    pub spawn_point_index: i32,
}

impl Note {
    /// Create a tap note at the given time, rounding to 6 decimals
    pub fn at(hit_time: f64) -> Self {
        Self {
            hit_time: round6(hit_time),
            note_type: 0,
            spawn_point_index: -1,
        }
    }
}

/// Round a time to 6 decimal digits
pub(crate) fn round6(t: f64) -> f64 {
    (t * 1e6).round() / 1e6
}

/// Complete beatmap document for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beatmap {
    /// Path or identifier of the music track
    #[serde(rename = "musicTrack")]
    pub music_track: String,

    /// Note approach time in seconds
    #[serde(rename = "approachTime")]
    pub approach_time: f64,

    /// Ordered note list
    pub notes: Vec<Note>,
}

impl Beatmap {
    /// Package a note list into a beatmap document
    pub fn new(music_track: impl Into<String>, approach_time: f64, notes: Vec<Note>) -> Self {
        Self {
            music_track: music_track.into(),
            approach_time,
            notes,
        }
    }
}

/// Diagnostics describing one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Number of notes produced
    pub note_count: usize,

    /// Target note count derived from the difficulty's density
    pub target_count: usize,

    /// True if the target count was reached
    pub reached_target: bool,

    /// Selection attempts performed (1 = no relaxation needed)
    pub relaxation_attempts: usize,

    /// Quantile threshold in effect at termination
    pub final_quantile: f64,

    /// Spacing constraint in effect at termination, in seconds
    pub final_spacing: f64,

    /// Allowed phases at termination
    pub final_phase_count: usize,

    /// Median beat period in seconds
    pub beat_period: f64,

    /// Notes per second over the analyzed extent (0 for empty tracks)
    pub notes_per_second: f64,

    /// Algorithm version
    pub algorithm_version: String,
}

/// Notes plus generation diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeatmapResult {
    /// Ordered note list
    pub notes: Vec<Note>,

    /// Generation metadata
    pub metadata: GenerationMetadata,
}

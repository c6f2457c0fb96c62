//! Difficulty levels and their selection profiles
//!
//! Each difficulty fixes a target note density, a minimum spacing between
//! notes, the set of rhythmic phases eligible before relaxation, and a base
//! score-quantile threshold. Density rises and spacing/threshold fall
//! monotonically from EASY to HARD.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::grid::TATUM_COUNT;

/// Difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Sparse notes on downbeats and half-beats only; never relaxes
    Easy,
    /// One note per beat on quarter-beat phases
    Normal,
    /// Two notes per beat, all tatum phases eligible
    Hard,
}

impl Difficulty {
    /// Selection profile for this difficulty
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                target_notes_per_beat: 0.50,
                min_spacing_fraction: 0.60,
                allowed_phases: &[0, 6],
                base_quantile: 0.80,
            },
            Difficulty::Normal => DifficultyProfile {
                target_notes_per_beat: 1.00,
                min_spacing_fraction: 0.35,
                allowed_phases: &[0, 3, 6, 9],
                base_quantile: 0.65,
            },
            Difficulty::Hard => DifficultyProfile {
                target_notes_per_beat: 2.00,
                min_spacing_fraction: 0.20,
                allowed_phases: &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
                base_quantile: 0.45,
            },
        }
    }

    /// Whether the relaxation loop may loosen constraints for this difficulty
    ///
    /// EASY charts stay sparse by design: when the target count cannot be met
    /// the engine returns fewer notes instead of admitting weaker phases.
    pub fn relaxes(&self) -> bool {
        !matches!(self, Difficulty::Easy)
    }

    /// Difficulty name as used in configuration and tooling
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
        }
    }
}

impl FromStr for Difficulty {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EASY" => Ok(Difficulty::Easy),
            "NORMAL" => Ok(Difficulty::Normal),
            "HARD" => Ok(Difficulty::Hard),
            other => Err(GenerationError::ConfigurationError(format!(
                "Unknown difficulty: {}",
                other
            ))),
        }
    }
}

/// Selection parameters for one difficulty level
#[derive(Debug, Clone)]
pub struct DifficultyProfile {
    /// Target note density in notes per beat interval
    pub target_notes_per_beat: f64,

    /// Minimum spacing between notes as a fraction of the median beat period
    pub min_spacing_fraction: f64,

    /// Tatum phases eligible before any relaxation
    pub allowed_phases: &'static [usize],

    /// Base score-quantile threshold for candidate filtering
    pub base_quantile: f64,
}

impl DifficultyProfile {
    /// Validate the profile
    ///
    /// Degenerate profiles are rejected here so the selector never has to
    /// discover them mid-selection.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::ConfigurationError` if the target density or
    /// spacing fraction is non-positive, the phase set is empty or contains an
    /// out-of-range index, or the quantile lies outside (0, 1].
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.target_notes_per_beat <= 0.0 || !self.target_notes_per_beat.is_finite() {
            return Err(GenerationError::ConfigurationError(format!(
                "target_notes_per_beat must be positive, got {}",
                self.target_notes_per_beat
            )));
        }
        if self.min_spacing_fraction <= 0.0 || !self.min_spacing_fraction.is_finite() {
            return Err(GenerationError::ConfigurationError(format!(
                "min_spacing_fraction must be positive, got {}",
                self.min_spacing_fraction
            )));
        }
        if self.allowed_phases.is_empty() {
            return Err(GenerationError::ConfigurationError(
                "allowed_phases must not be empty".to_string(),
            ));
        }
        if let Some(&p) = self.allowed_phases.iter().find(|&&p| p >= TATUM_COUNT) {
            return Err(GenerationError::ConfigurationError(format!(
                "phase index {} out of range (tatum count {})",
                p, TATUM_COUNT
            )));
        }
        if self.base_quantile <= 0.0 || self.base_quantile > 1.0 {
            return Err(GenerationError::ConfigurationError(format!(
                "base_quantile must be in (0, 1], got {}",
                self.base_quantile
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_profiles_are_valid() {
        for diff in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert!(diff.profile().validate().is_ok(), "{:?}", diff);
        }
    }

    #[test]
    fn test_density_monotone_spacing_antitone() {
        let easy = Difficulty::Easy.profile();
        let normal = Difficulty::Normal.profile();
        let hard = Difficulty::Hard.profile();

        assert!(easy.target_notes_per_beat < normal.target_notes_per_beat);
        assert!(normal.target_notes_per_beat < hard.target_notes_per_beat);

        assert!(easy.min_spacing_fraction > normal.min_spacing_fraction);
        assert!(normal.min_spacing_fraction > hard.min_spacing_fraction);

        assert!(easy.base_quantile > normal.base_quantile);
        assert!(normal.base_quantile > hard.base_quantile);
    }

    #[test]
    fn test_only_easy_skips_relaxation() {
        assert!(!Difficulty::Easy.relaxes());
        assert!(Difficulty::Normal.relaxes());
        assert!(Difficulty::Hard.relaxes());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("NORMAL".parse::<Difficulty>().unwrap(), Difficulty::Normal);
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("EXPERT".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_rejects_degenerate_profiles() {
        let mut profile = Difficulty::Normal.profile();
        profile.target_notes_per_beat = 0.0;
        assert!(profile.validate().is_err());

        let mut profile = Difficulty::Normal.profile();
        profile.allowed_phases = &[];
        assert!(profile.validate().is_err());

        let mut profile = Difficulty::Normal.profile();
        profile.allowed_phases = &[0, 12];
        assert!(profile.validate().is_err());

        let mut profile = Difficulty::Normal.profile();
        profile.base_quantile = 1.5;
        assert!(profile.validate().is_err());
    }
}

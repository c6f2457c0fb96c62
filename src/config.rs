//! Configuration parameters for beatmap generation

use crate::error::GenerationError;

/// Generator configuration parameters
///
/// The defaults are the empirically tuned values of the reference tool; they
/// are safe for typical popular music and only need adjustment for unusually
/// slow or dense material.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Sliding-median normalization window in seconds (default: 0.5)
    ///
    /// Converted to an odd number of novelty frames using the curve's hop.
    /// Larger windows flatten longer-term loudness trends.
    pub median_window_sec: f64,

    /// Half-window for local max-pooling when scoring grid points, in seconds
    /// (default: 0.040)
    pub score_window_sec: f64,

    /// Half-window for snapping selected times to novelty peaks, in seconds
    /// (default: 0.040)
    pub snap_window_sec: f64,

    /// Exponent for RMS energy re-weighting (default: 0.3)
    ///
    /// 0.0 disables re-weighting entirely; 0.3 is mild enough to favor
    /// percussive events without muting quiet passages.
    pub energy_exponent: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            median_window_sec: 0.5,
            score_window_sec: 0.040,
            snap_window_sec: 0.040,
            energy_exponent: 0.3,
        }
    }
}

impl GeneratorConfig {
    /// Validate configuration parameters
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::ConfigurationError` if any window width is
    /// non-positive or the energy exponent is negative.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.median_window_sec <= 0.0 || !self.median_window_sec.is_finite() {
            return Err(GenerationError::ConfigurationError(format!(
                "median_window_sec must be positive, got {}",
                self.median_window_sec
            )));
        }
        if self.score_window_sec <= 0.0 || !self.score_window_sec.is_finite() {
            return Err(GenerationError::ConfigurationError(format!(
                "score_window_sec must be positive, got {}",
                self.score_window_sec
            )));
        }
        if self.snap_window_sec <= 0.0 || !self.snap_window_sec.is_finite() {
            return Err(GenerationError::ConfigurationError(format!(
                "snap_window_sec must be positive, got {}",
                self.snap_window_sec
            )));
        }
        if self.energy_exponent < 0.0 || !self.energy_exponent.is_finite() {
            return Err(GenerationError::ConfigurationError(format!(
                "energy_exponent must be non-negative, got {}",
                self.energy_exponent
            )));
        }
        Ok(())
    }
}

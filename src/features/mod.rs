//! Input feature model
//!
//! The engine consumes a precomputed musical analysis rather than audio:
//! - Beat timestamps from a beat tracker
//! - An onset-strength (novelty) curve, pre-normalized to [0, 1]
//! - An optional RMS energy curve for loudness re-weighting
//!
//! All curves are uniformly hopped time series. Validation lives here so the
//! pipeline stages can assume monotonic timestamps and matched array lengths.

use crate::error::GenerationError;

/// A sampled curve: paired timestamps and values
///
/// Timestamps are seconds, strictly increasing, sampled on a uniform
/// hop-derived grid. Values and times always have the same length.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    /// Sample timestamps in seconds
    pub times: Vec<f64>,

    /// Sample values
    pub values: Vec<f64>,
}

impl TimeSeries {
    /// Create a time series from paired arrays
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Self {
        Self { times, values }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True if the series has no samples
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Median spacing between consecutive timestamps, in seconds
    ///
    /// Returns `None` for series with fewer than 2 samples.
    pub fn hop(&self) -> Option<f64> {
        if self.times.len() < 2 {
            return None;
        }
        let mut diffs: Vec<f64> = self.times.windows(2).map(|w| w[1] - w[0]).collect();
        Some(median_in_place(&mut diffs))
    }

    fn validate(&self, name: &str) -> Result<(), GenerationError> {
        if self.times.len() != self.values.len() {
            return Err(GenerationError::InvalidInput(format!(
                "{} curve has {} timestamps but {} values",
                name,
                self.times.len(),
                self.values.len()
            )));
        }
        for w in self.times.windows(2) {
            if w[1] <= w[0] {
                return Err(GenerationError::InvalidInput(format!(
                    "{} curve timestamps must be strictly increasing ({} -> {})",
                    name, w[0], w[1]
                )));
            }
        }
        Ok(())
    }
}

/// Precomputed features for one track
#[derive(Debug, Clone)]
pub struct TrackFeatures {
    /// Beat timestamps in seconds, strictly increasing
    pub beat_times: Vec<f64>,

    /// Onset-strength (novelty) curve, values in [0, 1]
    pub onset: TimeSeries,

    /// RMS energy curve; `None` skips energy re-weighting
    pub energy: Option<TimeSeries>,
}

impl TrackFeatures {
    /// Validate the feature bundle
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidInput` if beat times or curve
    /// timestamps are not strictly increasing, curve arrays have mismatched
    /// lengths, or the onset curve is empty while two or more beats exist.
    pub fn validate(&self) -> Result<(), GenerationError> {
        for w in self.beat_times.windows(2) {
            if w[1] <= w[0] {
                return Err(GenerationError::InvalidInput(format!(
                    "Beat times must be strictly increasing ({} -> {})",
                    w[0], w[1]
                )));
            }
        }

        self.onset.validate("onset")?;
        if let Some(energy) = &self.energy {
            energy.validate("energy")?;
        }

        if self.beat_times.len() >= 2 && self.onset.is_empty() {
            return Err(GenerationError::InvalidInput(
                "Onset curve is empty but beats are present".to_string(),
            ));
        }

        Ok(())
    }

    /// Median beat period in seconds
    ///
    /// Falls back to 0.5 s (120 BPM) when fewer than two beats exist, matching
    /// the reference tool's tempo baseline.
    pub fn median_beat_period(&self) -> f64 {
        if self.beat_times.len() < 2 {
            return 0.5;
        }
        let mut periods: Vec<f64> = self.beat_times.windows(2).map(|w| w[1] - w[0]).collect();
        median_in_place(&mut periods)
    }

    /// Analyzed extent of the track in seconds
    ///
    /// The core never sees the audio, so the last onset timestamp stands in
    /// for track duration.
    pub fn extent(&self) -> f64 {
        self.onset.times.last().copied().unwrap_or(0.0)
    }
}

/// Median of a non-empty slice, sorting it in place
fn median_in_place(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n % 2 == 0 {
        (values[n / 2 - 1] + values[n / 2]) * 0.5
    } else {
        values[n / 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_series(n: usize, hop: f64, value: f64) -> TimeSeries {
        let times: Vec<f64> = (0..n).map(|i| i as f64 * hop).collect();
        let values = vec![value; n];
        TimeSeries::new(times, values)
    }

    #[test]
    fn test_hop_uniform() {
        let series = uniform_series(100, 0.01, 1.0);
        let hop = series.hop().unwrap();
        assert!((hop - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_hop_too_short() {
        assert!(uniform_series(1, 0.01, 1.0).hop().is_none());
        assert!(uniform_series(0, 0.01, 1.0).hop().is_none());
    }

    #[test]
    fn test_validate_accepts_wellformed() {
        let features = TrackFeatures {
            beat_times: vec![0.0, 0.5, 1.0],
            onset: uniform_series(100, 0.0116, 0.5),
            energy: Some(uniform_series(100, 0.0116, 0.8)),
        };
        assert!(features.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_increasing_beats() {
        let features = TrackFeatures {
            beat_times: vec![0.0, 0.5, 0.5],
            onset: uniform_series(100, 0.0116, 0.5),
            energy: None,
        };
        assert!(features.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_mismatched_curve() {
        let mut onset = uniform_series(100, 0.0116, 0.5);
        onset.values.pop();
        let features = TrackFeatures {
            beat_times: vec![0.0, 0.5],
            onset,
            energy: None,
        };
        assert!(features.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_onset_with_beats() {
        let features = TrackFeatures {
            beat_times: vec![0.0, 0.5],
            onset: TimeSeries::new(vec![], vec![]),
            energy: None,
        };
        assert!(features.validate().is_err());
    }

    #[test]
    fn test_median_beat_period() {
        let features = TrackFeatures {
            beat_times: vec![0.0, 0.5, 1.0, 1.6],
            onset: uniform_series(10, 0.0116, 0.5),
            energy: None,
        };
        // periods [0.5, 0.5, 0.6] -> median 0.5
        assert!((features.median_beat_period() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_median_beat_period_fallback() {
        let features = TrackFeatures {
            beat_times: vec![1.0],
            onset: uniform_series(10, 0.0116, 0.5),
            energy: None,
        };
        assert!((features.median_beat_period() - 0.5).abs() < 1e-12);
    }
}

//! Local sliding-median normalization of the onset-strength curve
//!
//! Dividing each sample by the median of a centered window flattens slow
//! loudness trends, so a uniformly loud or quiet section does not globally
//! bias note selection. The window is edge-replicated before sweeping, which
//! keeps the output the same length as the input.

use crate::error::GenerationError;

/// Numerical stability epsilon for the median divisor
const EPSILON: f64 = 1e-6;

/// Normalize a novelty curve by its local sliding median
///
/// For each sample, computes the median of a centered window of `window_frames`
/// samples (forced to the nearest odd length >= 1) over an edge-replicated
/// copy of the curve, then divides the raw value by `EPSILON + median` and
/// clips the result to >= 0.
///
/// # Arguments
///
/// * `raw` - Raw onset-strength values
/// * `window_frames` - Window length in frames (will be rounded and made odd)
///
/// # Returns
///
/// Normalized curve with the same length as `raw`
pub fn local_median_normalize(raw: &[f64], window_frames: f64) -> Vec<f64> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut win = (window_frames.round() as usize).max(1);
    if win % 2 == 0 {
        win += 1;
    }
    let pad = win / 2;

    log::debug!(
        "Local median normalization: {} samples, window {} frames",
        raw.len(),
        win
    );

    // Edge-replicated padded copy so every position has a full window
    let mut padded = Vec::with_capacity(raw.len() + 2 * pad);
    padded.extend(std::iter::repeat(raw[0]).take(pad));
    padded.extend_from_slice(raw);
    padded.extend(std::iter::repeat(raw[raw.len() - 1]).take(pad));

    let mut scratch = vec![0.0f64; win];
    let mut out = Vec::with_capacity(raw.len());

    for i in 0..raw.len() {
        scratch.copy_from_slice(&padded[i..i + win]);
        let med = median_of(&mut scratch);
        out.push((raw[i] / (EPSILON + med)).max(0.0));
    }

    out
}

/// Derive the normalization window length in frames from a real-time duration
///
/// # Arguments
///
/// * `window_sec` - Window duration in seconds
/// * `hop_sec` - Curve sample spacing in seconds
///
/// # Errors
///
/// Returns `GenerationError::InvalidInput` if the hop is non-positive.
pub fn window_frames(window_sec: f64, hop_sec: f64) -> Result<f64, GenerationError> {
    if hop_sec <= 0.0 || !hop_sec.is_finite() {
        return Err(GenerationError::InvalidInput(format!(
            "Curve hop must be positive, got {}",
            hop_sec
        )));
    }
    Ok(window_sec / hop_sec)
}

/// Median of a non-empty slice, sorting it in place
fn median_of(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n % 2 == 0 {
        (values[n / 2 - 1] + values[n / 2]) * 0.5
    } else {
        values[n / 2]
    }
}

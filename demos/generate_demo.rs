//! Example: Generate a beatmap from synthetic track features
//!
//! This example builds a simple 120 BPM click-track analysis in memory,
//! generates notes at the requested difficulty, and prints the beatmap JSON.
//!
//! Usage: `cargo run --example generate_demo [EASY|NORMAL|HARD]`

use pulsemap::{generate_notes, Beatmap, Difficulty, GeneratorConfig, TimeSeries, TrackFeatures};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let difficulty: Difficulty = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "NORMAL".to_string())
        .parse()?;

    // Synthetic 120 BPM track: 30 seconds, onset peaks on every beat and
    // softer peaks on the off-beats
    let duration = 30.0;
    let beat_times: Vec<f64> = (0..=60).map(|i| i as f64 * 0.5).collect();
    let hop = 512.0 / 44_100.0;
    let n = (duration / hop) as usize;
    let times: Vec<f64> = (0..n).map(|i| i as f64 * hop).collect();
    let values: Vec<f64> = times
        .iter()
        .map(|&t| {
            let beat_phase = (t / 0.5).fract();
            if beat_phase < 0.05 {
                1.0
            } else if (beat_phase - 0.5).abs() < 0.05 {
                0.6
            } else {
                0.1
            }
        })
        .collect();
    let energy_values: Vec<f64> = times.iter().map(|&t| 0.6 + 0.3 * (t * 0.4).sin()).collect();

    let features = TrackFeatures {
        beat_times,
        onset: TimeSeries::new(times.clone(), values),
        energy: Some(TimeSeries::new(times, energy_values)),
    };

    // Generate
    let config = GeneratorConfig::default();
    let result = generate_notes(&features, difficulty, &config)?;

    // Print results
    eprintln!("Generation Results:");
    eprintln!(
        "  Notes: {} (target {}, reached: {})",
        result.metadata.note_count, result.metadata.target_count, result.metadata.reached_target
    );
    eprintln!(
        "  Density: {:.2} notes/sec over a {:.2} s beat period",
        result.metadata.notes_per_second, result.metadata.beat_period
    );
    eprintln!(
        "  Relaxation: {} attempts, final quantile {:.2}, final spacing {:.3} s",
        result.metadata.relaxation_attempts,
        result.metadata.final_quantile,
        result.metadata.final_spacing
    );

    let beatmap = Beatmap::new("synthetic_click.wav", 1.0, result.notes);
    println!("{}", serde_json::to_string_pretty(&beatmap)?);

    Ok(())
}

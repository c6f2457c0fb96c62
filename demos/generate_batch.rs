//! Example: Generate beatmaps for every difficulty in one pass
//!
//! Builds one synthetic track analysis and writes a beatmap JSON file per
//! difficulty into the given output directory (default: `beatmaps_out`).
//!
//! Usage: `cargo run --example generate_batch [OUT_DIR]`

use std::fs;
use std::path::PathBuf;

use pulsemap::{generate_notes, Beatmap, Difficulty, GeneratorConfig, TimeSeries, TrackFeatures};

fn synthetic_features(duration: f64) -> TrackFeatures {
    let beat_times: Vec<f64> = (0..)
        .map(|i| i as f64 * 0.5)
        .take_while(|&t| t <= duration)
        .collect();
    let hop = 512.0 / 44_100.0;
    let n = (duration / hop) as usize;
    let times: Vec<f64> = (0..n).map(|i| i as f64 * hop).collect();
    let values: Vec<f64> = times
        .iter()
        .map(|&t| 0.15 + 0.85 * (t * 8.3).sin().abs() * (t * 2.9).cos().abs())
        .collect();
    let energy_values: Vec<f64> = times.iter().map(|&t| 0.5 + 0.4 * (t * 0.6).sin()).collect();

    TrackFeatures {
        beat_times,
        onset: TimeSeries::new(times.clone(), values),
        energy: Some(TimeSeries::new(times, energy_values)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let out_dir = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "beatmaps_out".to_string()),
    );
    fs::create_dir_all(&out_dir)?;

    let features = synthetic_features(60.0);
    let config = GeneratorConfig::default();

    for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
        let result = generate_notes(&features, difficulty, &config)?;
        println!(
            "{:<6} {:>4} notes (target {:>4}, {:.2}/s, {} attempts)",
            difficulty.name(),
            result.metadata.note_count,
            result.metadata.target_count,
            result.metadata.notes_per_second,
            result.metadata.relaxation_attempts
        );

        let beatmap = Beatmap::new("synthetic_track.wav", 1.0, result.notes);
        let path = out_dir.join(format!("{}.json", difficulty.name().to_ascii_lowercase()));
        fs::write(&path, serde_json::to_string_pretty(&beatmap)?)?;
    }

    println!("Wrote beatmaps to {}", out_dir.display());
    Ok(())
}

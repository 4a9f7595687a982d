//! Assess a synthetic track and print the full result as JSON
//!
//! Run with `cargo run --example assess_track`. Set `RUST_LOG=debug` to see
//! the per-stage analysis logs.

use hitscope::{assess_track, AudioBuffer, EngineConfig, EngineError, ScoringContext};

/// A 10-second pulsed A4 tone, enough to exercise every analyzer
fn synthetic_track(sample_rate: u32) -> Vec<f32> {
    let n = (sample_rate * 10) as usize;
    (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let envelope = 0.5 + 0.5 * (2.0 * std::f32::consts::PI * 2.0 * t).sin();
            envelope * (2.0 * std::f32::consts::PI * 440.0 * t).sin()
        })
        .collect()
}

fn main() -> Result<(), EngineError> {
    env_logger::init();

    let samples = synthetic_track(44100);
    let buffer = AudioBuffer::new(&samples, 44100, 1);

    let context = ScoringContext {
        genre: Some("Pop".to_string()),
        ..ScoringContext::default()
    };

    let result = assess_track(&buffer, &context, &EngineConfig::default())?;

    println!(
        "Overall: {:.0}/100 (confidence {:.2}, risk {:?})",
        result.overall_score, result.confidence, result.risk.overall_risk
    );
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize result: {}", e),
    }

    Ok(())
}

//! Temporal analysis
//!
//! Onset-threshold tempo estimation plus loudness statistics, computed
//! directly from the PCM waveform with no dependency on the spectral path:
//!
//! 1. Onsets: rising-edge crossings of a fixed amplitude threshold
//! 2. Tempo: 60 * sample_rate / mean inter-onset interval, clamped
//! 3. Rhythm strength: scaled sample variance
//! 4. Beat confidence: fraction of inter-onset intervals near the
//!    tempo-implied expected interval
//! 5. RMS, crest factor and frame-RMS dynamic range

use crate::error::EngineError;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Default tempo when fewer than two onsets are found
const DEFAULT_BPM: f32 = 120.0;

/// Dynamic-range floor in dB (also the silence value)
const DYNAMIC_RANGE_FLOOR_DB: f32 = -60.0;

/// Temporal summary for a whole buffer
#[derive(Debug, Clone)]
pub struct TemporalSummary {
    /// Estimated tempo in BPM, clamped to the configured range
    pub tempo_bpm: f32,

    /// Rhythm strength in [0, 1]
    pub rhythm_strength: f32,

    /// Beat confidence in [0, 1]
    pub beat_confidence: f32,

    /// Onset positions in samples, sorted by time
    pub onsets: Vec<usize>,

    /// Root-mean-square level of the buffer (0 for silence)
    pub rms: f32,

    /// Dynamic range in dB: quietest over loudest frame RMS, in [-60, 0]
    /// (-60 for silence)
    pub dynamic_range_db: f32,

    /// Peak-to-RMS ratio (0 when RMS is 0)
    pub crest_factor: f32,
}

/// Detect onsets as rising-edge crossings of `threshold`
///
/// An onset is recorded at index `i` when `samples[i-1] <= threshold` and
/// `samples[i] > threshold`. Returns sample indices sorted by time.
pub fn detect_onsets(samples: &[f32], threshold: f32) -> Vec<usize> {
    let mut onsets = Vec::new();
    for i in 1..samples.len() {
        if samples[i - 1] <= threshold && samples[i] > threshold {
            onsets.push(i);
        }
    }
    onsets
}

/// Estimate tempo from the mean inter-onset interval
///
/// `tempo = 60 * sample_rate / mean_ioi`, clamped to `[min_bpm, max_bpm]`.
/// Fewer than two onsets yield the 120 BPM default.
pub fn estimate_tempo(onsets: &[usize], sample_rate: u32, min_bpm: f32, max_bpm: f32) -> f32 {
    if onsets.len() < 2 {
        return DEFAULT_BPM.clamp(min_bpm, max_bpm);
    }

    let total: usize = onsets.windows(2).map(|w| w[1] - w[0]).sum();
    let mean_interval = total as f32 / (onsets.len() - 1) as f32;
    if mean_interval <= EPSILON {
        return DEFAULT_BPM.clamp(min_bpm, max_bpm);
    }

    (60.0 * sample_rate as f32 / mean_interval).clamp(min_bpm, max_bpm)
}

/// Rhythm strength: `min(1, 10 * variance(samples))`
pub fn rhythm_strength(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let mean = samples.iter().sum::<f32>() / samples.len() as f32;
    let variance = samples.iter().map(|&s| (s - mean) * (s - mean)).sum::<f32>()
        / samples.len() as f32;

    (10.0 * variance).min(1.0)
}

/// Beat confidence: fraction of inter-onset intervals within 20% of the
/// tempo-implied expected interval
///
/// Returns 0 with fewer than two onsets.
pub fn beat_confidence(onsets: &[usize], tempo_bpm: f32, sample_rate: u32) -> f32 {
    if onsets.len() < 2 || tempo_bpm <= EPSILON {
        return 0.0;
    }

    let expected = 60.0 * sample_rate as f32 / tempo_bpm;
    let tolerance = expected * 0.2;

    let n_intervals = onsets.len() - 1;
    let aligned = onsets
        .windows(2)
        .filter(|w| ((w[1] - w[0]) as f32 - expected).abs() <= tolerance)
        .count();

    aligned as f32 / n_intervals as f32
}

/// Analyze the temporal content of a PCM buffer
///
/// # Arguments
///
/// * `samples` - Mono PCM samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz
/// * `onset_threshold` - Rising-edge amplitude threshold (typically 0.1)
/// * `min_bpm` / `max_bpm` - Tempo clamp range
/// * `frame_size` / `hop_size` - Frame grid for the dynamic-range measure
///
/// # Errors
///
/// Returns `EngineError::InvalidInput` for a zero sample rate or frame grid.
pub fn analyze_temporal(
    samples: &[f32],
    sample_rate: u32,
    onset_threshold: f32,
    min_bpm: f32,
    max_bpm: f32,
    frame_size: usize,
    hop_size: usize,
) -> Result<TemporalSummary, EngineError> {
    if sample_rate == 0 {
        return Err(EngineError::InvalidInput("Invalid sample rate".to_string()));
    }
    if frame_size == 0 || hop_size == 0 {
        return Err(EngineError::InvalidInput(
            "Frame and hop sizes must be > 0".to_string(),
        ));
    }

    let onsets = detect_onsets(samples, onset_threshold);
    let tempo_bpm = estimate_tempo(&onsets, sample_rate, min_bpm, max_bpm);
    let rhythm = rhythm_strength(samples);
    let confidence = beat_confidence(&onsets, tempo_bpm, sample_rate);

    log::debug!(
        "Temporal analysis: {} onsets, tempo {:.1} BPM, confidence {:.2}",
        onsets.len(),
        tempo_bpm,
        confidence
    );

    let rms = root_mean_square(samples);
    let peak = samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    let crest_factor = if rms <= EPSILON { 0.0 } else { peak / rms };
    let dynamic_range_db = frame_dynamic_range_db(samples, frame_size, hop_size);

    Ok(TemporalSummary {
        tempo_bpm,
        rhythm_strength: rhythm,
        beat_confidence: confidence,
        onsets,
        rms,
        dynamic_range_db,
        crest_factor,
    })
}

/// RMS level of the buffer (0 for empty input)
pub fn root_mean_square(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|&s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

/// Dynamic range as the dB ratio of the quietest to the loudest frame RMS
///
/// Computed over the same frame grid as the spectral analysis and clamped
/// to [-60, 0]. Silence (no frame above the epsilon floor) reports -60.
fn frame_dynamic_range_db(samples: &[f32], frame_size: usize, hop_size: usize) -> f32 {
    let mut min_rms = f32::MAX;
    let mut max_rms = 0.0f32;

    let mut start = 0;
    while start + frame_size <= samples.len() {
        let rms = root_mean_square(&samples[start..start + frame_size]);
        min_rms = min_rms.min(rms);
        max_rms = max_rms.max(rms);
        start += hop_size;
    }

    // Short input: treat the whole buffer as one frame
    if max_rms == 0.0 && min_rms == f32::MAX {
        let rms = root_mean_square(samples);
        min_rms = rms;
        max_rms = rms;
    }

    if max_rms <= EPSILON {
        return DYNAMIC_RANGE_FLOOR_DB;
    }

    (20.0 * ((min_rms + EPSILON) / (max_rms + EPSILON)).log10())
        .clamp(DYNAMIC_RANGE_FLOOR_DB, 0.0)
}

//! Tonal analysis
//!
//! Folds the mean magnitude spectrum into a 12-bin chromagram, detects the
//! key as the strongest pitch class, decides major/minor by template
//! correlation and measures harmonic complexity by spectral peak counting.
//!
//! # Reference
//!
//! The major/minor profiles are the Krumhansl-Kessler tonal hierarchies:
//! Krumhansl, C. L., & Kessler, E. J. (1982). Tracing the Dynamic Changes in
//! Perceived Tonal Organization in a Spatial Representation of Musical Keys.
//! *Psychological Review*, 89(4), 334-368.

use crate::analysis::features::{Mode, PitchClass};
use crate::analysis::spectral::bin_frequency;
use crate::error::EngineError;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Lowest frequency folded into the chromagram (Hz)
const MIN_CHROMA_FREQUENCY: f32 = 20.0;

/// Spectral peaks only count toward harmonic complexity above this fraction
/// of the strongest bin, which keeps windowing sidelobes out of the count
const PEAK_FLOOR_RATIO: f32 = 0.1;

/// Krumhansl-Kessler major profile (C-rooted)
const MAJOR_PROFILE: [f32; 12] = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];

/// Krumhansl-Kessler minor profile (C-rooted)
const MINOR_PROFILE: [f32; 12] = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
];

/// Tonal summary for a whole buffer
#[derive(Debug, Clone)]
pub struct TonalSummary {
    /// Detected key (pitch class of the strongest chroma bin; C for silence)
    pub key: PitchClass,

    /// Major or minor, by rotated template correlation
    pub mode: Mode,

    /// Key confidence in [0, 1]
    ///
    /// `(key_bin - mean_bin) / mean_bin` clamped to [0, 1]. A value of 0 can
    /// mean a legitimately uncertain key (flat chroma), not an error.
    pub key_confidence: f32,

    /// Harmonic complexity in [0, 1]: normalized spectral peak count
    pub harmonic_complexity: f32,

    /// Max-normalized 12-bin chromagram (all zeros for silence)
    pub chromagram: [f32; 12],
}

/// Fold a magnitude spectrum into a max-normalized 12-bin chromagram
///
/// Each bin at frequency `f >= 20 Hz` maps to pitch class
/// `round(12*log2(f/reference) + 69) mod 12` and contributes its magnitude.
/// An all-zero spectrum yields an all-zero chromagram.
pub fn chromagram(
    spectrum: &[f32],
    sample_rate: u32,
    frame_size: usize,
    reference_frequency: f32,
) -> [f32; 12] {
    let mut chroma = [0.0f32; 12];

    for (i, &magnitude) in spectrum.iter().enumerate() {
        let freq = bin_frequency(i, sample_rate, frame_size);
        if freq < MIN_CHROMA_FREQUENCY {
            continue;
        }

        let midi = (12.0 * (freq / reference_frequency).log2() + 69.0).round() as i32;
        let pitch_class = midi.rem_euclid(12) as usize;
        chroma[pitch_class] += magnitude;
    }

    let max = chroma.iter().fold(0.0f32, |acc, &c| acc.max(c));
    if max > EPSILON {
        for c in chroma.iter_mut() {
            *c /= max;
        }
    } else {
        chroma = [0.0; 12];
    }

    chroma
}

/// Correlate the chromagram with a profile rotated to `tonic`
fn rotated_correlation(chroma: &[f32; 12], profile: &[f32; 12], tonic: usize) -> f32 {
    (0..12)
        .map(|i| chroma[(tonic + i) % 12] * profile[i])
        .sum()
}

/// Analyze the tonal content of a mean magnitude spectrum
///
/// # Arguments
///
/// * `spectrum` - Mean magnitude spectrum (frame_size / 2 bins)
/// * `sample_rate` - Sample rate in Hz
/// * `frame_size` - FFT size the spectrum was computed with
/// * `reference_frequency` - Tuning reference in Hz (typically 440.0)
/// * `complexity_peak_cap` - Peak count treated as maximal complexity
///
/// # Errors
///
/// Returns `EngineError::InvalidInput` when the peak cap is zero.
pub fn analyze_tonal(
    spectrum: &[f32],
    sample_rate: u32,
    frame_size: usize,
    reference_frequency: f32,
    complexity_peak_cap: usize,
) -> Result<TonalSummary, EngineError> {
    if complexity_peak_cap == 0 {
        return Err(EngineError::InvalidInput(
            "Complexity peak cap must be > 0".to_string(),
        ));
    }

    let chroma = chromagram(spectrum, sample_rate, frame_size, reference_frequency);

    // Key: pitch class of the strongest bin. Flat (all-zero) chroma falls
    // back to C with zero confidence.
    let (key_index, key_strength) = chroma
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, &c)| (i, c))
        .filter(|&(_, c)| c > EPSILON)
        .unwrap_or((0, 0.0));

    let mean_strength = chroma.iter().sum::<f32>() / 12.0;
    // May be negative before the clamp when the key bin sits below the mean;
    // that reads as "uncertain key", not as an error.
    let key_confidence = if mean_strength > EPSILON {
        ((key_strength - mean_strength) / mean_strength).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let major_score = rotated_correlation(&chroma, &MAJOR_PROFILE, key_index);
    let minor_score = rotated_correlation(&chroma, &MINOR_PROFILE, key_index);
    let mode = if minor_score > major_score {
        Mode::Minor
    } else {
        Mode::Major
    };

    let harmonic_complexity =
        (count_spectral_peaks(spectrum) as f32 / complexity_peak_cap as f32).clamp(0.0, 1.0);

    log::debug!(
        "Tonal analysis: key {:?} {:?}, confidence {:.2}, complexity {:.2}",
        PitchClass::from_index(key_index),
        mode,
        key_confidence,
        harmonic_complexity
    );

    Ok(TonalSummary {
        key: PitchClass::from_index(key_index),
        mode,
        key_confidence,
        harmonic_complexity,
        chromagram: chroma,
    })
}

/// Count local maxima in the magnitude spectrum
///
/// A bin counts when it exceeds both neighbors and sits above 10% of the
/// strongest bin.
pub fn count_spectral_peaks(spectrum: &[f32]) -> usize {
    if spectrum.len() < 3 {
        return 0;
    }

    let max = spectrum.iter().fold(0.0f32, |acc, &m| acc.max(m));
    if max <= EPSILON {
        return 0;
    }
    let floor = max * PEAK_FLOOR_RATIO;

    spectrum
        .windows(3)
        .filter(|w| w[1] > w[0] && w[1] > w[2] && w[1] > floor)
        .count()
}

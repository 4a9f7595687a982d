//! Spectral analysis
//!
//! Frames PCM samples, applies a Hann window, runs an FFT and derives four
//! spectral descriptors from the magnitude spectrum:
//!
//! 1. Centroid: energy-weighted mean frequency ("brightness")
//! 2. Rolloff: frequency below which 85% of cumulative magnitude lies
//! 3. Flatness: geometric-mean / arithmetic-mean ratio ("noisiness")
//! 4. Bandwidth: magnitude-weighted spread of frequency around the centroid
//!
//! The transform is a pure function of its input frame: the FFT planner is
//! constructed locally and no spectrum state is retained between frames, so
//! frames (and analyzers) can run concurrently without locks.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::EngineError;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Spectral summary for a whole buffer
///
/// Descriptors are computed from the mean magnitude spectrum across all
/// analysis frames. The mean spectrum itself is kept because the tonal
/// analyzer folds it into a chromagram.
#[derive(Debug, Clone)]
pub struct SpectralSummary {
    /// Spectral centroid in Hz (0 for silence)
    pub centroid: f32,

    /// Spectral rolloff frequency in Hz (0 for silence)
    pub rolloff: f32,

    /// Spectral flatness in [0, 1] (0 for silence)
    pub flatness: f32,

    /// Spectral bandwidth in Hz (0 for silence)
    pub bandwidth: f32,

    /// Mean magnitude spectrum (frame_size / 2 bins)
    pub mean_spectrum: Vec<f32>,

    /// FFT size the spectrum was computed with
    pub frame_size: usize,
}

/// Generate a Hann window of length `n`
///
/// `w[i] = 0.5 * (1 - cos(2πi / (n - 1)))`
pub fn hann_window(n: usize) -> Vec<f32> {
    if n <= 1 {
        return vec![1.0; n];
    }
    (0..n)
        .map(|i| {
            0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (n - 1) as f32).cos())
        })
        .collect()
}

/// Compute the magnitude spectrum of a single frame
///
/// Applies a Hann window, runs a forward FFT and returns the first
/// `frame.len() / 2` bin magnitudes. Pure function: no state survives the
/// call, so it is safe to invoke from multiple threads.
///
/// # Arguments
///
/// * `frame` - PCM samples, normalized to [-1.0, 1.0]
///
/// # Returns
///
/// Magnitude spectrum of length `frame.len() / 2`
pub fn magnitude_spectrum(frame: &[f32]) -> Vec<f32> {
    if frame.is_empty() {
        return Vec::new();
    }

    let window = hann_window(frame.len());
    let mut buffer: Vec<Complex<f32>> = frame
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| Complex::new(s * w, 0.0))
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);

    buffer[..buffer.len() / 2].iter().map(|c| c.norm()).collect()
}

/// Analyze the spectral content of a PCM buffer
///
/// Frames the buffer (zero-padding a single frame when the buffer is
/// shorter than `frame_size`), averages the per-frame magnitude spectra
/// and derives the four descriptors from the mean spectrum.
///
/// # Arguments
///
/// * `samples` - Mono PCM samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz
/// * `frame_size` - FFT frame size (typically 2048)
/// * `hop_size` - Hop between frames (typically 512)
/// * `rolloff_fraction` - Cumulative-magnitude fraction for rolloff (typically 0.85)
///
/// # Errors
///
/// Returns `EngineError::InvalidInput` for zero frame/hop sizes or a
/// rolloff fraction outside (0, 1].
pub fn analyze_spectral(
    samples: &[f32],
    sample_rate: u32,
    frame_size: usize,
    hop_size: usize,
    rolloff_fraction: f32,
) -> Result<SpectralSummary, EngineError> {
    if frame_size == 0 {
        return Err(EngineError::InvalidInput(
            "Frame size must be > 0".to_string(),
        ));
    }
    if hop_size == 0 {
        return Err(EngineError::InvalidInput("Hop size must be > 0".to_string()));
    }
    if !(rolloff_fraction > 0.0 && rolloff_fraction <= 1.0) {
        return Err(EngineError::InvalidInput(format!(
            "Rolloff fraction must be in (0, 1], got {}",
            rolloff_fraction
        )));
    }

    log::debug!(
        "Spectral analysis: {} samples, frame={}, hop={}",
        samples.len(),
        frame_size,
        hop_size
    );

    let n_bins = frame_size / 2;
    let mut mean_spectrum = vec![0.0f32; n_bins];
    let mut n_frames = 0usize;

    if samples.len() < frame_size {
        // Short input: analyze one zero-padded frame
        let mut frame = samples.to_vec();
        frame.resize(frame_size, 0.0);
        let spectrum = magnitude_spectrum(&frame);
        for (acc, &m) in mean_spectrum.iter_mut().zip(spectrum.iter()) {
            *acc += m;
        }
        n_frames = 1;
    } else {
        let mut start = 0;
        while start + frame_size <= samples.len() {
            let spectrum = magnitude_spectrum(&samples[start..start + frame_size]);
            for (acc, &m) in mean_spectrum.iter_mut().zip(spectrum.iter()) {
                *acc += m;
            }
            n_frames += 1;
            start += hop_size;
        }
    }

    if n_frames > 0 {
        let inv = 1.0 / n_frames as f32;
        for m in mean_spectrum.iter_mut() {
            *m *= inv;
        }
    }

    let centroid = spectral_centroid(&mean_spectrum, sample_rate, frame_size);
    let rolloff = spectral_rolloff(&mean_spectrum, sample_rate, frame_size, rolloff_fraction);
    let flatness = spectral_flatness(&mean_spectrum);
    let bandwidth = spectral_bandwidth(&mean_spectrum, sample_rate, frame_size, centroid);

    Ok(SpectralSummary {
        centroid,
        rolloff,
        flatness,
        bandwidth,
        mean_spectrum,
        frame_size,
    })
}

/// Center frequency of bin `i` for an FFT of size `frame_size`
pub fn bin_frequency(i: usize, sample_rate: u32, frame_size: usize) -> f32 {
    i as f32 * sample_rate as f32 / frame_size as f32
}

/// Energy-weighted mean frequency of the spectrum
///
/// Returns 0 (not NaN) when the total magnitude is zero.
pub fn spectral_centroid(spectrum: &[f32], sample_rate: u32, frame_size: usize) -> f32 {
    let total: f32 = spectrum.iter().sum();
    if total <= EPSILON {
        return 0.0;
    }

    let weighted: f32 = spectrum
        .iter()
        .enumerate()
        .map(|(i, &m)| bin_frequency(i, sample_rate, frame_size) * m)
        .sum();

    weighted / total
}

/// Frequency below which `fraction` of the cumulative magnitude lies
///
/// Returns 0 when the total magnitude is zero.
pub fn spectral_rolloff(
    spectrum: &[f32],
    sample_rate: u32,
    frame_size: usize,
    fraction: f32,
) -> f32 {
    let total: f32 = spectrum.iter().sum();
    if total <= EPSILON {
        return 0.0;
    }

    let target = total * fraction;
    let mut cumulative = 0.0f32;
    for (i, &m) in spectrum.iter().enumerate() {
        cumulative += m;
        if cumulative >= target {
            return bin_frequency(i, sample_rate, frame_size);
        }
    }

    bin_frequency(spectrum.len().saturating_sub(1), sample_rate, frame_size)
}

/// Geometric-mean / arithmetic-mean ratio of the magnitudes
///
/// High values indicate noise-like spectra, low values tonal spectra.
/// Returns 0 when the total magnitude is zero; the result is clamped to
/// [0, 1].
pub fn spectral_flatness(spectrum: &[f32]) -> f32 {
    if spectrum.is_empty() {
        return 0.0;
    }

    let arithmetic = spectrum.iter().sum::<f32>() / spectrum.len() as f32;
    if arithmetic <= EPSILON {
        return 0.0;
    }

    // Geometric mean via the log domain to avoid underflow on long spectra
    let log_sum: f32 = spectrum.iter().map(|&m| (m + EPSILON).ln()).sum();
    let geometric = (log_sum / spectrum.len() as f32).exp();

    (geometric / arithmetic).clamp(0.0, 1.0)
}

/// Magnitude-weighted standard deviation of frequency around the centroid
///
/// Returns 0 when the total magnitude is zero.
pub fn spectral_bandwidth(
    spectrum: &[f32],
    sample_rate: u32,
    frame_size: usize,
    centroid: f32,
) -> f32 {
    let total: f32 = spectrum.iter().sum();
    if total <= EPSILON {
        return 0.0;
    }

    let variance: f32 = spectrum
        .iter()
        .enumerate()
        .map(|(i, &m)| {
            let d = bin_frequency(i, sample_rate, frame_size) - centroid;
            d * d * m
        })
        .sum::<f32>()
        / total;

    variance.max(0.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: u32, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_hann_window_endpoints() {
        let w = hann_window(2048);
        assert!(w[0].abs() < 1e-6);
        assert!(w[2047].abs() < 1e-6);
        assert!((w[1024] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_magnitude_spectrum_peak_at_input_frequency() {
        let samples = sine(440.0, 44100, 2048);
        let spectrum = magnitude_spectrum(&samples);
        assert_eq!(spectrum.len(), 1024);

        let peak_bin = spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        let expected_bin = 440.0 * 2048.0 / 44100.0; // ~20.4
        assert!(
            (peak_bin as f32 - expected_bin).abs() <= 1.0,
            "Peak bin {} should be within 1 of {:.1}",
            peak_bin,
            expected_bin
        );
    }

    #[test]
    fn test_centroid_near_sine_frequency() {
        let samples = sine(1000.0, 44100, 2048 * 8);
        let summary = analyze_spectral(&samples, 44100, 2048, 512, 0.85).unwrap();
        assert!(
            (summary.centroid - 1000.0).abs() < 200.0,
            "Centroid {:.1} should be near 1000 Hz",
            summary.centroid
        );
    }

    #[test]
    fn test_sine_has_low_flatness() {
        let samples = sine(440.0, 44100, 2048 * 4);
        let summary = analyze_spectral(&samples, 44100, 2048, 512, 0.85).unwrap();
        assert!(
            summary.flatness < 0.5,
            "Tonal signal should have low flatness, got {:.3}",
            summary.flatness
        );
    }

    #[test]
    fn test_zero_buffer_yields_zero_descriptors() {
        let samples = vec![0.0f32; 2048 * 4];
        let summary = analyze_spectral(&samples, 44100, 2048, 512, 0.85).unwrap();
        assert_eq!(summary.centroid, 0.0);
        assert_eq!(summary.rolloff, 0.0);
        assert_eq!(summary.flatness, 0.0);
        assert_eq!(summary.bandwidth, 0.0);
        assert!(summary.centroid.is_finite());
    }

    #[test]
    fn test_short_buffer_is_zero_padded() {
        let samples = sine(440.0, 44100, 500);
        let summary = analyze_spectral(&samples, 44100, 2048, 512, 0.85).unwrap();
        assert_eq!(summary.mean_spectrum.len(), 1024);
        assert!(summary.centroid > 0.0);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(analyze_spectral(&[0.0; 64], 44100, 0, 512, 0.85).is_err());
        assert!(analyze_spectral(&[0.0; 64], 44100, 2048, 0, 0.85).is_err());
        assert!(analyze_spectral(&[0.0; 64], 44100, 2048, 512, 0.0).is_err());
        assert!(analyze_spectral(&[0.0; 64], 44100, 2048, 512, 1.5).is_err());
    }

    #[test]
    fn test_rolloff_not_below_centroid_for_sine() {
        let samples = sine(440.0, 44100, 2048 * 4);
        let summary = analyze_spectral(&samples, 44100, 2048, 512, 0.85).unwrap();
        assert!(summary.rolloff > 0.0);
        assert!(summary.rolloff < 22050.0);
    }
}

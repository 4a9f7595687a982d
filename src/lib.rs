//! # Hitscope
//!
//! A deterministic, auditable commercial-success assessment engine for
//! music tracks. Combines signal-derived acoustic descriptors with
//! contextual signals (declared genre, release timing, market-trend
//! snapshot) into a bounded, explainable score.
//!
//! ## Features
//!
//! - **Feature extraction**: windowed FFT spectral descriptors, onset-based
//!   tempo estimation, chromagram key detection, perceptual feature
//!   synthesis
//! - **Success scoring**: genre-conditional three-algorithm ensemble with a
//!   per-component breakdown and a canonical confidence score
//! - **Recommendations**: prioritized, impact-ranked advice plus a
//!   structured risk assessment
//!
//! This is a heuristic engine, not a trained model: the weights are fixed,
//! documented constants, and identical inputs always produce identical
//! outputs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hitscope::{assess_track, AudioBuffer, EngineConfig, ScoringContext};
//!
//! let samples: Vec<f32> = vec![]; // Decoded mono PCM, normalized
//! let buffer = AudioBuffer::new(&samples, 44100, 2);
//!
//! let context = ScoringContext {
//!     genre: Some("Pop".to_string()),
//!     ..ScoringContext::default()
//! };
//!
//! let result = assess_track(&buffer, &context, &EngineConfig::default())?;
//! println!("Overall score: {:.0}/100 (confidence {:.2})", result.overall_score, result.confidence);
//! # Ok::<(), hitscope::EngineError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! PCM buffer → {Spectral, Temporal, Tonal} → Perceptual synthesis
//!            → Feature vector → Success scorer (+ genre/market/date)
//!            → Recommendations + risk → SuccessScoreResult
//! ```
//!
//! The spectral, temporal and tonal analyzers share the immutable PCM
//! buffer and run concurrently; the market-signal fetch is the only async
//! operation and degrades to built-in defaults on timeout.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod scoring;

// Re-export main types
pub use analysis::features::{
    FeatureOrigin, FeatureVector, FeatureVectorBuilder, Mode, PerceptualFeatureSet, PitchClass,
    RawFeatureSet,
};
pub use config::EngineConfig;
pub use error::EngineError;
pub use scoring::market::{fetch_market_trends, MarketSignalProvider, MarketTrendsSnapshot};
pub use scoring::result::{Recommendation, ScoreBreakdown, SuccessScoreResult};
pub use scoring::risk::{RiskAssessment, RiskLevel};
pub use scoring::scorer::score_features;
pub use scoring::ScoringContext;

use analysis::{perceptual, spectral, temporal, tonal};

/// A decoded PCM buffer, read-only
///
/// Samples are mono and normalized to [-1.0, 1.0]; stereo sources should be
/// downmixed by the decoder. `channels` records the source channel count.
#[derive(Debug, Clone, Copy)]
pub struct AudioBuffer<'a> {
    /// Mono PCM samples in [-1.0, 1.0]
    pub samples: &'a [f32],
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count of the source material
    pub channels: u32,
}

impl<'a> AudioBuffer<'a> {
    /// Create a buffer view over decoded samples
    pub fn new(samples: &'a [f32], sample_rate: u32, channels: u32) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }
}

/// Raw and perceptual features for one track
#[derive(Debug, Clone)]
pub struct TrackFeatures {
    /// Signal-derived raw features
    pub raw: RawFeatureSet,
    /// Synthesized perceptual features
    pub perceptual: PerceptualFeatureSet,
}

impl TrackFeatures {
    /// Build the normalized scoring vector
    pub fn vector(&self) -> FeatureVector {
        FeatureVector::from_features(&self.raw, &self.perceptual)
    }

    /// Deterministic fallback features for undecodable audio
    ///
    /// Tagged [`FeatureOrigin::Estimated`]; scoring them yields a visibly
    /// lower confidence. Use this instead of propagating a decode error.
    pub fn estimated() -> Self {
        let raw = RawFeatureSet::estimated();
        let perceptual = perceptual::synthesize(&raw);
        Self { raw, perceptual }
    }
}

/// Extract raw and perceptual features from a PCM buffer
///
/// The spectral+tonal chain and the temporal analyzer run concurrently
/// over the shared immutable buffer; nothing holds mutable state between
/// frames. An all-zero (or empty) buffer is valid input and resolves every
/// feature to its documented default rather than erroring.
///
/// # Errors
///
/// Returns `EngineError::InvalidInput` for a zero sample rate or invalid
/// configuration.
pub fn extract_features(
    buffer: &AudioBuffer<'_>,
    config: &EngineConfig,
) -> Result<TrackFeatures, EngineError> {
    let start = std::time::Instant::now();

    if buffer.sample_rate == 0 {
        return Err(EngineError::InvalidInput("Invalid sample rate".to_string()));
    }

    log::debug!(
        "Extracting features: {} samples at {} Hz",
        buffer.samples.len(),
        buffer.sample_rate
    );

    // The tonal analyzer folds the mean magnitude spectrum, so it chains
    // after the spectral pass; the temporal analyzer is independent of both.
    let (spectral_tonal, temporal_summary) = rayon::join(
        || -> Result<(spectral::SpectralSummary, tonal::TonalSummary), EngineError> {
            let spectral_summary = spectral::analyze_spectral(
                buffer.samples,
                buffer.sample_rate,
                config.frame_size,
                config.hop_size,
                config.rolloff_fraction,
            )?;
            let tonal_summary = tonal::analyze_tonal(
                &spectral_summary.mean_spectrum,
                buffer.sample_rate,
                config.frame_size,
                config.reference_frequency,
                config.complexity_peak_cap,
            )?;
            Ok((spectral_summary, tonal_summary))
        },
        || {
            temporal::analyze_temporal(
                buffer.samples,
                buffer.sample_rate,
                config.onset_threshold,
                config.min_bpm,
                config.max_bpm,
                config.frame_size,
                config.hop_size,
            )
        },
    );

    let (spectral_summary, tonal_summary) = spectral_tonal?;
    let temporal_summary = temporal_summary?;

    let raw = RawFeatureSet {
        duration_seconds: buffer.samples.len() as f32 / buffer.sample_rate as f32,
        sample_rate: buffer.sample_rate,
        channels: buffer.channels,
        spectral_centroid: spectral_summary.centroid,
        spectral_rolloff: spectral_summary.rolloff,
        spectral_flatness: spectral_summary.flatness,
        spectral_bandwidth: spectral_summary.bandwidth,
        tempo_bpm: temporal_summary.tempo_bpm,
        rhythm_strength: temporal_summary.rhythm_strength,
        beat_confidence: temporal_summary.beat_confidence,
        key: tonal_summary.key,
        mode: tonal_summary.mode,
        key_confidence: tonal_summary.key_confidence,
        harmonic_complexity: tonal_summary.harmonic_complexity,
        rms: temporal_summary.rms,
        dynamic_range_db: temporal_summary.dynamic_range_db,
        crest_factor: temporal_summary.crest_factor,
        origin: FeatureOrigin::Measured,
    };

    let perceptual = perceptual::synthesize(&raw);

    log::debug!(
        "Feature extraction finished in {:.1} ms",
        start.elapsed().as_secs_f32() * 1000.0
    );

    Ok(TrackFeatures { raw, perceptual })
}

/// Assess a decoded track end to end
///
/// Extracts features and scores them against the given context. For bytes
/// that fail to decode upstream, call [`assess_estimated`] instead of
/// propagating the decode error.
///
/// # Errors
///
/// Returns `EngineError::InvalidInput` for a zero sample rate or invalid
/// configuration; scoring itself is infallible.
pub fn assess_track(
    buffer: &AudioBuffer<'_>,
    context: &ScoringContext,
    config: &EngineConfig,
) -> Result<SuccessScoreResult, EngineError> {
    let features = extract_features(buffer, config)?;
    Ok(score_features(&features.vector(), context))
}

/// Assess a track whose audio could not be decoded
///
/// Substitutes the deterministic estimated feature set and scores it. The
/// result is tagged [`FeatureOrigin::Estimated`] and carries a reduced
/// confidence, never an error.
pub fn assess_estimated(context: &ScoringContext) -> SuccessScoreResult {
    log::warn!("Scoring with estimated features (decode fallback)");
    score_features(&TrackFeatures::estimated().vector(), context)
}

/// Assess a track, fetching market trends from a provider first
///
/// The fetch is bounded by `config.market_fetch_timeout`; on failure or
/// timeout the built-in default snapshot is used and assessment proceeds.
/// This is the engine's only async entry point.
///
/// # Errors
///
/// Same failure modes as [`assess_track`]; provider failures degrade to
/// defaults instead of erroring.
pub async fn assess_track_with_provider<P>(
    buffer: &AudioBuffer<'_>,
    context: &ScoringContext,
    provider: &P,
    config: &EngineConfig,
) -> Result<SuccessScoreResult, EngineError>
where
    P: MarketSignalProvider + Sync,
{
    let snapshot = fetch_market_trends(provider, config.market_fetch_timeout).await;
    let context = ScoringContext {
        market_trends: Some(snapshot),
        ..context.clone()
    };
    assess_track(buffer, &context, config)
}

//! Perceptual feature synthesis
//!
//! Combines the spectral, temporal and tonal outputs into seven bounded
//! perceptual descriptors modeled after commercial streaming-platform
//! audio-feature conventions. Pure functions of the raw feature set; every
//! output is clamped to [0, 1].

use crate::analysis::features::{PerceptualFeatureSet, RawFeatureSet};

/// Synthesize the perceptual feature set from raw features
///
/// Formulas (all outputs clamped to [0, 1]):
///
/// - danceability = 0.6·rhythm_strength + 0.4·min(1, tempo/140)
/// - energy = 0.4·min(1, centroid/3000) + 0.4·clamp((rms-0.1)/0.4) + 0.2·min(1, tempo/160)
/// - valence = 0.6·(1 - flatness) + 0.4·harmonic_complexity
/// - acousticness = 1 - flatness
/// - instrumentalness = 0.8·(1 - flatness) + 0.2·harmonic_complexity
/// - liveness = clamp((dynamic_range + 60) / 60)
/// - speechiness = 0.7·min(1, rolloff/8000) + 0.3·flatness
pub fn synthesize(raw: &RawFeatureSet) -> PerceptualFeatureSet {
    let flatness = raw.spectral_flatness.clamp(0.0, 1.0);
    let complexity = raw.harmonic_complexity.clamp(0.0, 1.0);

    let danceability =
        0.6 * raw.rhythm_strength + 0.4 * (raw.tempo_bpm / 140.0).min(1.0);

    let energy = 0.4 * (raw.spectral_centroid / 3000.0).min(1.0)
        + 0.4 * ((raw.rms - 0.1) / 0.4).clamp(0.0, 1.0)
        + 0.2 * (raw.tempo_bpm / 160.0).min(1.0);

    let valence = 0.6 * (1.0 - flatness) + 0.4 * complexity;

    let acousticness = 1.0 - flatness;

    let instrumentalness = 0.8 * (1.0 - flatness) + 0.2 * complexity;

    let liveness = (raw.dynamic_range_db + 60.0) / 60.0;

    let speechiness = 0.7 * (raw.spectral_rolloff / 8000.0).min(1.0) + 0.3 * flatness;

    PerceptualFeatureSet {
        danceability: danceability.clamp(0.0, 1.0),
        energy: energy.clamp(0.0, 1.0),
        valence: valence.clamp(0.0, 1.0),
        acousticness: acousticness.clamp(0.0, 1.0),
        instrumentalness: instrumentalness.clamp(0.0, 1.0),
        liveness: liveness.clamp(0.0, 1.0),
        speechiness: speechiness.clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::features::{FeatureOrigin, Mode, PitchClass};

    fn raw_with(f: impl FnOnce(&mut RawFeatureSet)) -> RawFeatureSet {
        let mut raw = RawFeatureSet {
            duration_seconds: 30.0,
            sample_rate: 44100,
            channels: 2,
            spectral_centroid: 1500.0,
            spectral_rolloff: 4000.0,
            spectral_flatness: 0.3,
            spectral_bandwidth: 1200.0,
            tempo_bpm: 120.0,
            rhythm_strength: 0.6,
            beat_confidence: 0.7,
            key: PitchClass::C,
            mode: Mode::Major,
            key_confidence: 0.5,
            harmonic_complexity: 0.4,
            rms: 0.3,
            dynamic_range_db: -12.0,
            crest_factor: 3.0,
            origin: FeatureOrigin::Measured,
        };
        f(&mut raw);
        raw
    }

    #[test]
    fn test_all_outputs_bounded() {
        let extremes = [
            raw_with(|r| {
                r.spectral_centroid = 20000.0;
                r.spectral_rolloff = 22050.0;
                r.spectral_flatness = 1.0;
                r.tempo_bpm = 200.0;
                r.rhythm_strength = 1.0;
                r.rms = 1.0;
                r.harmonic_complexity = 1.0;
                r.dynamic_range_db = 0.0;
            }),
            raw_with(|r| {
                r.spectral_centroid = 0.0;
                r.spectral_rolloff = 0.0;
                r.spectral_flatness = 0.0;
                r.tempo_bpm = 60.0;
                r.rhythm_strength = 0.0;
                r.rms = 0.0;
                r.harmonic_complexity = 0.0;
                r.dynamic_range_db = -60.0;
            }),
        ];

        for raw in &extremes {
            let p = synthesize(raw);
            for v in [
                p.danceability,
                p.energy,
                p.valence,
                p.acousticness,
                p.instrumentalness,
                p.liveness,
                p.speechiness,
            ] {
                assert!((0.0..=1.0).contains(&v), "Perceptual value out of range: {}", v);
            }
        }
    }

    #[test]
    fn test_danceability_formula() {
        let raw = raw_with(|r| {
            r.rhythm_strength = 0.5;
            r.tempo_bpm = 140.0;
        });
        let p = synthesize(&raw);
        // 0.6*0.5 + 0.4*1.0 = 0.7
        assert!((p.danceability - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_acousticness_is_flatness_complement() {
        let raw = raw_with(|r| r.spectral_flatness = 0.25);
        let p = synthesize(&raw);
        assert!((p.acousticness - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_liveness_maps_dynamic_range() {
        let quiet = raw_with(|r| r.dynamic_range_db = -60.0);
        assert_eq!(synthesize(&quiet).liveness, 0.0);

        let flat = raw_with(|r| r.dynamic_range_db = 0.0);
        assert_eq!(synthesize(&flat).liveness, 1.0);

        let mid = raw_with(|r| r.dynamic_range_db = -30.0);
        assert!((synthesize(&mid).liveness - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_silence_features_are_valid() {
        // The zero-buffer raw values: everything at its documented default
        let raw = raw_with(|r| {
            r.spectral_centroid = 0.0;
            r.spectral_rolloff = 0.0;
            r.spectral_flatness = 0.0;
            r.spectral_bandwidth = 0.0;
            r.tempo_bpm = 120.0;
            r.rhythm_strength = 0.0;
            r.beat_confidence = 0.0;
            r.rms = 0.0;
            r.dynamic_range_db = -60.0;
            r.crest_factor = 0.0;
            r.harmonic_complexity = 0.0;
        });
        let p = synthesize(&raw);
        assert!(p.energy < 0.3);
        assert_eq!(p.liveness, 0.0);
        assert_eq!(p.acousticness, 1.0);
        assert!(p.speechiness.abs() < 1e-6);
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let raw = raw_with(|_| {});
        let a = synthesize(&raw);
        let b = synthesize(&raw);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

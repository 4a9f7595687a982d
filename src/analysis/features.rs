//! Feature record types
//!
//! The immutable per-track feature records produced by the analysis
//! pipeline, plus the fixed-order normalized vector the scorer consumes.

use serde::{Deserialize, Serialize};

/// Pitch class (octave-independent note)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    /// C
    C,
    /// C#
    CSharp,
    /// D
    D,
    /// D#
    DSharp,
    /// E
    E,
    /// F
    F,
    /// F#
    FSharp,
    /// G
    G,
    /// G#
    GSharp,
    /// A
    A,
    /// A#
    ASharp,
    /// B
    B,
}

impl PitchClass {
    /// All 12 pitch classes in chromatic order starting at C
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Pitch class for a chroma bin index (0 = C, ..., 11 = B)
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % 12]
    }

    /// Chroma bin index (0 = C, ..., 11 = B)
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    /// Note name in musical notation (e.g., "C", "F#")
    pub fn name(&self) -> &'static str {
        const NAMES: [&str; 12] = [
            "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
        ];
        NAMES[self.index()]
    }
}

/// Major or minor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Major mode
    Major,
    /// Minor mode
    Minor,
}

/// Whether features were measured from audio or substituted heuristically
///
/// A decode failure upstream degrades to `Estimated` features rather than an
/// error; the marker keeps that visible all the way to the output record,
/// and the estimated substitutes are fixed constants, so scoring stays
/// deterministic on both paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureOrigin {
    /// Derived from the decoded PCM buffer
    Measured,
    /// Substituted neutral defaults after a decode failure
    Estimated,
}

/// Raw signal-derived features, computed once per buffer and never mutated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFeatureSet {
    /// Audio duration in seconds
    pub duration_seconds: f32,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count of the source buffer
    pub channels: u32,

    /// Spectral centroid in Hz
    pub spectral_centroid: f32,
    /// Spectral rolloff frequency in Hz
    pub spectral_rolloff: f32,
    /// Spectral flatness in [0, 1]
    pub spectral_flatness: f32,
    /// Spectral bandwidth in Hz
    pub spectral_bandwidth: f32,

    /// Tempo in BPM, clamped to [60, 200]
    pub tempo_bpm: f32,
    /// Rhythm strength in [0, 1]
    pub rhythm_strength: f32,
    /// Beat confidence in [0, 1]
    pub beat_confidence: f32,

    /// Detected key
    pub key: PitchClass,
    /// Major or minor
    pub mode: Mode,
    /// Key confidence in [0, 1] (0 means "uncertain key", not an error)
    pub key_confidence: f32,
    /// Harmonic complexity in [0, 1]
    pub harmonic_complexity: f32,

    /// RMS level
    pub rms: f32,
    /// Dynamic range in dB, in [-60, 0]
    pub dynamic_range_db: f32,
    /// Peak-to-RMS ratio
    pub crest_factor: f32,

    /// Measured vs. estimated marker
    pub origin: FeatureOrigin,
}

impl RawFeatureSet {
    /// Deterministic fallback features for undecodable audio
    ///
    /// Every field is a fixed neutral constant (0.5 for unit-interval
    /// features, 120 BPM tempo, mid-band spectral values) and the record is
    /// tagged `Estimated`. No randomness: identical inputs always produce
    /// identical assessments, including on this path.
    pub fn estimated() -> Self {
        Self {
            duration_seconds: 0.0,
            sample_rate: 44100,
            channels: 2,
            spectral_centroid: 1500.0,
            spectral_rolloff: 4000.0,
            spectral_flatness: 0.5,
            spectral_bandwidth: 1500.0,
            tempo_bpm: 120.0,
            rhythm_strength: 0.5,
            beat_confidence: 0.5,
            key: PitchClass::C,
            mode: Mode::Major,
            key_confidence: 0.5,
            harmonic_complexity: 0.5,
            rms: 0.25,
            dynamic_range_db: -30.0,
            crest_factor: 2.0,
            origin: FeatureOrigin::Estimated,
        }
    }
}

/// Perceptual features synthesized from the raw feature set
///
/// All values bounded to [0, 1], recomputed only when the raw features
/// change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerceptualFeatureSet {
    /// Groove suitability
    pub danceability: f32,
    /// Intensity and activity
    pub energy: f32,
    /// Musical positivity
    pub valence: f32,
    /// Acoustic (non-electronic) character
    pub acousticness: f32,
    /// Absence of vocals
    pub instrumentalness: f32,
    /// Live-performance character
    pub liveness: f32,
    /// Spoken-word character
    pub speechiness: f32,
}

/// Names of the vector entries, in storage order
pub const FEATURE_ORDER: [&str; 12] = [
    "danceability",
    "energy",
    "valence",
    "acousticness",
    "instrumentalness",
    "liveness",
    "speechiness",
    "tempo",
    "rhythm_strength",
    "beat_confidence",
    "key_confidence",
    "harmonic_complexity",
];

/// Tempo range used for normalization (matches the BPM clamp range)
const TEMPO_NORM_MIN: f32 = 60.0;
const TEMPO_NORM_SPAN: f32 = 140.0;

/// Fixed-order normalized feature vector for scoring
///
/// All entries are in [0, 1]; tempo is stored both normalized (in the
/// vector) and in BPM (for market tempo alignment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Normalized values in [`FEATURE_ORDER`] order
    pub values: [f32; 12],

    /// Tempo in BPM (unnormalized)
    pub tempo_bpm: f32,

    /// Detected key
    pub key: PitchClass,

    /// Major or minor
    pub mode: Mode,

    /// Measured vs. estimated marker, carried through to the result
    pub origin: FeatureOrigin,

    /// How many of the four required features (tempo, danceability, energy,
    /// valence) were explicitly provided; drives the confidence score
    pub provided_required: u8,
}

impl FeatureVector {
    /// Danceability in [0, 1]
    pub fn danceability(&self) -> f32 {
        self.values[0]
    }

    /// Energy in [0, 1]
    pub fn energy(&self) -> f32 {
        self.values[1]
    }

    /// Valence in [0, 1]
    pub fn valence(&self) -> f32 {
        self.values[2]
    }

    /// Acousticness in [0, 1]
    pub fn acousticness(&self) -> f32 {
        self.values[3]
    }

    /// Instrumentalness in [0, 1]
    pub fn instrumentalness(&self) -> f32 {
        self.values[4]
    }

    /// Liveness in [0, 1]
    pub fn liveness(&self) -> f32 {
        self.values[5]
    }

    /// Speechiness in [0, 1]
    pub fn speechiness(&self) -> f32 {
        self.values[6]
    }

    /// Build the vector from a full measured (or estimated) feature set
    pub fn from_features(raw: &RawFeatureSet, perceptual: &PerceptualFeatureSet) -> Self {
        let provided_required = match raw.origin {
            FeatureOrigin::Measured => 4,
            FeatureOrigin::Estimated => 0,
        };

        Self {
            values: [
                perceptual.danceability.clamp(0.0, 1.0),
                perceptual.energy.clamp(0.0, 1.0),
                perceptual.valence.clamp(0.0, 1.0),
                perceptual.acousticness.clamp(0.0, 1.0),
                perceptual.instrumentalness.clamp(0.0, 1.0),
                perceptual.liveness.clamp(0.0, 1.0),
                perceptual.speechiness.clamp(0.0, 1.0),
                normalize_tempo(raw.tempo_bpm),
                raw.rhythm_strength.clamp(0.0, 1.0),
                raw.beat_confidence.clamp(0.0, 1.0),
                raw.key_confidence.clamp(0.0, 1.0),
                raw.harmonic_complexity.clamp(0.0, 1.0),
            ],
            tempo_bpm: raw.tempo_bpm.clamp(60.0, 200.0),
            key: raw.key,
            mode: raw.mode,
            origin: raw.origin,
            provided_required,
        }
    }

    /// Start building a vector from partial inputs
    pub fn builder() -> FeatureVectorBuilder {
        FeatureVectorBuilder::default()
    }
}

/// Normalize BPM into [0, 1] over the [60, 200] clamp range
fn normalize_tempo(bpm: f32) -> f32 {
    ((bpm - TEMPO_NORM_MIN) / TEMPO_NORM_SPAN).clamp(0.0, 1.0)
}

/// Builder for partial feature inputs
///
/// Every field is optional; unspecified fields take a documented default
/// (0.5 for unit-interval features, 120 BPM for tempo, C major) at build
/// time rather than leaking `None` into scoring. The builder records which
/// of the four required features (tempo, danceability, energy, valence)
/// were explicitly set; the scorer's confidence uses that count.
#[derive(Debug, Clone, Default)]
pub struct FeatureVectorBuilder {
    tempo_bpm: Option<f32>,
    danceability: Option<f32>,
    energy: Option<f32>,
    valence: Option<f32>,
    acousticness: Option<f32>,
    instrumentalness: Option<f32>,
    liveness: Option<f32>,
    speechiness: Option<f32>,
    rhythm_strength: Option<f32>,
    beat_confidence: Option<f32>,
    key: Option<PitchClass>,
    mode: Option<Mode>,
    key_confidence: Option<f32>,
    harmonic_complexity: Option<f32>,
    origin: Option<FeatureOrigin>,
}

impl FeatureVectorBuilder {
    /// Tempo in BPM (default: 120)
    pub fn tempo_bpm(mut self, bpm: f32) -> Self {
        self.tempo_bpm = Some(bpm);
        self
    }

    /// Danceability in [0, 1] (default: 0.5)
    pub fn danceability(mut self, v: f32) -> Self {
        self.danceability = Some(v);
        self
    }

    /// Energy in [0, 1] (default: 0.5)
    pub fn energy(mut self, v: f32) -> Self {
        self.energy = Some(v);
        self
    }

    /// Valence in [0, 1] (default: 0.5)
    pub fn valence(mut self, v: f32) -> Self {
        self.valence = Some(v);
        self
    }

    /// Acousticness in [0, 1] (default: 0.5)
    pub fn acousticness(mut self, v: f32) -> Self {
        self.acousticness = Some(v);
        self
    }

    /// Instrumentalness in [0, 1] (default: 0.5)
    pub fn instrumentalness(mut self, v: f32) -> Self {
        self.instrumentalness = Some(v);
        self
    }

    /// Liveness in [0, 1] (default: 0.5)
    pub fn liveness(mut self, v: f32) -> Self {
        self.liveness = Some(v);
        self
    }

    /// Speechiness in [0, 1] (default: 0.5)
    pub fn speechiness(mut self, v: f32) -> Self {
        self.speechiness = Some(v);
        self
    }

    /// Rhythm strength in [0, 1] (default: 0.5)
    pub fn rhythm_strength(mut self, v: f32) -> Self {
        self.rhythm_strength = Some(v);
        self
    }

    /// Beat confidence in [0, 1] (default: 0.5)
    pub fn beat_confidence(mut self, v: f32) -> Self {
        self.beat_confidence = Some(v);
        self
    }

    /// Detected key (default: C)
    pub fn key(mut self, key: PitchClass) -> Self {
        self.key = Some(key);
        self
    }

    /// Mode (default: major)
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Key confidence in [0, 1] (default: 0.5)
    pub fn key_confidence(mut self, v: f32) -> Self {
        self.key_confidence = Some(v);
        self
    }

    /// Harmonic complexity in [0, 1] (default: 0.5)
    pub fn harmonic_complexity(mut self, v: f32) -> Self {
        self.harmonic_complexity = Some(v);
        self
    }

    /// Feature origin marker (default: measured)
    pub fn origin(mut self, origin: FeatureOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Finalize, substituting documented defaults for unset fields
    pub fn build(self) -> FeatureVector {
        let origin = self.origin.unwrap_or(FeatureOrigin::Measured);

        let provided_required = match origin {
            // Estimated inputs never count as provided, whatever was set
            FeatureOrigin::Estimated => 0,
            FeatureOrigin::Measured => [
                self.tempo_bpm.is_some(),
                self.danceability.is_some(),
                self.energy.is_some(),
                self.valence.is_some(),
            ]
            .iter()
            .filter(|&&p| p)
            .count() as u8,
        };

        let tempo_bpm = self.tempo_bpm.unwrap_or(120.0).clamp(60.0, 200.0);

        FeatureVector {
            values: [
                self.danceability.unwrap_or(0.5).clamp(0.0, 1.0),
                self.energy.unwrap_or(0.5).clamp(0.0, 1.0),
                self.valence.unwrap_or(0.5).clamp(0.0, 1.0),
                self.acousticness.unwrap_or(0.5).clamp(0.0, 1.0),
                self.instrumentalness.unwrap_or(0.5).clamp(0.0, 1.0),
                self.liveness.unwrap_or(0.5).clamp(0.0, 1.0),
                self.speechiness.unwrap_or(0.5).clamp(0.0, 1.0),
                normalize_tempo(tempo_bpm),
                self.rhythm_strength.unwrap_or(0.5).clamp(0.0, 1.0),
                self.beat_confidence.unwrap_or(0.5).clamp(0.0, 1.0),
                self.key_confidence.unwrap_or(0.5).clamp(0.0, 1.0),
                self.harmonic_complexity.unwrap_or(0.5).clamp(0.0, 1.0),
            ],
            tempo_bpm,
            key: self.key.unwrap_or(PitchClass::C),
            mode: self.mode.unwrap_or(Mode::Major),
            origin,
            provided_required,
        }
    }
}

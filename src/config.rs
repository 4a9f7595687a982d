//! Configuration parameters for feature extraction and scoring

use std::time::Duration;

/// Engine configuration parameters
#[derive(Debug, Clone)]
pub struct EngineConfig {
    // STFT parameters
    /// Frame size for spectral analysis (default: 2048)
    pub frame_size: usize,

    /// Hop size between frames (default: 512)
    pub hop_size: usize,

    // Temporal analysis
    /// Onset detection amplitude threshold (default: 0.1)
    /// A rising edge through this level counts as an onset
    pub onset_threshold: f32,

    /// Minimum reportable tempo in BPM (default: 60.0)
    pub min_bpm: f32,

    /// Maximum reportable tempo in BPM (default: 200.0)
    pub max_bpm: f32,

    // Spectral descriptors
    /// Cumulative-magnitude fraction for the rolloff frequency (default: 0.85)
    pub rolloff_fraction: f32,

    /// Reference tuning frequency in Hz for chroma mapping (default: 440.0, A4)
    pub reference_frequency: f32,

    /// Spectral peak count treated as maximal harmonic complexity (default: 100)
    pub complexity_peak_cap: usize,

    // Market signals
    /// Timeout for the market-signal provider fetch (default: 2s)
    /// On expiry the built-in default snapshot is substituted
    pub market_fetch_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_size: 2048,
            hop_size: 512,
            onset_threshold: 0.1,
            min_bpm: 60.0,
            max_bpm: 200.0,
            rolloff_fraction: 0.85,
            reference_frequency: 440.0,
            complexity_peak_cap: 100,
            market_fetch_timeout: Duration::from_secs(2),
        }
    }
}

//! Analysis modules
//!
//! The signal-processing half of the engine:
//! - Spectral analysis (FFT descriptors)
//! - Temporal analysis (onsets, tempo, loudness)
//! - Tonal analysis (chromagram, key, mode)
//! - Perceptual feature synthesis
//! - Feature record types and the normalized vector

pub mod features;
pub mod perceptual;
pub mod spectral;
pub mod temporal;
pub mod tonal;

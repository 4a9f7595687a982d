//! Error types for the success-scoring engine

use std::fmt;

/// Errors that can occur during feature extraction or scoring
#[derive(Debug, Clone)]
pub enum EngineError {
    /// Invalid input parameters
    InvalidInput(String),

    /// Audio decoding error reported by an upstream decoder
    Decode(String),

    /// Processing error during analysis
    Processing(String),

    /// Numerical error (overflow, underflow, degenerate spectrum)
    Numerical(String),

    /// Market-signal provider failure
    MarketSignal(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            EngineError::Decode(msg) => write!(f, "Decode error: {}", msg),
            EngineError::Processing(msg) => write!(f, "Processing error: {}", msg),
            EngineError::Numerical(msg) => write!(f, "Numerical error: {}", msg),
            EngineError::MarketSignal(msg) => write!(f, "Market signal error: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

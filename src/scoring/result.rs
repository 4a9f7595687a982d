//! Scoring result types

use serde::{Deserialize, Serialize};

use crate::analysis::features::FeatureOrigin;
use crate::scoring::risk::RiskAssessment;

/// Recommendation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    /// Mix/production changes
    Production,
    /// Promotion and campaign work
    Marketing,
    /// Platform and channel strategy
    Distribution,
    /// Insights about an already-released track
    Performance,
    /// Composition and arrangement changes
    Arrangement,
    /// Audience targeting
    Audience,
    /// Genre positioning
    Genre,
    /// Release timing
    Timing,
}

/// Recommendation priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Act on this first
    High,
    /// Worth doing
    Medium,
    /// Nice to have
    Low,
}

/// A single prioritized recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Category the advice belongs to
    pub category: RecommendationCategory,
    /// Priority level
    pub priority: Priority,
    /// Short title
    pub title: String,
    /// What was observed and why it matters
    pub description: String,
    /// Expected impact in [0, 100]; output is sorted descending by this
    pub impact: f32,
    /// Concrete next step
    pub implementation: String,
}

/// Per-component score breakdown, each in [0, 100]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Audio-features ensemble score
    pub audio_features: f32,
    /// Market-trends alignment score (flat 50 without a snapshot)
    pub market_trends: f32,
    /// Genre-alignment score
    pub genre_alignment: f32,
    /// Seasonal release-timing score (flat 50 without a release month)
    pub seasonal_factors: f32,
}

/// The complete success assessment for one track
///
/// A pure function of its inputs: identical features, genre, release date
/// and market snapshot always produce an identical record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessScoreResult {
    /// Overall score in [0, 100]
    pub overall_score: f32,

    /// Assessment confidence in [0, 1]
    pub confidence: f32,

    /// Per-component breakdown
    pub breakdown: ScoreBreakdown,

    /// Recommendations, sorted by impact descending
    pub recommendations: Vec<Recommendation>,

    /// Risk factor descriptions (mirrors `risk.risk_factors`)
    pub risk_factors: Vec<String>,

    /// Structured risk assessment
    pub risk: RiskAssessment,

    /// Market potential in [0, 100]
    pub market_potential: f32,

    /// Social/viral potential in [0, 100]
    pub social_score: f32,

    /// Whether the underlying features were measured or estimated
    pub feature_origin: FeatureOrigin,
}

//! Scoring modules
//!
//! The multi-criteria half of the engine:
//! - Genre reference tables
//! - Market trend signals and the provider seam
//! - Seasonal release-timing factors
//! - The success scorer (ensemble + breakdown + confidence)
//! - Recommendations and risk assessment
//! - Result types

pub mod genre;
pub mod market;
pub mod recommend;
pub mod result;
pub mod risk;
pub mod scorer;
pub mod seasonal;

use chrono::NaiveDate;

use crate::scoring::market::MarketTrendsSnapshot;

/// Contextual inputs for one scoring request
///
/// Everything here is optional; the scorer substitutes documented defaults
/// for whatever is missing and never fails on absent context.
#[derive(Debug, Clone, Default)]
pub struct ScoringContext {
    /// Declared genre; unknown names resolve to the default profile
    pub genre: Option<String>,

    /// Planned or actual release date; drives the seasonal component
    pub release_date: Option<NaiveDate>,

    /// Whether the track is already released; swaps production
    /// recommendations to performance insights
    pub released: bool,

    /// Month (1-12) to evaluate timing advice against when no release date
    /// is given; keeps scoring a pure function rather than reading the
    /// wall clock
    pub assessment_month: Option<u32>,

    /// Pre-fetched market snapshot; absent means built-in defaults
    pub market_trends: Option<MarketTrendsSnapshot>,
}

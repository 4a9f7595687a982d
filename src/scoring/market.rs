//! Market trend signals
//!
//! The aggregated market snapshot consumed by the scorer, the provider
//! trait external collaborators implement, and the timeout-guarded fetch.
//! The fetch is the engine's only async (and only cancellable) operation;
//! on failure or timeout it degrades to the built-in default snapshot and
//! never blocks scoring.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::scoring::genre::FeatureRange;
use crate::scoring::seasonal::SEASONAL_FACTORS;

/// Market appetite per energy tier, each in [0, 1]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnergyTiers {
    /// Appetite for low-energy tracks (energy < 0.4)
    pub low: f32,
    /// Appetite for medium-energy tracks (0.4 <= energy <= 0.7)
    pub medium: f32,
    /// Appetite for high-energy tracks (energy > 0.7)
    pub high: f32,
}

impl EnergyTiers {
    /// Appetite weight for the tier `energy` falls into
    pub fn weight_for(&self, energy: f32) -> f32 {
        if energy < 0.4 {
            self.low
        } else if energy > 0.7 {
            self.high
        } else {
            self.medium
        }
    }
}

/// Aggregated market-trend snapshot
///
/// Externally supplied and optional: every consumer must behave identically
/// with the built-in defaults when no snapshot is available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketTrendsSnapshot {
    /// Genre name -> trend strength in [0, 1]
    pub trending_genres: HashMap<String, f32>,

    /// Market-optimal tempo range in BPM
    pub optimal_tempo: FeatureRange,

    /// Key name (e.g. "C", "Am") -> popularity in [0, 1]
    pub popular_keys: HashMap<String, f32>,

    /// Appetite per energy tier
    pub energy_tiers: EnergyTiers,

    /// Month-indexed demand multipliers (index 0 = January)
    pub seasonal_factors: [f32; 12],
}

/// Built-in default snapshot, used when no provider data is available
static DEFAULT_SNAPSHOT: Lazy<MarketTrendsSnapshot> = Lazy::new(|| MarketTrendsSnapshot {
    trending_genres: [
        ("Pop", 0.90),
        ("Hip-Hop", 0.95),
        ("Electronic", 0.80),
        ("Latin", 0.85),
        ("Rock", 0.60),
        ("R&B", 0.70),
        ("Country", 0.65),
        ("Indie", 0.55),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect(),
    optimal_tempo: FeatureRange::new(90.0, 140.0, 118.0),
    popular_keys: [
        ("C", 0.80),
        ("G", 0.75),
        ("D", 0.65),
        ("A", 0.70),
        ("F", 0.60),
        ("Am", 0.70),
        ("Em", 0.65),
        ("Dm", 0.55),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect(),
    energy_tiers: EnergyTiers {
        low: 0.40,
        medium: 0.75,
        high: 0.90,
    },
    seasonal_factors: SEASONAL_FACTORS,
});

impl MarketTrendsSnapshot {
    /// The built-in default snapshot
    pub fn default_snapshot() -> &'static MarketTrendsSnapshot {
        &DEFAULT_SNAPSHOT
    }
}

/// External source of market-trend snapshots
///
/// Implementations may be slow or fallible; callers go through
/// [`fetch_market_trends`], which bounds the call with a timeout and
/// substitutes the default snapshot on any failure.
pub trait MarketSignalProvider {
    /// Fetch the current market-trend snapshot
    fn current_trends(
        &self,
    ) -> impl Future<Output = Result<MarketTrendsSnapshot, EngineError>> + Send;
}

/// Fetch market trends with a timeout, degrading to the default snapshot
///
/// Never returns an error and never blocks past `timeout`: a provider
/// failure or an expired timeout both log a warning and yield the built-in
/// defaults, matching the behavior of scoring with no snapshot at all.
pub async fn fetch_market_trends<P>(provider: &P, timeout: Duration) -> MarketTrendsSnapshot
where
    P: MarketSignalProvider + Sync,
{
    match tokio::time::timeout(timeout, provider.current_trends()).await {
        Ok(Ok(snapshot)) => snapshot,
        Ok(Err(e)) => {
            log::warn!("Market signal provider failed ({}), using default snapshot", e);
            MarketTrendsSnapshot::default_snapshot().clone()
        }
        Err(_) => {
            log::warn!(
                "Market signal provider timed out after {:?}, using default snapshot",
                timeout
            );
            MarketTrendsSnapshot::default_snapshot().clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct InstantProvider;

    impl MarketSignalProvider for InstantProvider {
        async fn current_trends(&self) -> Result<MarketTrendsSnapshot, EngineError> {
            let mut snapshot = MarketTrendsSnapshot::default_snapshot().clone();
            snapshot.optimal_tempo = FeatureRange::new(100.0, 130.0, 124.0);
            Ok(snapshot)
        }
    }

    struct SlowProvider;

    impl MarketSignalProvider for SlowProvider {
        async fn current_trends(&self) -> Result<MarketTrendsSnapshot, EngineError> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(MarketTrendsSnapshot::default_snapshot().clone())
        }
    }

    struct FailingProvider;

    impl MarketSignalProvider for FailingProvider {
        async fn current_trends(&self) -> Result<MarketTrendsSnapshot, EngineError> {
            Err(EngineError::MarketSignal("upstream 503".to_string()))
        }
    }

    #[tokio::test]
    async fn test_fetch_uses_provider_snapshot() {
        let snapshot = fetch_market_trends(&InstantProvider, Duration::from_secs(1)).await;
        assert_eq!(snapshot.optimal_tempo.peak, 124.0);
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_defaults() {
        let snapshot = fetch_market_trends(&SlowProvider, Duration::from_millis(10)).await;
        assert_eq!(
            snapshot.optimal_tempo.peak,
            MarketTrendsSnapshot::default_snapshot().optimal_tempo.peak
        );
    }

    #[tokio::test]
    async fn test_provider_error_falls_back_to_defaults() {
        let snapshot = fetch_market_trends(&FailingProvider, Duration::from_secs(1)).await;
        assert_eq!(
            snapshot.energy_tiers.high,
            MarketTrendsSnapshot::default_snapshot().energy_tiers.high
        );
    }

    #[test]
    fn test_energy_tier_buckets() {
        let tiers = EnergyTiers {
            low: 0.1,
            medium: 0.5,
            high: 0.9,
        };
        assert_eq!(tiers.weight_for(0.2), 0.1);
        assert_eq!(tiers.weight_for(0.4), 0.5);
        assert_eq!(tiers.weight_for(0.7), 0.5);
        assert_eq!(tiers.weight_for(0.85), 0.9);
    }
}

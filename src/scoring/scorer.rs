//! Success scoring
//!
//! Combines the normalized feature vector with the genre profile, optional
//! market snapshot and optional release date into the overall assessment.
//!
//! The audio-features component is an ensemble of three algorithms:
//!
//! 1. Linear: genre-weighted sum of per-feature range scores
//! 2. Sigmoid: mean of a sigmoid transform over the full feature vector
//! 3. Rule: explicit bonus thresholds for the named genres, with a generic
//!    additive fallback
//!
//! Component weights for the overall score: audio 40%, market 30%, genre
//! alignment 20%, seasonal 10%. Every component stays in [0, 100] and the
//! whole computation is a pure function of its inputs.

use chrono::Datelike;

use crate::analysis::features::{FeatureVector, Mode};
use crate::scoring::genre::{profile_for, FeatureRange, GenreProfile};
use crate::scoring::market::MarketTrendsSnapshot;
use crate::scoring::recommend::recommend;
use crate::scoring::result::{ScoreBreakdown, SuccessScoreResult};
use crate::scoring::risk::assess_risk;
use crate::scoring::seasonal;
use crate::scoring::ScoringContext;

/// Component weights for the overall score
const AUDIO_WEIGHT: f32 = 0.4;
const MARKET_WEIGHT: f32 = 0.3;
const GENRE_WEIGHT: f32 = 0.2;
const SEASONAL_WEIGHT: f32 = 0.1;

/// Ensemble weights for the audio-features score
const LINEAR_WEIGHT: f32 = 0.4;
const SIGMOID_WEIGHT: f32 = 0.3;
const RULE_WEIGHT: f32 = 0.3;

/// Score a single feature value against an optimal range
///
/// Inside the range the score decays linearly with distance from the peak,
/// floored at 0.7; outside it decays with distance to the nearest bound,
/// floored at 0. Monotonic in |value - peak| within the range.
pub fn feature_score(value: f32, range: FeatureRange) -> f32 {
    if range.contains(value) {
        let half_span = (range.max - range.min) / 2.0;
        if half_span <= f32::EPSILON {
            return 1.0;
        }
        (1.0 - 0.3 * (value - range.peak).abs() / half_span).max(0.7)
    } else {
        let distance = if value < range.min {
            range.min - value
        } else {
            value - range.max
        };
        (0.7 - 0.1 * distance).max(0.0)
    }
}

/// Feature values in the scoring order shared by weights and ranges
/// (seven perceptual features plus tempo in BPM)
fn scored_values(features: &FeatureVector) -> [f32; 8] {
    [
        features.danceability(),
        features.energy(),
        features.valence(),
        features.acousticness(),
        features.instrumentalness(),
        features.liveness(),
        features.speechiness(),
        features.tempo_bpm,
    ]
}

/// Linear algorithm: genre-weighted sum of per-feature range scores × 100
pub fn linear_score(features: &FeatureVector, profile: &GenreProfile) -> f32 {
    let values = scored_values(features);
    let weights = profile.weights.as_array();
    let ranges = profile.optimal.as_array();

    let sum: f32 = values
        .iter()
        .zip(weights.iter())
        .zip(ranges.iter())
        .map(|((&v, &w), &r)| w * feature_score(v, r))
        .sum();

    (sum * 100.0).clamp(0.0, 100.0)
}

/// Sigmoid algorithm: mean of `1/(1+e^(-5(x-0.5)))` over the vector × 100
pub fn sigmoid_score(features: &FeatureVector) -> f32 {
    let sum: f32 = features
        .values
        .iter()
        .map(|&x| 1.0 / (1.0 + (-5.0 * (x - 0.5)).exp()))
        .sum();

    (sum / features.values.len() as f32 * 100.0).clamp(0.0, 100.0)
}

/// Rule algorithm: explicit per-genre bonus thresholds, generic fallback
///
/// Named genres start at 50 and collect fixed bonuses for hitting their
/// signature marks; other genres get an additive in-range count. Capped at
/// 100 either way.
pub fn rule_score(features: &FeatureVector, profile: &GenreProfile) -> f32 {
    let d = features.danceability();
    let e = features.energy();
    let v = features.valence();
    let tempo = features.tempo_bpm;

    let score = match profile.name {
        "Pop" => {
            let mut s = 50.0;
            if d > 0.7 {
                s += 15.0;
            }
            if (0.6..=0.9).contains(&e) {
                s += 15.0;
            }
            if (100.0..=140.0).contains(&tempo) {
                s += 10.0;
            }
            if v > 0.6 {
                s += 10.0;
            }
            s
        }
        "Hip-Hop" => {
            let mut s = 50.0;
            if d > 0.75 {
                s += 20.0;
            }
            if features.speechiness() > 0.15 {
                s += 15.0;
            }
            if (80.0..=110.0).contains(&tempo) {
                s += 10.0;
            }
            if e > 0.6 {
                s += 5.0;
            }
            s
        }
        "Electronic" => {
            let mut s = 50.0;
            if e > 0.75 {
                s += 20.0;
            }
            if d > 0.75 {
                s += 15.0;
            }
            if (120.0..=150.0).contains(&tempo) {
                s += 10.0;
            }
            if features.instrumentalness() > 0.5 {
                s += 5.0;
            }
            s
        }
        "Rock" => {
            let mut s = 50.0;
            if e > 0.7 {
                s += 20.0;
            }
            if features.liveness() > 0.2 {
                s += 10.0;
            }
            if (110.0..=160.0).contains(&tempo) {
                s += 10.0;
            }
            if v > 0.5 {
                s += 10.0;
            }
            s
        }
        "Latin" => {
            let mut s = 50.0;
            if d > 0.75 {
                s += 20.0;
            }
            if v > 0.65 {
                s += 15.0;
            }
            if (90.0..=140.0).contains(&tempo) {
                s += 10.0;
            }
            if e > 0.6 {
                s += 5.0;
            }
            s
        }
        _ => {
            // Generic additive fallback: credit per in-range feature
            let values = scored_values(features);
            let ranges = profile.optimal.as_array();
            let in_range = values
                .iter()
                .zip(ranges.iter())
                .filter(|(&v, r)| r.contains(v))
                .count();
            40.0 + 7.5 * in_range as f32
        }
    };

    score.min(100.0)
}

/// Ensemble audio-features score
pub fn audio_features_score(features: &FeatureVector, profile: &GenreProfile) -> f32 {
    let linear = linear_score(features, profile);
    let sigmoid = sigmoid_score(features);
    let rule = rule_score(features, profile);

    log::debug!(
        "Audio ensemble: linear {:.1}, sigmoid {:.1}, rule {:.1}",
        linear,
        sigmoid,
        rule
    );

    (LINEAR_WEIGHT * linear + SIGMOID_WEIGHT * sigmoid + RULE_WEIGHT * rule).clamp(0.0, 100.0)
}

/// Market-trends score: base 50 plus capped alignment bonuses
///
/// Without a snapshot the score is a flat 50.
pub fn market_trends_score(
    features: &FeatureVector,
    snapshot: Option<&MarketTrendsSnapshot>,
) -> f32 {
    let Some(snapshot) = snapshot else {
        return 50.0;
    };

    let mut score = 50.0;

    // Tempo alignment bonus, up to 20
    let tempo = features.tempo_bpm;
    let range = snapshot.optimal_tempo;
    if range.contains(tempo) {
        let half_span = (range.max - range.min) / 2.0;
        let closeness = if half_span <= f32::EPSILON {
            1.0
        } else {
            (1.0 - (tempo - range.peak).abs() / half_span).clamp(0.0, 1.0)
        };
        score += 20.0 * closeness;
    }

    // Key popularity bonus, up to 15
    let key_name = match features.mode {
        Mode::Major => features.key.name().to_string(),
        Mode::Minor => format!("{}m", features.key.name()),
    };
    if let Some(&weight) = snapshot.popular_keys.get(&key_name) {
        score += 15.0 * weight.clamp(0.0, 1.0);
    }

    // Energy tier bonus, up to 15
    score += 15.0 * snapshot.energy_tiers.weight_for(features.energy()).clamp(0.0, 1.0);

    score.clamp(0.0, 100.0)
}

/// Genre-alignment score over danceability, energy, valence and tempo
///
/// Each feature contributes 25 when inside the genre's optimal range and 10
/// otherwise, so the score spans [40, 100].
pub fn genre_alignment_score(features: &FeatureVector, profile: &GenreProfile) -> f32 {
    let checks = [
        (features.danceability(), profile.optimal.danceability),
        (features.energy(), profile.optimal.energy),
        (features.valence(), profile.optimal.valence),
        (features.tempo_bpm, profile.optimal.tempo),
    ];

    checks
        .iter()
        .map(|(v, r)| if r.contains(*v) { 25.0 } else { 10.0 })
        .sum::<f32>()
        .clamp(0.0, 100.0)
}

/// Canonical confidence computation, clamped to [0, 1]
///
/// `0.5 base + 0.3 * provided_required/4 + 0.1 if genre + 0.1 if snapshot`.
/// Estimated feature vectors report zero provided required features, so
/// the estimated path is visibly lower-confidence.
pub fn confidence(features: &FeatureVector, genre_given: bool, snapshot_given: bool) -> f32 {
    let mut c = 0.5 + (features.provided_required.min(4) as f32 / 4.0) * 0.3;
    if genre_given {
        c += 0.1;
    }
    if snapshot_given {
        c += 0.1;
    }
    c.clamp(0.0, 1.0)
}

/// Market potential: overall score scaled by the genre category multiplier
pub fn market_potential(overall_score: f32, profile: &GenreProfile) -> f32 {
    (overall_score * profile.category.market_multiplier()).clamp(0.0, 100.0)
}

/// Social score: shareability proxy scaled by the genre category multiplier
pub fn social_score(features: &FeatureVector, profile: &GenreProfile) -> f32 {
    let base = 0.5 * features.danceability() + 0.3 * features.energy() + 0.2 * features.valence();
    (base * 100.0 * profile.category.social_multiplier()).clamp(0.0, 100.0)
}

/// Produce the complete success assessment for a feature vector
///
/// Pure and deterministic: identical inputs yield identical outputs.
pub fn score_features(features: &FeatureVector, context: &ScoringContext) -> SuccessScoreResult {
    let profile = profile_for(context.genre.as_deref());
    let snapshot = context.market_trends.as_ref();
    let release_month = context.release_date.map(|d| d.month());

    let audio = audio_features_score(features, profile);
    let market = market_trends_score(features, snapshot);
    let genre_alignment = genre_alignment_score(features, profile);
    let seasonal_component = seasonal::seasonal_score(release_month);

    let overall_score = (AUDIO_WEIGHT * audio
        + MARKET_WEIGHT * market
        + GENRE_WEIGHT * genre_alignment
        + SEASONAL_WEIGHT * seasonal_component)
        .round()
        .clamp(0.0, 100.0);

    let breakdown = ScoreBreakdown {
        audio_features: audio,
        market_trends: market,
        genre_alignment,
        seasonal_factors: seasonal_component,
    };

    let risk = assess_risk(features, profile);
    let timing_month = release_month.or(context.assessment_month);
    let recommendations = recommend(
        features,
        overall_score,
        profile,
        timing_month,
        context.released,
    );

    log::debug!(
        "Scored track: overall {:.0}, audio {:.1}, market {:.1}, genre {:.1}, seasonal {:.1}",
        overall_score,
        audio,
        market,
        genre_alignment,
        seasonal_component
    );

    SuccessScoreResult {
        overall_score,
        confidence: confidence(features, context.genre.is_some(), snapshot.is_some()),
        breakdown,
        recommendations,
        risk_factors: risk.risk_factors.clone(),
        market_potential: market_potential(overall_score, profile),
        social_score: social_score(features, profile),
        feature_origin: features.origin,
        risk,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::features::{FeatureOrigin, FeatureVector, PitchClass};

    fn pop_track() -> FeatureVector {
        FeatureVector::builder()
            .tempo_bpm(120.0)
            .danceability(0.8)
            .energy(0.75)
            .valence(0.7)
            .build()
    }

    fn pop_context() -> ScoringContext {
        ScoringContext {
            genre: Some("Pop".to_string()),
            ..ScoringContext::default()
        }
    }

    #[test]
    fn test_feature_score_peak_is_maximal() {
        let range = FeatureRange::new(0.6, 0.9, 0.75);
        assert!((feature_score(0.75, range) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_feature_score_monotonic_inside_range() {
        let range = FeatureRange::new(0.0, 1.0, 0.5);
        let mut prev = feature_score(0.5, range);
        for step in 1..=10 {
            let v = 0.5 + step as f32 * 0.05;
            let s = feature_score(v, range);
            assert!(
                s <= prev + 1e-6,
                "Score should not increase away from peak: {} at {}",
                s,
                v
            );
            prev = s;
        }
    }

    #[test]
    fn test_feature_score_floors() {
        let range = FeatureRange::new(0.4, 0.6, 0.5);
        // Inside: floored at 0.7
        assert!(feature_score(0.41, range) >= 0.7);
        // Far outside: floored at 0
        assert_eq!(feature_score(50.0, range), 0.0);
    }

    #[test]
    fn test_market_score_defaults_to_fifty_without_snapshot() {
        assert_eq!(market_trends_score(&pop_track(), None), 50.0);
    }

    #[test]
    fn test_market_score_bonuses_are_capped() {
        let snapshot = MarketTrendsSnapshot::default_snapshot();
        let features = FeatureVector::builder()
            .tempo_bpm(118.0)
            .energy(0.8)
            .key(PitchClass::C)
            .build();
        let score = market_trends_score(&features, Some(snapshot));
        // 50 + 20 (exact tempo peak) + 15*0.8 (C major) + 15*0.9 (high tier)
        assert!(score > 50.0);
        assert!(score <= 100.0);
        assert!((score - (50.0 + 20.0 + 12.0 + 13.5)).abs() < 0.1);
    }

    #[test]
    fn test_genre_alignment_bounds() {
        let aligned = genre_alignment_score(&pop_track(), profile_for(Some("Pop")));
        assert_eq!(aligned, 100.0);

        let misaligned = FeatureVector::builder()
            .tempo_bpm(200.0)
            .danceability(0.1)
            .energy(0.1)
            .valence(0.1)
            .build();
        let score = genre_alignment_score(&misaligned, profile_for(Some("Pop")));
        assert_eq!(score, 40.0);
    }

    #[test]
    fn test_pop_scenario_lands_in_documented_band() {
        let result = score_features(&pop_track(), &pop_context());
        assert!(
            (65.0..=90.0).contains(&result.overall_score),
            "Pop scenario should land in [65, 90], got {}",
            result.overall_score
        );
        assert_eq!(result.breakdown.market_trends, 50.0);
        assert_eq!(result.breakdown.seasonal_factors, 50.0);
    }

    #[test]
    fn test_breakdown_components_bounded() {
        let extreme = FeatureVector::builder()
            .tempo_bpm(200.0)
            .danceability(1.0)
            .energy(1.0)
            .valence(1.0)
            .acousticness(1.0)
            .instrumentalness(1.0)
            .liveness(1.0)
            .speechiness(1.0)
            .build();
        for genre in [Some("Pop"), Some("Electronic"), Some("Nonexistent"), None] {
            let context = ScoringContext {
                genre: genre.map(|g| g.to_string()),
                ..ScoringContext::default()
            };
            let result = score_features(&extreme, &context);
            assert!((0.0..=100.0).contains(&result.overall_score));
            assert!((0.0..=100.0).contains(&result.breakdown.audio_features));
            assert!((0.0..=100.0).contains(&result.breakdown.market_trends));
            assert!((0.0..=100.0).contains(&result.breakdown.genre_alignment));
            assert!((0.0..=100.0).contains(&result.breakdown.seasonal_factors));
            assert!((0.0..=1.0).contains(&result.confidence));
            assert!((0.0..=100.0).contains(&result.market_potential));
            assert!((0.0..=100.0).contains(&result.social_score));
        }
    }

    #[test]
    fn test_confidence_components() {
        let full = pop_track();
        assert!((confidence(&full, true, true) - 1.0).abs() < 1e-6);
        assert!((confidence(&full, false, false) - 0.8).abs() < 1e-6);

        let none = FeatureVector::builder().build();
        assert!((confidence(&none, false, false) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_estimated_features_lower_confidence() {
        let estimated = FeatureVector::builder()
            .tempo_bpm(120.0)
            .danceability(0.8)
            .energy(0.75)
            .valence(0.7)
            .origin(FeatureOrigin::Estimated)
            .build();
        let result = score_features(&estimated, &pop_context());
        let measured = score_features(&pop_track(), &pop_context());
        assert!(result.confidence < measured.confidence);
        assert_eq!(result.feature_origin, FeatureOrigin::Estimated);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let features = pop_track();
        let context = pop_context();
        let a = serde_json::to_string(&score_features(&features, &context)).unwrap();
        let b = serde_json::to_string(&score_features(&features, &context)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_genre_never_panics() {
        let context = ScoringContext {
            genre: Some("Zydeco Dubstep Fusion".to_string()),
            ..ScoringContext::default()
        };
        let result = score_features(&pop_track(), &context);
        assert!((0.0..=100.0).contains(&result.overall_score));
    }

    #[test]
    fn test_recommendations_sorted_by_impact() {
        let weak = FeatureVector::builder()
            .tempo_bpm(70.0)
            .danceability(0.2)
            .energy(0.2)
            .valence(0.2)
            .build();
        let result = score_features(&weak, &pop_context());
        assert!(!result.recommendations.is_empty());
        for pair in result.recommendations.windows(2) {
            assert!(
                pair[0].impact >= pair[1].impact,
                "Recommendations must be impact-descending"
            );
        }
    }
}

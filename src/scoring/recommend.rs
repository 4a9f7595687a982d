//! Recommendation engine
//!
//! Converts the feature vector and scores into prioritized, explainable
//! recommendations. Threshold rules emit zero or more records per feature;
//! for already-released tracks the production-category triggers swap to
//! performance-category insight variants with the same thresholds, so the
//! same weaknesses surface either way, phrased as observations instead of
//! studio advice.

use crate::analysis::features::FeatureVector;
use crate::scoring::genre::GenreProfile;
use crate::scoring::result::{Priority, Recommendation, RecommendationCategory};
use crate::scoring::seasonal;

/// A production-rule trigger: prescriptive before release, descriptive after
struct ProductionRule {
    impact: f32,
    priority: Priority,
    title: &'static str,
    advice: &'static str,
    advice_implementation: &'static str,
    insight: &'static str,
    insight_implementation: &'static str,
}

impl ProductionRule {
    fn emit(&self, released: bool) -> Recommendation {
        if released {
            Recommendation {
                category: RecommendationCategory::Performance,
                priority: self.priority,
                title: self.title.to_string(),
                description: self.insight.to_string(),
                impact: self.impact,
                implementation: self.insight_implementation.to_string(),
            }
        } else {
            Recommendation {
                category: RecommendationCategory::Production,
                priority: self.priority,
                title: self.title.to_string(),
                description: self.advice.to_string(),
                impact: self.impact,
                implementation: self.advice_implementation.to_string(),
            }
        }
    }
}

/// Generate recommendations for a scored track
///
/// # Arguments
///
/// * `features` - Normalized feature vector
/// * `overall_score` - Final overall score, for the marketing tier
/// * `profile` - Resolved genre profile
/// * `timing_month` - Month (1-12) for the seasonal timing advice; `None`
///   suppresses the timing recommendation
/// * `released` - Swaps production triggers to performance insights
///
/// # Returns
///
/// Recommendations sorted descending by impact (stable order for ties).
pub fn recommend(
    features: &FeatureVector,
    overall_score: f32,
    profile: &GenreProfile,
    timing_month: Option<u32>,
    released: bool,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    // Production-threshold triggers (insight variants when released)
    if features.energy() < 0.4 {
        recs.push(
            ProductionRule {
                impact: 75.0,
                priority: Priority::High,
                title: "Raise the energy level",
                advice: "Energy sits well below the commercial comfort zone, which limits playlist and radio placement.",
                advice_implementation: "Add rhythmic drive, brighten the top end, or lift the chorus dynamics in the mix.",
                insight: "The track's low energy profile is likely constraining playlist and radio placement.",
                insight_implementation: "Factor the subdued energy into positioning; emphasize mood-based playlists over workout or party contexts.",
            }
            .emit(released),
        );
    }

    if features.energy() > 0.9 {
        recs.push(
            ProductionRule {
                impact: 40.0,
                priority: Priority::Medium,
                title: "Tame the peaks",
                advice: "Relentless maximum energy leaves no dynamic contrast for the hook to land.",
                advice_implementation: "Carve out a breakdown or pre-chorus dip to create contrast before the drop.",
                insight: "The track runs at maximum energy throughout, with little dynamic contrast.",
                insight_implementation: "Position toward high-intensity contexts (workout, gaming) where sustained energy is an asset.",
            }
            .emit(released),
        );
    }

    if features.danceability() < 0.5 {
        recs.push(
            ProductionRule {
                impact: 70.0,
                priority: Priority::High,
                title: "Strengthen the groove",
                advice: "Danceability is below the mainstream threshold; the rhythm is not carrying the track.",
                advice_implementation: "Tighten the drum programming and anchor the low end to a steadier pulse.",
                insight: "Low danceability suggests the track will underperform on dance and party playlists.",
                insight_implementation: "Pitch to listening-focused editorial playlists rather than dance contexts.",
            }
            .emit(released),
        );
    }

    if features.values[9] < 0.3 {
        // beat confidence
        recs.push(
            ProductionRule {
                impact: 60.0,
                priority: Priority::Medium,
                title: "Tighten the rhythm section",
                advice: "Beat placement is irregular enough that the pulse is hard to lock onto.",
                advice_implementation: "Quantize or re-track the rhythm section against a fixed grid.",
                insight: "An unstable pulse was detected, which tends to depress repeat listens on rhythmic playlists.",
                insight_implementation: "Highlight the track's loose, organic feel in positioning rather than fighting it.",
            }
            .emit(released),
        );
    }

    // Arrangement
    if features.valence() < 0.3 {
        recs.push(Recommendation {
            category: RecommendationCategory::Arrangement,
            priority: Priority::Medium,
            title: "Brighten the arrangement".to_string(),
            description: "Valence is very low; dark tracks trade reach for niche depth.".to_string(),
            impact: 55.0,
            implementation: "Consider a major-lift section or brighter instrumentation in the final chorus.".to_string(),
        });
    }

    if features.speechiness() > 0.5 {
        recs.push(Recommendation {
            category: RecommendationCategory::Arrangement,
            priority: Priority::Medium,
            title: "Balance vocals and music".to_string(),
            description: "Speech content dominates the spectrum; the track reads closer to spoken word than song.".to_string(),
            impact: 45.0,
            implementation: "Add melodic hooks between verses or trim extended spoken passages.".to_string(),
        });
    }

    // Marketing fit for instrumental material
    if features.instrumentalness() > 0.7 {
        recs.push(Recommendation {
            category: RecommendationCategory::Marketing,
            priority: Priority::Medium,
            title: "Pitch to instrumental playlists".to_string(),
            description: "Strong instrumental character fits focus, study and ambient editorial lanes.".to_string(),
            impact: 50.0,
            implementation: "Submit to instrumental and functional playlists; license for sync opportunities.".to_string(),
        });
    }

    // Audience fit for live character
    if features.liveness() > 0.7 {
        recs.push(Recommendation {
            category: RecommendationCategory::Audience,
            priority: Priority::Medium,
            title: "Lean into the live sound".to_string(),
            description: "High liveness suggests the recording carries a concert feel that live-music audiences reward.".to_string(),
            impact: 45.0,
            implementation: "Target live-session playlists and pair the release with performance video content.".to_string(),
        });
    }

    // Genre positioning when acousticness escapes the profile's range
    if features.acousticness() > profile.optimal.acousticness.max {
        recs.push(Recommendation {
            category: RecommendationCategory::Genre,
            priority: Priority::Low,
            title: "Re-evaluate genre positioning".to_string(),
            description: format!(
                "Acousticness is above the typical {} range; the declared genre may not be the best shelf.",
                profile.name
            ),
            impact: 40.0,
            implementation: "Test acoustic or singer-songwriter positioning alongside the declared genre.".to_string(),
        });
    }

    // Distribution: always point at the genre's strongest platform
    if let Some((platform, _)) = profile
        .platform_performance
        .iter()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    {
        recs.push(Recommendation {
            category: RecommendationCategory::Distribution,
            priority: Priority::Low,
            title: format!("Prioritize {}", platform),
            description: format!(
                "{} is the strongest-performing platform for {} releases.",
                platform, profile.name
            ),
            impact: 30.0,
            implementation: format!("Front-load promotion budget and premiere content on {}.", platform),
        });
    }

    // Marketing tier by overall-score bucket
    recs.push(marketing_tier(overall_score));

    // Seasonal timing advice
    if let Some(month) = timing_month {
        if let Some(rec) = timing_recommendation(month) {
            recs.push(rec);
        }
    }

    // Stable sort keeps equal-impact records in rule order
    recs.sort_by(|a, b| b.impact.partial_cmp(&a.impact).unwrap_or(std::cmp::Ordering::Equal));
    recs
}

/// Marketing recommendation for the overall-score bucket
fn marketing_tier(overall_score: f32) -> Recommendation {
    if overall_score >= 80.0 {
        Recommendation {
            category: RecommendationCategory::Marketing,
            priority: Priority::High,
            title: "Go wide".to_string(),
            description: "The assessment is strong across the board; the track can support a broad push.".to_string(),
            impact: 80.0,
            implementation: "Coordinate a wide release: editorial pitching, paid social, and radio servicing in the same window.".to_string(),
        }
    } else if overall_score >= 60.0 {
        Recommendation {
            category: RecommendationCategory::Marketing,
            priority: Priority::Medium,
            title: "Run a targeted campaign".to_string(),
            description: "The track shows clear strengths worth amplifying to the right audience segments.".to_string(),
            impact: 50.0,
            implementation: "Focus spend on the two or three audience segments that match the track's strongest features.".to_string(),
        }
    } else {
        Recommendation {
            category: RecommendationCategory::Marketing,
            priority: Priority::High,
            title: "Build momentum with a soft launch".to_string(),
            description: "The overall assessment is below the commercial threshold; a quiet rollout protects the artist brand.".to_string(),
            impact: 65.0,
            implementation: "Seed the track with core fans and micro-influencers before committing campaign budget.".to_string(),
        }
    }
}

/// Seasonal timing advice: delay below factor 1.0, accelerate above 1.1
fn timing_recommendation(month: u32) -> Option<Recommendation> {
    let factor = seasonal::factor(month);
    if factor < 1.0 {
        Some(Recommendation {
            category: RecommendationCategory::Timing,
            priority: Priority::Low,
            title: "Consider delaying the release".to_string(),
            description: format!(
                "Month {} carries a below-average demand multiplier ({:.2}).",
                month, factor
            ),
            impact: 35.0,
            implementation: "Shift the release window toward a higher-demand month if the campaign allows.".to_string(),
        })
    } else if factor > 1.1 {
        Some(Recommendation {
            category: RecommendationCategory::Timing,
            priority: Priority::Low,
            title: "Accelerate the release".to_string(),
            description: format!(
                "Month {} carries a peak demand multiplier ({:.2}).",
                month, factor
            ),
            impact: 35.0,
            implementation: "Lock the release into this window to ride the seasonal demand peak.".to_string(),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::features::FeatureVector;
    use crate::scoring::genre::profile_for;

    fn weak_track() -> FeatureVector {
        FeatureVector::builder()
            .tempo_bpm(70.0)
            .danceability(0.2)
            .energy(0.2)
            .valence(0.2)
            .beat_confidence(0.1)
            .build()
    }

    #[test]
    fn test_sorted_descending_by_impact() {
        let recs = recommend(&weak_track(), 45.0, profile_for(Some("Pop")), Some(2), false);
        assert!(recs.len() >= 4);
        for pair in recs.windows(2) {
            assert!(pair[0].impact >= pair[1].impact);
        }
    }

    #[test]
    fn test_released_swaps_production_to_performance() {
        let profile = profile_for(Some("Pop"));
        let unreleased = recommend(&weak_track(), 45.0, profile, None, false);
        let released = recommend(&weak_track(), 45.0, profile, None, true);

        let production_count = |recs: &[Recommendation]| {
            recs.iter()
                .filter(|r| r.category == RecommendationCategory::Production)
                .count()
        };
        let performance_count = |recs: &[Recommendation]| {
            recs.iter()
                .filter(|r| r.category == RecommendationCategory::Performance)
                .count()
        };

        assert!(production_count(&unreleased) > 0);
        assert_eq!(production_count(&released), 0);
        // Same thresholds fire, just recategorized
        assert_eq!(performance_count(&released), production_count(&unreleased));
        assert_eq!(unreleased.len(), released.len());
    }

    #[test]
    fn test_marketing_tier_buckets() {
        let profile = profile_for(Some("Pop"));
        let strong = FeatureVector::builder()
            .danceability(0.8)
            .energy(0.8)
            .valence(0.7)
            .build();

        let find_marketing = |recs: Vec<Recommendation>| {
            recs.into_iter()
                .find(|r| r.category == RecommendationCategory::Marketing)
                .expect("Marketing recommendation is always present")
        };

        let low = find_marketing(recommend(&strong, 45.0, profile, None, false));
        assert_eq!(low.title, "Build momentum with a soft launch");

        let mid = find_marketing(recommend(&strong, 70.0, profile, None, false));
        assert_eq!(mid.title, "Run a targeted campaign");

        let high = find_marketing(recommend(&strong, 85.0, profile, None, false));
        assert_eq!(high.title, "Go wide");
    }

    #[test]
    fn test_timing_recommendation_thresholds() {
        // February (0.90) suggests delaying
        let rec = timing_recommendation(2).unwrap();
        assert_eq!(rec.title, "Consider delaying the release");

        // December (1.20) suggests accelerating
        let rec = timing_recommendation(12).unwrap();
        assert_eq!(rec.title, "Accelerate the release");

        // April (1.00) is neutral
        assert!(timing_recommendation(4).is_none());
    }

    #[test]
    fn test_no_timing_advice_without_month() {
        let recs = recommend(&weak_track(), 45.0, profile_for(Some("Pop")), None, false);
        assert!(recs
            .iter()
            .all(|r| r.category != RecommendationCategory::Timing));
    }

    #[test]
    fn test_threshold_rules_emit_expected_titles() {
        let features = FeatureVector::builder()
            .danceability(0.8)
            .energy(0.8)
            .valence(0.2)
            .speechiness(0.6)
            .instrumentalness(0.8)
            .liveness(0.8)
            .acousticness(0.9)
            .build();
        let recs = recommend(&features, 70.0, profile_for(Some("Pop")), None, false);
        let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
        for expected in [
            "Brighten the arrangement",
            "Balance vocals and music",
            "Pitch to instrumental playlists",
            "Lean into the live sound",
            "Re-evaluate genre positioning",
        ] {
            assert!(titles.contains(&expected), "Missing recommendation: {}", expected);
        }
    }

    #[test]
    fn test_impacts_bounded() {
        let recs = recommend(&weak_track(), 45.0, profile_for(Some("Indie")), Some(12), false);
        for rec in recs {
            assert!((0.0..=100.0).contains(&rec.impact));
        }
    }
}

//! Genre reference tables
//!
//! Static, read-only profiles for the named genres plus a Pop-like default
//! used whenever the declared genre is unknown or unspecified. Constructed
//! once at first use and shared by reference; nothing mutates them per
//! request.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// An optimal value range with an interior peak
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeatureRange {
    /// Lower bound of the acceptable range
    pub min: f32,
    /// Upper bound of the acceptable range
    pub max: f32,
    /// Best value inside the range
    pub peak: f32,
}

impl FeatureRange {
    /// Shorthand constructor
    pub const fn new(min: f32, max: f32, peak: f32) -> Self {
        Self { min, max, peak }
    }

    /// Whether `value` lies inside [min, max]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Per-feature contribution weights for the linear scoring algorithm
///
/// Weights sum to approximately 1 per genre.
#[derive(Debug, Clone, Copy)]
pub struct FeatureWeights {
    /// Danceability weight
    pub danceability: f32,
    /// Energy weight
    pub energy: f32,
    /// Valence weight
    pub valence: f32,
    /// Acousticness weight
    pub acousticness: f32,
    /// Instrumentalness weight
    pub instrumentalness: f32,
    /// Liveness weight
    pub liveness: f32,
    /// Speechiness weight
    pub speechiness: f32,
    /// Tempo weight
    pub tempo: f32,
}

impl FeatureWeights {
    /// Weights in scoring order (matches [`OptimalRanges::as_array`])
    pub fn as_array(&self) -> [f32; 8] {
        [
            self.danceability,
            self.energy,
            self.valence,
            self.acousticness,
            self.instrumentalness,
            self.liveness,
            self.speechiness,
            self.tempo,
        ]
    }
}

/// Per-feature optimal ranges (tempo in BPM, the rest in [0, 1])
#[derive(Debug, Clone, Copy)]
pub struct OptimalRanges {
    /// Danceability range
    pub danceability: FeatureRange,
    /// Energy range
    pub energy: FeatureRange,
    /// Valence range
    pub valence: FeatureRange,
    /// Acousticness range
    pub acousticness: FeatureRange,
    /// Instrumentalness range
    pub instrumentalness: FeatureRange,
    /// Liveness range
    pub liveness: FeatureRange,
    /// Speechiness range
    pub speechiness: FeatureRange,
    /// Tempo range in BPM
    pub tempo: FeatureRange,
}

impl OptimalRanges {
    /// Ranges in scoring order (matches [`FeatureWeights::as_array`])
    pub fn as_array(&self) -> [FeatureRange; 8] {
        [
            self.danceability,
            self.energy,
            self.valence,
            self.acousticness,
            self.instrumentalness,
            self.liveness,
            self.speechiness,
            self.tempo,
        ]
    }
}

/// Broad market category, used for the secondary score multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenreCategory {
    /// Large established audience
    Mainstream,
    /// Growing audience
    Emerging,
    /// Small dedicated audience
    Niche,
}

impl GenreCategory {
    /// Multiplier applied to the market-potential score
    pub fn market_multiplier(&self) -> f32 {
        match self {
            GenreCategory::Mainstream => 1.1,
            GenreCategory::Emerging => 1.05,
            GenreCategory::Niche => 0.9,
        }
    }

    /// Multiplier applied to the social score
    pub fn social_multiplier(&self) -> f32 {
        match self {
            GenreCategory::Mainstream => 1.05,
            GenreCategory::Emerging => 1.1,
            GenreCategory::Niche => 0.95,
        }
    }
}

/// Static reference data for one genre
#[derive(Debug, Clone)]
pub struct GenreProfile {
    /// Genre name
    pub name: &'static str,
    /// Share of the overall market, as a fraction
    pub market_share: f32,
    /// Year-over-year growth rate, as a fraction (may be negative)
    pub growth_rate: f32,
    /// Months (1-12) with peak listener demand
    pub peak_seasons: &'static [u32],
    /// Relative performance per platform, in [0, 1]
    pub platform_performance: &'static [(&'static str, f32)],
    /// Linear-algorithm contribution weights
    pub weights: FeatureWeights,
    /// Optimal feature ranges
    pub optimal: OptimalRanges,
    /// Market category for secondary scores
    pub category: GenreCategory,
}

fn pop_profile() -> GenreProfile {
    GenreProfile {
        name: "Pop",
        market_share: 0.22,
        growth_rate: 0.03,
        peak_seasons: &[6, 7, 12],
        platform_performance: &[("spotify", 0.90), ("tiktok", 0.95), ("radio", 0.85)],
        weights: FeatureWeights {
            danceability: 0.20,
            energy: 0.20,
            valence: 0.15,
            acousticness: 0.05,
            instrumentalness: 0.05,
            liveness: 0.05,
            speechiness: 0.05,
            tempo: 0.25,
        },
        optimal: OptimalRanges {
            danceability: FeatureRange::new(0.6, 0.9, 0.75),
            energy: FeatureRange::new(0.6, 0.9, 0.80),
            valence: FeatureRange::new(0.5, 0.9, 0.70),
            acousticness: FeatureRange::new(0.0, 0.5, 0.20),
            instrumentalness: FeatureRange::new(0.0, 0.4, 0.10),
            liveness: FeatureRange::new(0.0, 0.4, 0.15),
            speechiness: FeatureRange::new(0.0, 0.3, 0.08),
            tempo: FeatureRange::new(100.0, 140.0, 120.0),
        },
        category: GenreCategory::Mainstream,
    }
}

/// All named genre profiles
static GENRE_PROFILES: Lazy<Vec<GenreProfile>> = Lazy::new(|| {
    vec![
        pop_profile(),
        GenreProfile {
            name: "Hip-Hop",
            market_share: 0.25,
            growth_rate: 0.05,
            peak_seasons: &[5, 6, 7, 8],
            platform_performance: &[("spotify", 0.95), ("tiktok", 0.90), ("youtube", 0.90)],
            weights: FeatureWeights {
                danceability: 0.30,
                energy: 0.15,
                valence: 0.10,
                acousticness: 0.05,
                instrumentalness: 0.05,
                liveness: 0.05,
                speechiness: 0.15,
                tempo: 0.15,
            },
            optimal: OptimalRanges {
                danceability: FeatureRange::new(0.7, 1.0, 0.85),
                energy: FeatureRange::new(0.5, 0.9, 0.70),
                valence: FeatureRange::new(0.3, 0.8, 0.55),
                acousticness: FeatureRange::new(0.0, 0.4, 0.10),
                instrumentalness: FeatureRange::new(0.0, 0.3, 0.05),
                liveness: FeatureRange::new(0.0, 0.4, 0.12),
                speechiness: FeatureRange::new(0.1, 0.6, 0.30),
                tempo: FeatureRange::new(80.0, 110.0, 95.0),
            },
            category: GenreCategory::Mainstream,
        },
        GenreProfile {
            name: "Rock",
            market_share: 0.15,
            growth_rate: -0.02,
            peak_seasons: &[6, 7, 9],
            platform_performance: &[("spotify", 0.80), ("radio", 0.90), ("youtube", 0.75)],
            weights: FeatureWeights {
                danceability: 0.10,
                energy: 0.30,
                valence: 0.10,
                acousticness: 0.10,
                instrumentalness: 0.05,
                liveness: 0.10,
                speechiness: 0.05,
                tempo: 0.20,
            },
            optimal: OptimalRanges {
                danceability: FeatureRange::new(0.4, 0.7, 0.55),
                energy: FeatureRange::new(0.7, 1.0, 0.85),
                valence: FeatureRange::new(0.4, 0.8, 0.60),
                acousticness: FeatureRange::new(0.1, 0.6, 0.30),
                instrumentalness: FeatureRange::new(0.0, 0.6, 0.20),
                liveness: FeatureRange::new(0.1, 0.6, 0.30),
                speechiness: FeatureRange::new(0.0, 0.2, 0.05),
                tempo: FeatureRange::new(110.0, 160.0, 130.0),
            },
            category: GenreCategory::Mainstream,
        },
        GenreProfile {
            name: "Electronic",
            market_share: 0.12,
            growth_rate: 0.06,
            peak_seasons: &[6, 7, 8],
            platform_performance: &[("spotify", 0.85), ("soundcloud", 0.90), ("beatport", 0.95)],
            weights: FeatureWeights {
                danceability: 0.25,
                energy: 0.25,
                valence: 0.10,
                acousticness: 0.05,
                instrumentalness: 0.10,
                liveness: 0.05,
                speechiness: 0.05,
                tempo: 0.15,
            },
            optimal: OptimalRanges {
                danceability: FeatureRange::new(0.7, 1.0, 0.85),
                energy: FeatureRange::new(0.7, 1.0, 0.85),
                valence: FeatureRange::new(0.4, 0.8, 0.60),
                acousticness: FeatureRange::new(0.0, 0.3, 0.05),
                instrumentalness: FeatureRange::new(0.3, 0.9, 0.60),
                liveness: FeatureRange::new(0.0, 0.4, 0.10),
                speechiness: FeatureRange::new(0.0, 0.2, 0.05),
                tempo: FeatureRange::new(120.0, 150.0, 128.0),
            },
            category: GenreCategory::Emerging,
        },
        GenreProfile {
            name: "R&B",
            market_share: 0.08,
            growth_rate: 0.01,
            peak_seasons: &[2, 11, 12],
            platform_performance: &[("spotify", 0.85), ("apple_music", 0.85), ("radio", 0.70)],
            weights: FeatureWeights {
                danceability: 0.20,
                energy: 0.15,
                valence: 0.20,
                acousticness: 0.10,
                instrumentalness: 0.05,
                liveness: 0.05,
                speechiness: 0.10,
                tempo: 0.15,
            },
            optimal: OptimalRanges {
                danceability: FeatureRange::new(0.5, 0.8, 0.65),
                energy: FeatureRange::new(0.4, 0.7, 0.55),
                valence: FeatureRange::new(0.3, 0.7, 0.50),
                acousticness: FeatureRange::new(0.1, 0.6, 0.30),
                instrumentalness: FeatureRange::new(0.0, 0.3, 0.05),
                liveness: FeatureRange::new(0.0, 0.4, 0.12),
                speechiness: FeatureRange::new(0.05, 0.35, 0.15),
                tempo: FeatureRange::new(70.0, 110.0, 90.0),
            },
            category: GenreCategory::Mainstream,
        },
        GenreProfile {
            name: "Country",
            market_share: 0.07,
            growth_rate: 0.02,
            peak_seasons: &[5, 6, 7],
            platform_performance: &[("radio", 0.95), ("spotify", 0.70), ("youtube", 0.65)],
            weights: FeatureWeights {
                danceability: 0.15,
                energy: 0.15,
                valence: 0.20,
                acousticness: 0.20,
                instrumentalness: 0.05,
                liveness: 0.10,
                speechiness: 0.05,
                tempo: 0.10,
            },
            optimal: OptimalRanges {
                danceability: FeatureRange::new(0.4, 0.7, 0.55),
                energy: FeatureRange::new(0.4, 0.8, 0.60),
                valence: FeatureRange::new(0.5, 0.9, 0.70),
                acousticness: FeatureRange::new(0.3, 0.8, 0.55),
                instrumentalness: FeatureRange::new(0.0, 0.3, 0.08),
                liveness: FeatureRange::new(0.1, 0.5, 0.25),
                speechiness: FeatureRange::new(0.0, 0.25, 0.06),
                tempo: FeatureRange::new(80.0, 130.0, 105.0),
            },
            category: GenreCategory::Niche,
        },
        GenreProfile {
            name: "Latin",
            market_share: 0.06,
            growth_rate: 0.08,
            peak_seasons: &[5, 6, 7, 8],
            platform_performance: &[("spotify", 0.90), ("youtube", 0.95), ("tiktok", 0.85)],
            weights: FeatureWeights {
                danceability: 0.30,
                energy: 0.20,
                valence: 0.20,
                acousticness: 0.05,
                instrumentalness: 0.05,
                liveness: 0.05,
                speechiness: 0.05,
                tempo: 0.10,
            },
            optimal: OptimalRanges {
                danceability: FeatureRange::new(0.7, 1.0, 0.85),
                energy: FeatureRange::new(0.6, 0.95, 0.80),
                valence: FeatureRange::new(0.6, 0.95, 0.80),
                acousticness: FeatureRange::new(0.1, 0.5, 0.25),
                instrumentalness: FeatureRange::new(0.0, 0.3, 0.05),
                liveness: FeatureRange::new(0.05, 0.45, 0.20),
                speechiness: FeatureRange::new(0.02, 0.3, 0.10),
                tempo: FeatureRange::new(90.0, 140.0, 115.0),
            },
            category: GenreCategory::Emerging,
        },
        GenreProfile {
            name: "Indie",
            market_share: 0.04,
            growth_rate: 0.04,
            peak_seasons: &[4, 9, 10],
            platform_performance: &[("spotify", 0.80), ("bandcamp", 0.90), ("soundcloud", 0.75)],
            weights: FeatureWeights {
                danceability: 0.15,
                energy: 0.15,
                valence: 0.15,
                acousticness: 0.20,
                instrumentalness: 0.10,
                liveness: 0.10,
                speechiness: 0.05,
                tempo: 0.10,
            },
            optimal: OptimalRanges {
                danceability: FeatureRange::new(0.4, 0.75, 0.55),
                energy: FeatureRange::new(0.4, 0.8, 0.60),
                valence: FeatureRange::new(0.3, 0.75, 0.50),
                acousticness: FeatureRange::new(0.2, 0.8, 0.50),
                instrumentalness: FeatureRange::new(0.05, 0.6, 0.25),
                liveness: FeatureRange::new(0.1, 0.6, 0.30),
                speechiness: FeatureRange::new(0.0, 0.25, 0.06),
                tempo: FeatureRange::new(90.0, 140.0, 115.0),
            },
            category: GenreCategory::Niche,
        },
    ]
});

/// Pop-like fallback profile for unknown or unspecified genres
static DEFAULT_PROFILE: Lazy<GenreProfile> = Lazy::new(|| GenreProfile {
    name: "Default",
    ..pop_profile()
});

/// All named genre profiles
pub fn genre_profiles() -> &'static [GenreProfile] {
    &GENRE_PROFILES
}

/// The Pop-like default profile
pub fn default_profile() -> &'static GenreProfile {
    &DEFAULT_PROFILE
}

/// Resolve a declared genre to a profile
///
/// Case-insensitive name match; unknown or absent genres resolve to the
/// default profile, never to an error.
pub fn profile_for(genre: Option<&str>) -> &'static GenreProfile {
    match genre {
        Some(name) => GENRE_PROFILES
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                log::debug!("Unknown genre {:?}, using default profile", name);
                default_profile()
            }),
        None => default_profile(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_genre_lookup() {
        assert_eq!(profile_for(Some("Pop")).name, "Pop");
        assert_eq!(profile_for(Some("hip-hop")).name, "Hip-Hop");
        assert_eq!(profile_for(Some(" rock ")).name, "Rock");
    }

    #[test]
    fn test_unknown_genre_falls_back_to_default() {
        assert_eq!(profile_for(Some("Vaporwave Polka")).name, "Default");
        assert_eq!(profile_for(None).name, "Default");
    }

    #[test]
    fn test_weights_sum_to_one() {
        for profile in genre_profiles().iter().chain(std::iter::once(default_profile())) {
            let sum: f32 = profile.weights.as_array().iter().sum();
            assert!(
                (sum - 1.0).abs() < 0.01,
                "{} weights sum to {:.3}, expected ~1.0",
                profile.name,
                sum
            );
        }
    }

    #[test]
    fn test_ranges_are_well_formed() {
        for profile in genre_profiles() {
            for range in profile.optimal.as_array() {
                assert!(range.min <= range.peak && range.peak <= range.max);
            }
        }
    }

    #[test]
    fn test_feature_range_contains() {
        let r = FeatureRange::new(0.5, 0.9, 0.7);
        assert!(r.contains(0.5));
        assert!(r.contains(0.9));
        assert!(!r.contains(0.49));
        assert!(!r.contains(0.91));
    }
}

//! Risk assessment
//!
//! Accumulates fixed point penalties for commercially risky feature and
//! genre combinations. Each risk is a tagged code mapped 1:1 to its factor
//! description and mitigation template, so wording changes can never
//! silently drop a mitigation.

use serde::{Deserialize, Serialize};

use crate::analysis::features::FeatureVector;
use crate::scoring::genre::GenreProfile;

/// Overall risk bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Risk score <= 25
    Low,
    /// Risk score in (25, 50]
    Medium,
    /// Risk score > 50
    High,
}

/// Tagged risk codes with their penalty, factor text and mitigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCode {
    /// Energy below 0.4
    LowEnergy,
    /// Danceability below 0.5
    LowDanceability,
    /// Genre market share below 5%
    NicheGenre,
    /// Genre with negative growth
    DecliningGenre,
}

impl RiskCode {
    /// Fixed penalty contributed to the risk score
    pub fn penalty(&self) -> f32 {
        match self {
            RiskCode::LowEnergy => 20.0,
            RiskCode::LowDanceability => 15.0,
            RiskCode::NicheGenre => 25.0,
            RiskCode::DecliningGenre => 30.0,
        }
    }

    /// Human-readable factor description
    pub fn factor(&self) -> &'static str {
        match self {
            RiskCode::LowEnergy => "Low energy may limit playlist placement",
            RiskCode::LowDanceability => "Low danceability reduces mainstream appeal",
            RiskCode::NicheGenre => "Genre has a small market share",
            RiskCode::DecliningGenre => "Genre audience is shrinking",
        }
    }

    /// Mitigation template paired with this code
    pub fn mitigation(&self) -> &'static str {
        match self {
            RiskCode::LowEnergy => {
                "Commission a high-energy remix or revisit the mix to lift perceived intensity"
            }
            RiskCode::LowDanceability => {
                "Tighten the rhythm section or release a club edit aimed at dance playlists"
            }
            RiskCode::NicheGenre => {
                "Target the genre's dedicated channels and cross-promote with adjacent genres"
            }
            RiskCode::DecliningGenre => {
                "Blend in elements from growing genres and pitch to crossover playlists"
            }
        }
    }
}

/// Structured risk assessment result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Risk bucket derived from the score
    pub overall_risk: RiskLevel,
    /// Accumulated penalty score in [0, 100]
    pub risk_score: f32,
    /// Triggered risk codes
    pub codes: Vec<RiskCode>,
    /// Factor descriptions, one per triggered code
    pub risk_factors: Vec<String>,
    /// Mitigation templates, one per triggered code
    pub mitigation_strategies: Vec<String>,
}

/// Assess commercial risk for a feature vector under a genre profile
pub fn assess_risk(features: &FeatureVector, profile: &GenreProfile) -> RiskAssessment {
    let mut codes = Vec::new();

    if features.energy() < 0.4 {
        codes.push(RiskCode::LowEnergy);
    }
    if features.danceability() < 0.5 {
        codes.push(RiskCode::LowDanceability);
    }
    if profile.market_share < 0.05 {
        codes.push(RiskCode::NicheGenre);
    }
    if profile.growth_rate < 0.0 {
        codes.push(RiskCode::DecliningGenre);
    }

    let risk_score = codes
        .iter()
        .map(|c| c.penalty())
        .sum::<f32>()
        .clamp(0.0, 100.0);

    let overall_risk = if risk_score > 50.0 {
        RiskLevel::High
    } else if risk_score > 25.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    RiskAssessment {
        overall_risk,
        risk_score,
        risk_factors: codes.iter().map(|c| c.factor().to_string()).collect(),
        mitigation_strategies: codes.iter().map(|c| c.mitigation().to_string()).collect(),
        codes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::genre::profile_for;

    #[test]
    fn test_no_risks_is_low() {
        let features = FeatureVector::builder()
            .energy(0.8)
            .danceability(0.8)
            .build();
        let assessment = assess_risk(&features, profile_for(Some("Pop")));
        assert_eq!(assessment.overall_risk, RiskLevel::Low);
        assert_eq!(assessment.risk_score, 0.0);
        assert!(assessment.risk_factors.is_empty());
        assert!(assessment.mitigation_strategies.is_empty());
    }

    #[test]
    fn test_low_energy_and_danceability_is_medium() {
        let features = FeatureVector::builder()
            .energy(0.2)
            .danceability(0.3)
            .build();
        let assessment = assess_risk(&features, profile_for(Some("Pop")));
        // 20 + 15 = 35: medium bucket
        assert_eq!(assessment.risk_score, 35.0);
        assert_eq!(assessment.overall_risk, RiskLevel::Medium);
    }

    #[test]
    fn test_bucket_boundaries() {
        // Rock carries DecliningGenre (30): medium
        let ok = FeatureVector::builder().energy(0.8).danceability(0.8).build();
        let rock = assess_risk(&ok, profile_for(Some("Rock")));
        assert_eq!(rock.risk_score, 30.0);
        assert_eq!(rock.overall_risk, RiskLevel::Medium);

        // Indie (share 0.04) + low energy + low danceability: 25+20+15 = 60, high
        let weak = FeatureVector::builder().energy(0.2).danceability(0.3).build();
        let indie = assess_risk(&weak, profile_for(Some("Indie")));
        assert_eq!(indie.risk_score, 60.0);
        assert_eq!(indie.overall_risk, RiskLevel::High);
    }

    #[test]
    fn test_high_iff_score_above_fifty() {
        for (features, genre) in [
            (FeatureVector::builder().energy(0.2).danceability(0.3).build(), "Indie"),
            (FeatureVector::builder().energy(0.8).danceability(0.8).build(), "Pop"),
            (FeatureVector::builder().energy(0.2).danceability(0.8).build(), "Rock"),
        ] {
            let a = assess_risk(&features, profile_for(Some(genre)));
            assert_eq!(a.overall_risk == RiskLevel::High, a.risk_score > 50.0);
            assert_eq!(
                a.overall_risk == RiskLevel::Medium,
                a.risk_score > 25.0 && a.risk_score <= 50.0
            );
        }
    }

    #[test]
    fn test_every_factor_has_a_mitigation() {
        let features = FeatureVector::builder().energy(0.1).danceability(0.1).build();
        let assessment = assess_risk(&features, profile_for(Some("Indie")));
        assert_eq!(
            assessment.risk_factors.len(),
            assessment.mitigation_strategies.len()
        );
        assert_eq!(assessment.codes.len(), assessment.risk_factors.len());
    }
}

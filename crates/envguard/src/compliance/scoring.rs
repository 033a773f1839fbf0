use serde::{Deserialize, Serialize};

use super::domain::ProperRating;
use super::esg::MaturityLevel;

/// Blend weights for the composite environmental health index. The weights
/// must sum to 1.0; `validate` is checked by `ScoringConfig::validate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthWeights {
    pub esg: f64,
    pub compliance: f64,
    pub proper: f64,
}

impl HealthWeights {
    pub fn sum(&self) -> f64 {
        self.esg + self.compliance + self.proper
    }
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self {
            esg: 0.3,
            compliance: 0.4,
            proper: 0.3,
        }
    }
}

/// Ordinal mapping of PROPER ratings to the numeric scale used for health
/// blending. A closed, versioned lookup table, not inferred.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingScale {
    pub gold: f64,
    pub green: f64,
    pub blue: f64,
    pub red: f64,
    pub black: f64,
}

impl RatingScale {
    pub fn score(&self, rating: ProperRating) -> f64 {
        match rating {
            ProperRating::Gold => self.gold,
            ProperRating::Green => self.green,
            ProperRating::Blue => self.blue,
            ProperRating::Red => self.red,
            ProperRating::Black => self.black,
        }
    }

    /// Conservative default tier used when no rating is on record.
    pub fn fallback(&self) -> f64 {
        self.blue
    }
}

impl Default for RatingScale {
    fn default() -> Self {
        Self {
            gold: 100.0,
            green: 80.0,
            blue: 60.0,
            red: 40.0,
            black: 20.0,
        }
    }
}

/// Upper bounds (inclusive) of the ESG maturity bands below `Optimized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaturityBands {
    pub initial: u32,
    pub managed: u32,
    pub defined: u32,
    pub strategic: u32,
}

impl MaturityBands {
    pub fn level_for(&self, overall_score: u32) -> MaturityLevel {
        if overall_score <= self.initial {
            MaturityLevel::Initial
        } else if overall_score <= self.managed {
            MaturityLevel::Managed
        } else if overall_score <= self.defined {
            MaturityLevel::Defined
        } else if overall_score <= self.strategic {
            MaturityLevel::Strategic
        } else {
            MaturityLevel::Optimized
        }
    }
}

impl Default for MaturityBands {
    fn default() -> Self {
        Self {
            initial: 20,
            managed: 40,
            defined: 60,
            strategic: 85,
        }
    }
}

/// Versioned scoring tables and temporal windows passed into the engines
/// instead of embedded literals, so regulatory-threshold updates need no
/// code change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub version: String,
    pub health_weights: HealthWeights,
    pub rating_scale: RatingScale,
    pub maturity_bands: MaturityBands,
    /// Days-left threshold at or below which a storage deadline is a warning.
    pub storage_warning_days: i64,
    /// Dashboard horizon for the upcoming bucket.
    pub horizon_days: i64,
    /// Lead time for deadline reminder dispatch.
    pub reminder_lead_days: i64,
    /// Question count of the assessment's standard version; never derived
    /// from the answered subset.
    pub esg_question_count: usize,
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let sum = self.health_weights.sum();
        if (sum - 1.0).abs() > f64::EPSILON * 4.0 {
            return Err(ScoringConfigError::WeightsNotNormalized { sum });
        }
        if self.esg_question_count == 0 {
            return Err(ScoringConfigError::EmptyQuestionCatalog);
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            version: "2026.1".to_string(),
            health_weights: HealthWeights::default(),
            rating_scale: RatingScale::default(),
            maturity_bands: MaturityBands::default(),
            storage_warning_days: 30,
            horizon_days: 90,
            reminder_lead_days: 7,
            esg_question_count: 120,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("health weights must sum to 1.0 (found {sum})")]
    WeightsNotNormalized { sum: f64 },
    #[error("ESG question catalog cannot be empty")]
    EmptyQuestionCatalog,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ScoringConfig::default();
        config.validate().expect("default tables are normalized");
        assert_eq!(config.health_weights.sum(), 1.0);
    }

    #[test]
    fn skewed_weights_are_rejected() {
        let mut config = ScoringConfig::default();
        config.health_weights.esg = 0.5;
        let err = config.validate().expect_err("weights no longer sum to 1.0");
        assert!(matches!(err, ScoringConfigError::WeightsNotNormalized { .. }));
    }

    #[test]
    fn rating_scale_matches_proper_tiers() {
        let scale = RatingScale::default();
        assert_eq!(scale.score(ProperRating::Gold), 100.0);
        assert_eq!(scale.score(ProperRating::Black), 20.0);
        assert_eq!(scale.fallback(), 60.0);
    }

    #[test]
    fn maturity_band_boundaries_are_inclusive_below() {
        let bands = MaturityBands::default();
        assert_eq!(bands.level_for(20), MaturityLevel::Initial);
        assert_eq!(bands.level_for(21), MaturityLevel::Managed);
        assert_eq!(bands.level_for(60), MaturityLevel::Defined);
        assert_eq!(bands.level_for(85), MaturityLevel::Strategic);
        assert_eq!(bands.level_for(86), MaturityLevel::Optimized);
    }
}

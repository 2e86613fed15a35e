//! Risk Rules & Thresholds
//!
//! Định nghĩa các threshold cho phân loại risk level.
//! KHÔNG chứa logic classify - chỉ constants, band table và recommendation.

use serde::{Deserialize, Serialize};

use super::types::RiskLevel;
use crate::error::ConfigError;

// ============================================================================
// THRESHOLDS (Constants - không đổi lúc runtime)
// ============================================================================

/// At or above this probability the label is PHISHING
pub const PHISHING_THRESHOLD: f64 = 0.5;

pub const CRITICAL_THRESHOLD: f64 = 0.80;
pub const HIGH_THRESHOLD: f64 = 0.60;
pub const MEDIUM_THRESHOLD: f64 = 0.40;
pub const LOW_THRESHOLD: f64 = 0.20;

// ============================================================================
// RECOMMENDATIONS
// ============================================================================

pub const CRITICAL_RECOMMENDATION: &str = "IMMEDIATE ACTION REQUIRED: Delete this email and report it to your security team. Do not click any links or download attachments.";
pub const HIGH_RECOMMENDATION: &str = "HIGH RISK: This email is highly suspicious. Verify the sender through an alternative channel before taking any action.";
pub const MEDIUM_RECOMMENDATION: &str = "CAUTION ADVISED: Verify all information before clicking links or providing any data.";
pub const LOW_RECOMMENDATION: &str = "LOW RISK: Remain vigilant and verify the sender before acting on this email.";
pub const SAFE_RECOMMENDATION: &str = "This email appears safe, but always practice good email security habits.";

/// Fixed advice per risk level
pub fn recommendation(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Critical => CRITICAL_RECOMMENDATION,
        RiskLevel::High => HIGH_RECOMMENDATION,
        RiskLevel::Medium => MEDIUM_RECOMMENDATION,
        RiskLevel::Low => LOW_RECOMMENDATION,
        RiskLevel::Safe => SAFE_RECOMMENDATION,
    }
}

// ============================================================================
// BAND TABLE (configurable)
// ============================================================================

/// `probability >= min_probability` puts the email in `level`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskBand {
    pub min_probability: f64,
    pub level: RiskLevel,
}

impl RiskBand {
    pub const fn new(min_probability: f64, level: RiskLevel) -> Self {
        Self {
            min_probability,
            level,
        }
    }
}

/// Ordered (threshold, level) table, highest threshold first.
/// Probabilities below every band are SAFE.
///
/// Invariant: thresholds strictly decrease and levels strictly decrease
/// along the table, so a higher probability never maps to a lower level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RiskBand>", into = "Vec<RiskBand>")]
pub struct RiskBands {
    bands: Vec<RiskBand>,
}

impl RiskBands {
    /// Floor level when no band matches
    pub const FLOOR: RiskLevel = RiskLevel::Safe;

    /// Validate and sort a band table (input order does not matter)
    pub fn new(mut bands: Vec<RiskBand>) -> Result<Self, ConfigError> {
        for band in &bands {
            if !(band.min_probability > 0.0 && band.min_probability <= 1.0) {
                return Err(ConfigError::InvalidBands(format!(
                    "threshold {} for {} must lie in (0, 1]",
                    band.min_probability, band.level
                )));
            }
            if band.level == Self::FLOOR {
                return Err(ConfigError::InvalidBands(format!(
                    "{} is the floor level and cannot have a threshold",
                    Self::FLOOR
                )));
            }
        }

        bands.sort_by(|a, b| b.min_probability.total_cmp(&a.min_probability));

        for pair in bands.windows(2) {
            if pair[0].min_probability == pair[1].min_probability {
                return Err(ConfigError::InvalidBands(format!(
                    "duplicate threshold {}",
                    pair[0].min_probability
                )));
            }
            if pair[0].level <= pair[1].level {
                return Err(ConfigError::InvalidBands(format!(
                    "{} (>= {}) must rank above {} (>= {})",
                    pair[0].level, pair[0].min_probability, pair[1].level, pair[1].min_probability
                )));
            }
        }

        Ok(Self { bands })
    }

    /// Highest band whose threshold the probability reaches
    pub fn level_for(&self, probability: f64) -> RiskLevel {
        self.bands
            .iter()
            .find(|band| probability >= band.min_probability)
            .map(|band| band.level)
            .unwrap_or(Self::FLOOR)
    }

    pub fn bands(&self) -> &[RiskBand] {
        &self.bands
    }
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            bands: vec![
                RiskBand::new(CRITICAL_THRESHOLD, RiskLevel::Critical),
                RiskBand::new(HIGH_THRESHOLD, RiskLevel::High),
                RiskBand::new(MEDIUM_THRESHOLD, RiskLevel::Medium),
                RiskBand::new(LOW_THRESHOLD, RiskLevel::Low),
            ],
        }
    }
}

impl TryFrom<Vec<RiskBand>> for RiskBands {
    type Error = ConfigError;

    fn try_from(bands: Vec<RiskBand>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<RiskBands> for Vec<RiskBand> {
    fn from(bands: RiskBands) -> Self {
        bands.bands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let default = RiskBands::default();
        assert_eq!(RiskBands::new(default.bands().to_vec()).unwrap(), default);
    }

    #[test]
    fn test_level_for_boundaries() {
        let bands = RiskBands::default();
        assert_eq!(bands.level_for(1.0), RiskLevel::Critical);
        assert_eq!(bands.level_for(0.80), RiskLevel::Critical);
        assert_eq!(bands.level_for(0.7999), RiskLevel::High);
        assert_eq!(bands.level_for(0.60), RiskLevel::High);
        assert_eq!(bands.level_for(0.40), RiskLevel::Medium);
        assert_eq!(bands.level_for(0.20), RiskLevel::Low);
        assert_eq!(bands.level_for(0.1999), RiskLevel::Safe);
        assert_eq!(bands.level_for(0.0), RiskLevel::Safe);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let bands = RiskBands::new(vec![
            RiskBand::new(0.3, RiskLevel::Low),
            RiskBand::new(0.9, RiskLevel::Critical),
        ])
        .unwrap();
        assert_eq!(bands.bands()[0].level, RiskLevel::Critical);
        assert_eq!(bands.level_for(0.5), RiskLevel::Low);
        assert_eq!(bands.level_for(0.95), RiskLevel::Critical);
    }

    #[test]
    fn test_non_monotonic_table_rejected() {
        let result = RiskBands::new(vec![
            RiskBand::new(0.9, RiskLevel::Medium),
            RiskBand::new(0.5, RiskLevel::High),
        ]);
        assert!(matches!(result, Err(ConfigError::InvalidBands(_))));
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        for bad in [0.0, -0.1, 1.5, f64::NAN] {
            let result = RiskBands::new(vec![RiskBand::new(bad, RiskLevel::High)]);
            assert!(result.is_err(), "{} accepted", bad);
        }
        assert!(RiskBands::new(vec![RiskBand::new(0.5, RiskLevel::Safe)]).is_err());
        assert!(RiskBands::new(vec![
            RiskBand::new(0.5, RiskLevel::High),
            RiskBand::new(0.5, RiskLevel::Low),
        ])
        .is_err());
    }

    #[test]
    fn test_empty_table_is_all_safe() {
        let bands = RiskBands::new(vec![]).unwrap();
        assert_eq!(bands.level_for(1.0), RiskLevel::Safe);
    }

    #[test]
    fn test_serde_validates() {
        let json = r#"[{"min_probability": 0.5, "level": "HIGH"}]"#;
        let bands: RiskBands = serde_json::from_str(json).unwrap();
        assert_eq!(bands.level_for(0.5), RiskLevel::High);

        let bad = r#"[{"min_probability": 0.5, "level": "SAFE"}]"#;
        assert!(serde_json::from_str::<RiskBands>(bad).is_err());
    }

    #[test]
    fn test_every_level_has_recommendation() {
        let texts: std::collections::HashSet<_> =
            RiskLevel::ALL.iter().map(|l| recommendation(*l)).collect();
        assert_eq!(texts.len(), RiskLevel::ALL.len());
    }
}

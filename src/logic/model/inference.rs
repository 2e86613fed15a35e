//! Inference - Model capability boundary
//!
//! Risk logic chỉ cần một thứ từ model: xác suất phishing trong [0, 1].
//! Any model (linear weights, heuristic fallback, remote stub) plugs in
//! through `PhishingModel`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::logic::features::{layout_hash, FeatureVector, FEATURE_COUNT, FEATURE_VERSION};

// ============================================================================
// MODEL TRAIT
// ============================================================================

/// Anything that can turn a feature vector into a phishing probability
pub trait PhishingModel: Send + Sync {
    /// Probability that the email is phishing. Fails only when the vector
    /// was built for a different feature layout.
    fn predict_probability(&self, vector: &FeatureVector) -> Result<f64, ModelError>;

    /// Descriptive metadata (name, kind, checksum, top features)
    fn info(&self) -> ModelInfo;
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// One feature's weight, as reported by `model-info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeight {
    pub name: String,
    pub weight: f64,
}

/// Model metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub kind: String,
    pub feature_count: usize,
    pub feature_version: u8,
    pub layout_hash: u32,
    /// SHA-256 of the model source, when it came from a file or string
    pub checksum: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
    /// Features ranked by absolute weight, strongest first
    pub top_features: Vec<FeatureWeight>,
}

/// Standard logistic function
pub fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Rank (name, weight) pairs by |weight|, ties broken by name
pub fn rank_by_importance<I>(weights: I) -> Vec<FeatureWeight>
where
    I: IntoIterator<Item = (String, f64)>,
{
    let mut ranked: Vec<FeatureWeight> = weights
        .into_iter()
        .map(|(name, weight)| FeatureWeight { name, weight })
        .collect();
    ranked.sort_by(|a, b| {
        b.weight
            .abs()
            .total_cmp(&a.weight.abs())
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked
}

// ============================================================================
// HEURISTIC FALLBACK
// ============================================================================

/// (feature, weight, cap): contribution is `weight * min(value, cap)`
pub const HEURISTIC_RULES: &[(&str, f64, f64)] = &[
    ("sender_domain_has_digits", 0.6, 1.0),
    ("sender_domain_suspicious", 0.6, 1.0),
    ("sender_suspicious_tld", 1.2, 1.0),
    ("sender_free_mail", 0.2, 1.0),
    ("subject_uppercase_words", 0.3, 3.0),
    ("subject_exclamation_count", 0.4, 3.0),
    ("subject_urgency_hits", 0.8, 3.0),
    ("phishing_keyword_count", 0.35, 8.0),
    ("urgency_score", 0.15, 10.0),
    ("ip_url_count", 1.2, 2.0),
    ("shortened_url_count", 1.0, 2.0),
    ("mismatched_url_count", 1.5, 2.0),
    ("suspicious_tld_url_count", 1.5, 2.0),
    ("has_form", 0.8, 1.0),
    ("has_script", 0.6, 1.0),
    ("has_hidden_element", 0.8, 1.0),
];

/// Starting logit: an email with no indicators sits near 5%
pub const HEURISTIC_BIAS: f64 = -3.0;

/// Added when the sender address is syntactically invalid
pub const INVALID_SENDER_WEIGHT: f64 = 1.0;

/// Rule-based fallback used when no trained model is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicModel;

impl HeuristicModel {
    pub fn new() -> Self {
        Self
    }

    fn logit(vector: &FeatureVector) -> f64 {
        let value = |name: &str| vector.get_by_name(name).map(f64::from).unwrap_or_default();

        let indicators: f64 = HEURISTIC_RULES
            .iter()
            .map(|(name, weight, cap)| weight * value(name).clamp(0.0, *cap))
            .sum();

        let invalid_sender = (1.0 - value("sender_valid")).clamp(0.0, 1.0);

        HEURISTIC_BIAS + indicators + INVALID_SENDER_WEIGHT * invalid_sender
    }
}

impl PhishingModel for HeuristicModel {
    fn predict_probability(&self, vector: &FeatureVector) -> Result<f64, ModelError> {
        vector.validate()?;
        Ok(logistic(Self::logit(vector)))
    }

    fn info(&self) -> ModelInfo {
        let mut weights: Vec<(String, f64)> = HEURISTIC_RULES
            .iter()
            .map(|(name, weight, _)| (name.to_string(), *weight))
            .collect();
        weights.push(("sender_valid".to_string(), -INVALID_SENDER_WEIGHT));

        ModelInfo {
            name: "heuristic-fallback".to_string(),
            kind: "heuristic".to_string(),
            feature_count: FEATURE_COUNT,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            checksum: None,
            loaded_at: None,
            top_features: rank_by_importance(weights),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::feature_index;

    fn vector_with(values: &[(&str, f32)]) -> FeatureVector {
        let mut vector = FeatureVector::new();
        vector.set_by_name("sender_valid", 1.0);
        for (name, value) in values {
            assert!(vector.set_by_name(name, *value), "unknown feature {}", name);
        }
        vector
    }

    #[test]
    fn test_rules_reference_real_features() {
        for (name, weight, cap) in HEURISTIC_RULES {
            assert!(feature_index(name).is_some(), "{} not in layout", name);
            assert!(*weight > 0.0 && *cap > 0.0);
        }
    }

    #[test]
    fn test_logistic() {
        assert_eq!(logistic(0.0), 0.5);
        assert!(logistic(10.0) > 0.99);
        assert!(logistic(-10.0) < 0.01);
    }

    #[test]
    fn test_clean_vector_is_low() {
        let p = HeuristicModel.predict_probability(&vector_with(&[])).unwrap();
        assert!(p < 0.1, "p = {}", p);
    }

    #[test]
    fn test_indicators_raise_probability() {
        let p = HeuristicModel
            .predict_probability(&vector_with(&[
                ("subject_urgency_hits", 2.0),
                ("subject_exclamation_count", 1.0),
                ("phishing_keyword_count", 6.0),
                ("urgency_score", 3.0),
                ("suspicious_tld_url_count", 1.0),
                ("url_count", 1.0),
            ]))
            .unwrap();
        assert!(p > 0.8, "p = {}", p);
    }

    #[test]
    fn test_caps_bound_single_feature() {
        let capped = HeuristicModel
            .predict_probability(&vector_with(&[("phishing_keyword_count", 1000.0)]))
            .unwrap();
        let at_cap = HeuristicModel
            .predict_probability(&vector_with(&[("phishing_keyword_count", 8.0)]))
            .unwrap();
        assert_eq!(capped, at_cap);
    }

    #[test]
    fn test_output_always_in_unit_interval() {
        let mut vector = FeatureVector::from_values([f32::MAX; FEATURE_COUNT]);
        vector.set_by_name("sender_valid", 0.0);
        let p = HeuristicModel.predict_probability(&vector).unwrap();
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_layout_mismatch_rejected() {
        let mut vector = FeatureVector::new();
        vector.layout_hash ^= 0xdead_beef;
        assert!(matches!(
            HeuristicModel.predict_probability(&vector),
            Err(ModelError::LayoutMismatch { .. })
        ));
    }

    #[test]
    fn test_info_ranks_features() {
        let info = HeuristicModel.info();
        assert_eq!(info.kind, "heuristic");
        assert_eq!(info.feature_count, FEATURE_COUNT);
        let first = &info.top_features[0];
        assert_eq!(first.weight.abs(), 1.5);
    }
}

//! Risk Classifier
//!
//! CHỈ chứa logic classify - không có types, không có policy.
//! Input: FeatureVector + phishing probability (từ model bên ngoài)
//! Output: Verdict

use super::rules::{recommendation, RiskBands, PHISHING_THRESHOLD};
use super::types::{Label, RiskLevel, Verdict};
use crate::error::ClassifyError;
use crate::logic::features::FeatureVector;

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Maps a model probability onto label, confidence and risk level.
///
/// The label cut-off is fixed at `PHISHING_THRESHOLD`; only the risk bands
/// are configurable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskClassifier {
    bands: RiskBands,
}

impl RiskClassifier {
    pub fn new(bands: RiskBands) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &RiskBands {
        &self.bands
    }

    /// Classify one vector given the model's phishing probability.
    ///
    /// Fails on anything outside `[0, 1]`; the probability is never clamped.
    pub fn classify(
        &self,
        vector: &FeatureVector,
        probability: f64,
    ) -> Result<Verdict, ClassifyError> {
        validate_probability(probability)?;

        let label = if probability >= PHISHING_THRESHOLD {
            Label::Phishing
        } else {
            Label::Legitimate
        };

        let confidence = match label {
            Label::Phishing => probability,
            Label::Legitimate => 1.0 - probability,
        };

        let risk_level = self.bands.level_for(probability);

        log::debug!(
            "Classified p={:.4} -> {} / {} (confidence {:.4})",
            probability,
            label,
            risk_level,
            confidence
        );

        Ok(Verdict {
            label,
            confidence,
            risk_level,
            recommendation: recommendation(risk_level).to_string(),
            feature_count: vector.len(),
            probability,
        })
    }

    /// Risk level alone; same validation as `classify`
    pub fn risk_level(&self, probability: f64) -> Result<RiskLevel, ClassifyError> {
        validate_probability(probability)?;
        Ok(self.bands.level_for(probability))
    }
}

fn validate_probability(probability: f64) -> Result<(), ClassifyError> {
    // NaN fails `contains` as well
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(ClassifyError::InvalidProbability(probability))
    }
}

// ============================================================================
// CONVENIENCE
// ============================================================================

/// Classify with the default bands
pub fn classify(vector: &FeatureVector, probability: f64) -> Result<Verdict, ClassifyError> {
    RiskClassifier::default().classify(vector, probability)
}

/// Quick risk level from just a probability (default bands)
pub fn risk_level(probability: f64) -> Result<RiskLevel, ClassifyError> {
    RiskClassifier::default().risk_level(probability)
}

// ============================================================================
// TESTS
// ============================================================================

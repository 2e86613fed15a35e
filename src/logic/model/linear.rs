//! Linear (logistic regression) model loaded from JSON
//!
//! File format:
//! ```json
//! {
//!   "name": "phish-lr-2024-11",
//!   "feature_version": 1,
//!   "layout_hash": 1234567890,
//!   "bias": -2.5,
//!   "weights": { "url_count": 0.4, "has_form": 1.1 },
//!   "normalization": { "min_vals": { "body_length": 0 }, "max_vals": { "body_length": 5000 } }
//! }
//! ```
//! Features absent from `weights` get weight 0. Normalization is optional;
//! features without an entry are used raw.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::inference::{logistic, rank_by_importance, ModelInfo, PhishingModel};
use crate::error::ModelError;
use crate::logic::features::{
    feature_index, feature_name, layout_hash, FeatureVector, FEATURE_COUNT, FEATURE_VERSION,
};

/// Min/max scaling learned at training time, keyed by feature name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationParams {
    #[serde(default)]
    pub min_vals: BTreeMap<String, f64>,
    #[serde(default)]
    pub max_vals: BTreeMap<String, f64>,
}

/// On-disk representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModelSpec {
    pub name: String,
    pub feature_version: u8,
    /// Checked when present
    #[serde(default)]
    pub layout_hash: Option<u32>,
    #[serde(default)]
    pub bias: f64,
    pub weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub normalization: Option<NormalizationParams>,
}

/// Per-feature scaling, resolved to layout order
#[derive(Debug, Clone, Copy)]
struct Scale {
    min: f64,
    range: f64,
}

/// Logistic regression over the feature vector
#[derive(Debug, Clone)]
pub struct LinearModel {
    name: String,
    bias: f64,
    weights: [f64; FEATURE_COUNT],
    scales: [Option<Scale>; FEATURE_COUNT],
    checksum: String,
    loaded_at: DateTime<Utc>,
}

impl LinearModel {
    /// Build from a parsed spec, resolving names against the current layout
    pub fn from_spec(spec: LinearModelSpec, checksum: String) -> Result<Self, ModelError> {
        let expected_hash = layout_hash();
        let actual_hash = spec.layout_hash.unwrap_or(expected_hash);
        if spec.feature_version != FEATURE_VERSION || actual_hash != expected_hash {
            return Err(ModelError::LayoutMismatch {
                expected_version: FEATURE_VERSION,
                expected_hash,
                actual_version: spec.feature_version,
                actual_hash,
            });
        }

        if !spec.bias.is_finite() {
            return Err(ModelError::InvalidWeight("bias".to_string()));
        }

        let mut weights = [0.0; FEATURE_COUNT];
        for (name, weight) in &spec.weights {
            let index = resolve(name)?;
            if !weight.is_finite() {
                return Err(ModelError::InvalidWeight(name.clone()));
            }
            weights[index] = *weight;
        }

        let mut scales = [None; FEATURE_COUNT];
        if let Some(norm) = &spec.normalization {
            for name in norm.min_vals.keys().chain(norm.max_vals.keys()) {
                let index = resolve(name)?;
                let min = norm.min_vals.get(name).copied().unwrap_or(0.0);
                let max = norm.max_vals.get(name).copied().unwrap_or(1.0);
                if !min.is_finite() || !max.is_finite() {
                    return Err(ModelError::InvalidWeight(name.clone()));
                }
                scales[index] = Some(Scale {
                    min,
                    range: (max - min).max(1e-8),
                });
            }
        }

        Ok(Self {
            name: spec.name,
            bias: spec.bias,
            weights,
            scales,
            checksum,
            loaded_at: Utc::now(),
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let spec: LinearModelSpec = serde_json::from_str(json)?;
        Self::from_spec(spec, sha256_hex(json.as_bytes()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        log::info!("Loading linear model from: {}", path.display());

        let bytes = std::fs::read(path)?;
        let spec: LinearModelSpec = serde_json::from_slice(&bytes)?;
        let model = Self::from_spec(spec, sha256_hex(&bytes))?;

        log::info!("Linear model '{}' loaded (sha256: {})", model.name, model.checksum);
        Ok(model)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Non-zero weights ranked by absolute value
    pub fn feature_importance(&self) -> Vec<super::inference::FeatureWeight> {
        rank_by_importance(
            self.weights
                .iter()
                .enumerate()
                .filter(|(_, w)| **w != 0.0)
                .filter_map(|(i, w)| feature_name(i).map(|n| (n.to_string(), *w))),
        )
    }

    fn scaled(&self, index: usize, value: f64) -> f64 {
        match self.scales[index] {
            Some(Scale { min, range }) => ((value - min) / range).clamp(0.0, 1.0),
            None => value,
        }
    }
}

impl PhishingModel for LinearModel {
    fn predict_probability(&self, vector: &FeatureVector) -> Result<f64, ModelError> {
        vector.validate()?;

        let z = vector
            .as_slice()
            .iter()
            .enumerate()
            .fold(self.bias, |acc, (i, value)| {
                acc + self.weights[i] * self.scaled(i, f64::from(*value))
            });

        Ok(logistic(z))
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            name: self.name.clone(),
            kind: "linear".to_string(),
            feature_count: FEATURE_COUNT,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            checksum: Some(self.checksum.clone()),
            loaded_at: Some(self.loaded_at),
            top_features: self.feature_importance(),
        }
    }
}

fn resolve(name: &str) -> Result<usize, ModelError> {
    feature_index(name).ok_or_else(|| ModelError::MissingFeature(name.to_string()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn model_json(weights: &str) -> String {
        format!(
            r#"{{"name": "test-lr", "feature_version": {}, "layout_hash": {}, "bias": -1.0, "weights": {}}}"#,
            FEATURE_VERSION,
            layout_hash(),
            weights
        )
    }

    #[test]
    fn test_bias_only_model() {
        let model = LinearModel::from_json_str(&model_json("{}")).unwrap();
        let p = model.predict_probability(&FeatureVector::new()).unwrap();
        assert!((p - logistic(-1.0)).abs() < 1e-12);
        assert!(model.feature_importance().is_empty());
    }

    #[test]
    fn test_weights_applied_by_name() {
        let model =
            LinearModel::from_json_str(&model_json(r#"{"url_count": 0.5, "has_form": 2.0}"#))
                .unwrap();
        let mut vector = FeatureVector::new();
        vector.set_by_name("url_count", 2.0);
        vector.set_by_name("has_form", 1.0);

        let p = model.predict_probability(&vector).unwrap();
        assert!((p - logistic(-1.0 + 1.0 + 2.0)).abs() < 1e-12);

        let ranked = model.feature_importance();
        assert_eq!(ranked[0].name, "has_form");
        assert_eq!(ranked[1].name, "url_count");
    }

    #[test]
    fn test_normalization() {
        let json = format!(
            r#"{{"name": "n", "feature_version": {}, "bias": 0.0,
                "weights": {{"body_length": 1.0}},
                "normalization": {{"min_vals": {{"body_length": 0}}, "max_vals": {{"body_length": 100}}}}}}"#,
            FEATURE_VERSION
        );
        let model = LinearModel::from_json_str(&json).unwrap();
        let mut vector = FeatureVector::new();
        vector.set_by_name("body_length", 5000.0);

        // clamped to 1.0 after scaling
        let p = model.predict_probability(&vector).unwrap();
        assert!((p - logistic(1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_feature_rejected() {
        let err = LinearModel::from_json_str(&model_json(r#"{"cpu_percent": 1.0}"#)).unwrap_err();
        assert!(matches!(err, ModelError::MissingFeature(name) if name == "cpu_percent"));
    }

    #[test]
    fn test_layout_mismatch_rejected() {
        let json = format!(
            r#"{{"name": "old", "feature_version": {}, "weights": {{}}}}"#,
            FEATURE_VERSION + 1
        );
        assert!(matches!(
            LinearModel::from_json_str(&json),
            Err(ModelError::LayoutMismatch { .. })
        ));

        let json = format!(
            r#"{{"name": "old", "feature_version": {}, "layout_hash": 7, "weights": {{}}}}"#,
            FEATURE_VERSION
        );
        assert!(matches!(
            LinearModel::from_json_str(&json),
            Err(ModelError::LayoutMismatch { actual_hash: 7, .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            LinearModel::from_json_str("{"),
            Err(ModelError::Parse(_))
        ));
    }

    #[test]
    fn test_from_file_records_checksum() {
        let json = model_json(r#"{"ip_url_count": 1.5}"#);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let model = LinearModel::from_file(file.path()).unwrap();
        let info = model.info();
        assert_eq!(info.kind, "linear");
        assert_eq!(info.name, "test-lr");
        assert_eq!(info.checksum.as_deref(), Some(sha256_hex(json.as_bytes()).as_str()));
        assert_eq!(info.checksum.unwrap().len(), 64);
    }

    #[test]
    fn test_bundled_example_model_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/model.example.json");
        let model = LinearModel::from_file(path).unwrap();
        assert_eq!(model.name(), "phish-lr-example");
        assert_eq!(model.feature_importance()[0].name, "phishing_keyword_count");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            LinearModel::from_file("/nonexistent/model.json"),
            Err(ModelError::Io(_))
        ));
    }
}

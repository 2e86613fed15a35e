//! Detector Configuration
//!
//! JSON config file, mọi field đều optional:
//! ```json
//! {
//!   "tables": { "suspicious_tlds": ["tk", "ml"] },
//!   "risk_bands": [{ "min_probability": 0.8, "level": "CRITICAL" }],
//!   "model_path": "models/phish-lr.json"
//! }
//! ```
//! Missing table fields fall back to the built-in lists. Unknown keys are
//! rejected. The PHISHING/LEGITIMATE cut-off is fixed at 0.5 and has no key.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::features::FeatureTables;
use super::threat::{RiskBands, RiskClassifier};
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    pub tables: FeatureTables,
    pub risk_bands: RiskBands,
    /// Linear model JSON; heuristic fallback when unset
    pub model_path: Option<PathBuf>,
}

impl DetectorConfig {
    /// Band table is validated during deserialization
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading detector config from: {}", path.display());

        let json = std::fs::read_to_string(path)?;
        let mut config = Self::from_json_str(&json)?;

        // Relative model paths are resolved against the config file
        if let (Some(model), Some(dir)) = (config.model_path.as_mut(), path.parent()) {
            if model.is_relative() {
                *model = dir.join(&*model);
            }
        }

        Ok(config)
    }

    pub fn classifier(&self) -> RiskClassifier {
        RiskClassifier::new(self.risk_bands.clone())
    }
}

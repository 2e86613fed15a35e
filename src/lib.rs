//! MailShield Core - Phishing Detection
//!
//! Feature extraction over raw emails and risk classification of a model's
//! phishing probability.
//!
//! ```ignore
//! use mailshield_core::{EmailRecord, PhishingDetector};
//!
//! let detector = PhishingDetector::default();
//! let email = EmailRecord::new("URGENT!", "Verify now: http://x.tk", "a@b.com");
//! let report = detector.analyze(&email)?;
//! println!("{} ({})", report.verdict.label, report.verdict.risk_level);
//! ```

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{ClassifyError, ConfigError, DetectorError, ModelError};
pub use logic::config::DetectorConfig;
pub use logic::detector::{AnalysisReport, BatchReport, EngineStatus, PhishingDetector};
pub use logic::email::EmailRecord;
pub use logic::features::{EmailFeatureExtractor, FeatureTables, FeatureVector};
pub use logic::model::{HeuristicModel, LinearModel, ModelInfo, PhishingModel};
pub use logic::threat::{classify, Label, RiskClassifier, RiskLevel, Verdict};

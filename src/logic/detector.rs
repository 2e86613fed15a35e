//! Phishing Detector - Analysis Pipeline Facade
//!
//! Email → Features → Model probability → Verdict.
//! Giữ model trong RwLock để swap lúc runtime; stats là atomic counters.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::DetectorConfig;
use super::email::EmailRecord;
use super::features::{EmailFeatureExtractor, FeatureVector, LayoutInfo};
use super::model::{HeuristicModel, LinearModel, ModelInfo, PhishingModel};
use super::threat::{RiskClassifier, Verdict};
use crate::error::{DetectorError, ModelError};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// What the report echoes back about the analyzed email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSummary {
    pub subject: String,
    pub sender: String,
}

/// Full result of analyzing one email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub email: EmailSummary,
    pub verdict: Verdict,
    /// Human-readable reasons derived from the feature vector
    pub indicators: Vec<String>,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<BTreeMap<String, f32>>,
    pub analyzed_at: DateTime<Utc>,
}

/// One entry of a batch run; exactly one of `report` / `error` is set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<AnalysisReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub total: usize,
    pub analyzed: usize,
    pub failed: usize,
    pub phishing: usize,
    pub results: Vec<BatchItem>,
}

/// Engine status snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_name: String,
    pub model_kind: String,
    /// Feature layout this detector extracts
    pub layout: LayoutInfo,
    pub analysis_count: u64,
    pub phishing_count: u64,
    pub avg_latency_us: f64,
}

// ============================================================================
// INDICATORS
// ============================================================================

/// (feature, description). Reported when the feature value is non-zero.
const INDICATORS: &[(&str, &str)] = &[
    ("sender_domain_has_digits", "Sender domain contains digits"),
    ("sender_domain_suspicious", "Sender domain contains lure terms"),
    ("sender_suspicious_tld", "Sender domain uses a high-risk TLD"),
    ("subject_urgency_hits", "Urgency terms in subject"),
    ("subject_exclamation_count", "Exclamation marks in subject"),
    ("phishing_keyword_count", "Phishing keywords in content"),
    ("ip_url_count", "Links pointing to raw IP addresses"),
    ("shortened_url_count", "Shortened links"),
    ("mismatched_url_count", "Link text does not match its target"),
    ("suspicious_tld_url_count", "Links to high-risk TLDs"),
    ("has_form", "Contains an HTML form"),
    ("has_script", "Contains a script"),
    ("has_hidden_element", "Contains hidden content"),
];

/// Features stored as 0/1 flags, reported without a count
const FLAG_FEATURES: &[&str] = &[
    "sender_domain_has_digits",
    "sender_domain_suspicious",
    "sender_suspicious_tld",
    "has_form",
    "has_script",
    "has_hidden_element",
];

/// Explain a vector in plain words, in layout order
pub fn indicators(vector: &FeatureVector) -> Vec<String> {
    let mut reasons = Vec::new();

    if vector.get_by_name("sender_valid") == Some(0.0) {
        reasons.push("Sender address is missing or malformed".to_string());
    }

    for (name, description) in INDICATORS {
        let value = vector.get_by_name(name).unwrap_or_default();
        if value <= 0.0 {
            continue;
        }
        if FLAG_FEATURES.contains(name) {
            reasons.push(description.to_string());
        } else {
            reasons.push(format!("{}: {}", description, value));
        }
    }

    reasons
}

// ============================================================================
// DETECTOR
// ============================================================================

#[derive(Debug, Default)]
struct DetectorStats {
    analyses: AtomicU64,
    phishing: AtomicU64,
    latency_sum_us: AtomicU64,
}

/// Thread-safe analysis pipeline. Share it behind an `Arc`.
pub struct PhishingDetector {
    extractor: EmailFeatureExtractor,
    classifier: RiskClassifier,
    model: RwLock<Arc<dyn PhishingModel>>,
    stats: DetectorStats,
}

impl PhishingDetector {
    pub fn new(
        extractor: EmailFeatureExtractor,
        classifier: RiskClassifier,
        model: Arc<dyn PhishingModel>,
    ) -> Self {
        Self {
            extractor,
            classifier,
            model: RwLock::new(model),
            stats: DetectorStats::default(),
        }
    }

    /// Build from config, loading the linear model when a path is set
    pub fn from_config(config: &DetectorConfig) -> Result<Self, DetectorError> {
        let classifier = config.classifier();
        let extractor = EmailFeatureExtractor::new(config.tables.clone());

        let model: Arc<dyn PhishingModel> = match &config.model_path {
            Some(path) => Arc::new(LinearModel::from_file(path)?),
            None => {
                log::warn!("No model configured, using heuristic fallback");
                Arc::new(HeuristicModel::new())
            }
        };

        Ok(Self::new(extractor, classifier, model))
    }

    /// Replace the model, returning the detector (builder style)
    pub fn with_model(self, model: Arc<dyn PhishingModel>) -> Self {
        self.set_model(model);
        self
    }

    pub fn set_model(&self, model: Arc<dyn PhishingModel>) {
        let info = model.info();
        *self.model.write() = model;
        log::info!("Model switched to '{}' ({})", info.name, info.kind);
    }

    /// Load a linear model from disk and swap it in.
    /// On failure the current model stays active.
    pub fn load_model(&self, path: impl AsRef<Path>) -> Result<ModelInfo, ModelError> {
        let model = LinearModel::from_file(path)?;
        let info = model.info();
        self.set_model(Arc::new(model));
        Ok(info)
    }

    pub fn model_info(&self) -> ModelInfo {
        self.model.read().info()
    }

    pub fn classifier(&self) -> &RiskClassifier {
        &self.classifier
    }

    pub fn extract_features(&self, email: &EmailRecord) -> FeatureVector {
        self.extractor.extract_features(email)
    }

    pub fn analyze(&self, email: &EmailRecord) -> Result<AnalysisReport, DetectorError> {
        self.run(email, false)
    }

    /// Same as `analyze`, with the named feature map attached
    pub fn analyze_detailed(&self, email: &EmailRecord) -> Result<AnalysisReport, DetectorError> {
        self.run(email, true)
    }

    /// Analyze every email; one failure does not stop the rest
    pub fn analyze_batch(&self, emails: &[EmailRecord]) -> BatchReport {
        let results: Vec<BatchItem> = emails
            .iter()
            .enumerate()
            .map(|(index, email)| match self.analyze(email) {
                Ok(report) => BatchItem {
                    index,
                    report: Some(report),
                    error: None,
                },
                Err(e) => {
                    log::warn!("Batch item {} failed: {}", index, e);
                    BatchItem {
                        index,
                        report: None,
                        error: Some(e.to_string()),
                    }
                }
            })
            .collect();

        let analyzed = results.iter().filter(|r| r.report.is_some()).count();
        let phishing = results
            .iter()
            .filter_map(|r| r.report.as_ref())
            .filter(|r| r.verdict.is_phishing())
            .count();

        log::info!(
            "Batch complete: {} emails, {} analyzed, {} phishing",
            emails.len(),
            analyzed,
            phishing
        );

        BatchReport {
            total: emails.len(),
            analyzed,
            failed: emails.len() - analyzed,
            phishing,
            results,
        }
    }

    pub fn status(&self) -> EngineStatus {
        let info = self.model_info();
        let count = self.stats.analyses.load(Ordering::Relaxed);
        let sum = self.stats.latency_sum_us.load(Ordering::Relaxed);
        let avg = if count > 0 { sum as f64 / count as f64 } else { 0.0 };

        EngineStatus {
            model_name: info.name,
            model_kind: info.kind,
            layout: LayoutInfo::current(),
            analysis_count: count,
            phishing_count: self.stats.phishing.load(Ordering::Relaxed),
            avg_latency_us: avg,
        }
    }

    fn run(&self, email: &EmailRecord, with_features: bool) -> Result<AnalysisReport, DetectorError> {
        let start = Instant::now();

        let vector = self.extractor.extract_features(email);

        // Clone the Arc so the lock is not held during inference
        let model = Arc::clone(&*self.model.read());
        let probability = model.predict_probability(&vector)?;
        let verdict = self.classifier.classify(&vector, probability)?;

        let elapsed = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.stats.analyses.fetch_add(1, Ordering::Relaxed);
        self.stats.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
        if verdict.is_phishing() {
            self.stats.phishing.fetch_add(1, Ordering::Relaxed);
        }

        log::debug!(
            "Analyzed '{}' from '{}': {} {} in {}us",
            email.subject,
            email.sender,
            verdict.label,
            verdict.risk_level,
            elapsed
        );

        let features = with_features.then(|| {
            vector
                .iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect()
        });

        Ok(AnalysisReport {
            id: Uuid::new_v4(),
            email: EmailSummary {
                subject: email.subject.clone(),
                sender: email.sender.clone(),
            },
            indicators: indicators(&vector),
            verdict,
            model: model.info().name,
            features,
            analyzed_at: Utc::now(),
        })
    }
}

impl Default for PhishingDetector {
    fn default() -> Self {
        Self::new(
            EmailFeatureExtractor::default(),
            RiskClassifier::default(),
            Arc::new(HeuristicModel::new()),
        )
    }
}

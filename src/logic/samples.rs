//! Labeled Samples & Evaluation
//!
//! Bộ email mẫu có nhãn (JSONL, mỗi dòng một record) dùng để kiểm tra
//! nhanh model hiện tại: confusion matrix, accuracy, precision, recall.

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::detector::PhishingDetector;
use super::email::EmailRecord;
use super::threat::Label;
use crate::error::ConfigError;

/// Built-in corpus: 10 phishing, 10 legitimate
const SAMPLE_CORPUS: &str = include_str!("../../data/sample_emails.jsonl");

static SAMPLES: Lazy<Vec<LabeledEmail>> =
    Lazy::new(|| parse_jsonl(SAMPLE_CORPUS).expect("built-in sample corpus is valid JSONL"));

/// One corpus line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledEmail {
    pub subject: String,
    pub body: String,
    pub sender: String,
    #[serde(default)]
    pub urls: Vec<String>,
    pub label: Label,
}

impl LabeledEmail {
    pub fn to_email(&self) -> EmailRecord {
        EmailRecord::new(&*self.subject, &*self.body, &*self.sender).with_urls(self.urls.iter())
    }
}

pub fn sample_corpus() -> &'static [LabeledEmail] {
    &SAMPLES
}

/// Parse JSONL, skipping blank lines
pub fn parse_jsonl(content: &str) -> Result<Vec<LabeledEmail>, serde_json::Error> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str)
        .collect()
}

pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<LabeledEmail>, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let samples = parse_jsonl(&content)?;
    log::info!("Loaded {} labeled emails from {}", samples.len(), path.display());
    Ok(samples)
}

// ============================================================================
// EVALUATION
// ============================================================================

/// A wrong prediction, kept for inspection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Misclassified {
    pub index: usize,
    pub subject: String,
    pub expected: Label,
    pub predicted: Label,
    pub probability: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub model: String,
    pub total: usize,
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
    /// Samples the detector failed on (not counted in the matrix)
    pub errors: usize,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub misclassified: Vec<Misclassified>,
}

impl EvaluationReport {
    fn finish(mut self) -> Self {
        let tp = self.true_positives as f64;
        let fp = self.false_positives as f64;
        let tn = self.true_negatives as f64;
        let fn_ = self.false_negatives as f64;

        self.accuracy = ratio(tp + tn, tp + tn + fp + fn_);
        self.precision = ratio(tp, tp + fp);
        self.recall = ratio(tp, tp + fn_);
        self.f1_score = ratio(
            2.0 * self.precision * self.recall,
            self.precision + self.recall,
        );
        self
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// Run the detector over labeled samples and score its labels
pub fn evaluate(detector: &PhishingDetector, samples: &[LabeledEmail]) -> EvaluationReport {
    let mut report = EvaluationReport {
        model: detector.model_info().name,
        total: samples.len(),
        ..Default::default()
    };

    for (index, sample) in samples.iter().enumerate() {
        let verdict = match detector.analyze(&sample.to_email()) {
            Ok(analysis) => analysis.verdict,
            Err(e) => {
                log::warn!("Sample {} failed: {}", index, e);
                report.errors += 1;
                continue;
            }
        };

        match (sample.label, verdict.label) {
            (Label::Phishing, Label::Phishing) => report.true_positives += 1,
            (Label::Legitimate, Label::Legitimate) => report.true_negatives += 1,
            (Label::Legitimate, Label::Phishing) => report.false_positives += 1,
            (Label::Phishing, Label::Legitimate) => report.false_negatives += 1,
        }

        if sample.label != verdict.label {
            report.misclassified.push(Misclassified {
                index,
                subject: sample.subject.clone(),
                expected: sample.label,
                predicted: verdict.label,
                probability: verdict.probability,
            });
        }
    }

    let report = report.finish();
    log::info!(
        "Evaluated {} samples: accuracy {:.3}, precision {:.3}, recall {:.3}",
        report.total,
        report.accuracy,
        report.precision,
        report.recall
    );
    report
}

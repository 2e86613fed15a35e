//! Email Feature Extractor
//!
//! Runs every feature group over one email and assembles the vector.
//! Pure: no I/O, no clock, no randomness. Same email in, same vector out.

use super::content::ContentFeatures;
use super::html::HtmlFeatures;
use super::sender::SenderFeatures;
use super::subject::SubjectFeatures;
use super::tables::FeatureTables;
use super::text::text_body;
use super::url::UrlFeatures;
use super::vector::{FeatureExtractor, FeatureVector};
use crate::logic::email::EmailRecord;

/// Feature extractor configured with an immutable set of lookup tables
#[derive(Debug, Clone)]
pub struct EmailFeatureExtractor {
    tables: FeatureTables,
}

impl EmailFeatureExtractor {
    pub fn new(tables: FeatureTables) -> Self {
        Self {
            tables: tables.normalized(),
        }
    }

    pub fn tables(&self) -> &FeatureTables {
        &self.tables
    }

    /// Extract the full feature vector. Never fails: empty or malformed
    /// fields simply yield zeros for the affected features.
    pub fn extract_features(&self, email: &EmailRecord) -> FeatureVector {
        let body = text_body(&email.body);

        let sender = SenderFeatures::analyze(&email.sender, &self.tables);
        let subject = SubjectFeatures::analyze(&email.subject, &self.tables);
        let content = ContentFeatures::analyze(&email.subject, &body, &self.tables);
        let urls = UrlFeatures::analyze(&email.urls, &email.body, &self.tables);
        let html = HtmlFeatures::analyze(&email.body, &self.tables);

        let groups: [&dyn FeatureExtractor; 5] = [&sender, &subject, &content, &urls, &html];

        let mut vector = FeatureVector::new();
        for group in groups {
            group.extract(&mut vector);
        }

        log::debug!(
            "Extracted {} features (subject_len={}, urls={})",
            vector.len(),
            email.subject.chars().count(),
            vector.get_by_name("url_count").unwrap_or_default()
        );

        vector
    }
}

impl Default for EmailFeatureExtractor {
    fn default() -> Self {
        Self::new(FeatureTables::default())
    }
}

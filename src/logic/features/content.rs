//! Content Feature Extraction
//!
//! Works on the visible text of the body (HTML already stripped).

use super::tables::FeatureTables;
use super::text::{char_ratio, count_distinct_terms};
use super::vector::{FeatureExtractor, FeatureVector};

/// Urgency score is "weighted hits per 100 chars"; shorter bodies are
/// treated as 100 chars so a two-word mail cannot explode the score.
pub const URGENCY_NORMALIZATION_FLOOR: usize = 100;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentFeatures {
    pub length: usize,
    pub word_count: usize,
    pub phishing_keyword_count: usize,
    pub special_char_ratio: f32,
    pub uppercase_ratio: f32,
    pub urgency_score: f32,
}

impl ContentFeatures {
    /// `text_body` is the tag-stripped body; keywords are also searched in the subject
    pub fn analyze(subject: &str, text_body: &str, tables: &FeatureTables) -> Self {
        let lower_body = text_body.to_lowercase();
        let combined = format!("{} {}", subject.to_lowercase(), lower_body);
        let length = text_body.chars().count();

        Self {
            length,
            word_count: text_body.split_whitespace().count(),
            phishing_keyword_count: count_distinct_terms(
                &combined,
                tables.phishing_keywords.iter().map(String::as_str),
            ),
            special_char_ratio: char_ratio(text_body, |c| {
                !c.is_alphanumeric() && !c.is_whitespace()
            }),
            uppercase_ratio: char_ratio(text_body, char::is_uppercase),
            urgency_score: urgency_score(&lower_body, length, tables),
        }
    }
}

impl FeatureExtractor for ContentFeatures {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.set_by_name("body_length", self.length as f32);
        vector.set_by_name("body_word_count", self.word_count as f32);
        vector.set_by_name("phishing_keyword_count", self.phishing_keyword_count as f32);
        vector.set_by_name("special_char_ratio", self.special_char_ratio);
        vector.set_by_name("uppercase_ratio", self.uppercase_ratio);
        vector.set_by_name("urgency_score", self.urgency_score);
    }
}

/// Σ weight × occurrences, per 100 chars of body
fn urgency_score(lower_body: &str, length: usize, tables: &FeatureTables) -> f32 {
    if length == 0 {
        return 0.0;
    }

    let weighted: f32 = tables
        .urgency_terms
        .iter()
        .map(|u| u.weight * lower_body.matches(u.term.as_str()).count() as f32)
        .sum();

    weighted * 100.0 / length.max(URGENCY_NORMALIZATION_FLOOR) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(subject: &str, body: &str) -> ContentFeatures {
        ContentFeatures::analyze(subject, body, &FeatureTables::default())
    }

    #[test]
    fn test_phishing_body() {
        let f = analyze(
            "URGENT: Your account will be suspended!",
            "Click here to verify your identity immediately: http://phishing-site.tk",
        );
        // urgent, suspend, suspended, account, click here, verify
        assert_eq!(f.phishing_keyword_count, 6);
        // verify (1.0) + immediately (2.0), body shorter than the floor
        assert!((f.urgency_score - 3.0).abs() < 1e-6);
        assert_eq!(f.word_count, 8);
    }

    #[test]
    fn test_calm_body() {
        let f = analyze(
            "Project Update - Q4 Review",
            "Team, please review the Q4 project status document attached.",
        );
        assert_eq!(f.urgency_score, 0.0);
        assert_eq!(f.phishing_keyword_count, 1); // "update" from the subject
        assert!(f.special_char_ratio > 0.0 && f.special_char_ratio < 0.1);
    }

    #[test]
    fn test_urgency_normalized_by_length() {
        let short = analyze("", "urgent");
        let long_body = format!("urgent {}", "word ".repeat(100));
        let long = analyze("", &long_body);
        assert!(short.urgency_score > long.urgency_score);
        assert!(long.urgency_score > 0.0);
    }

    #[test]
    fn test_ratios() {
        let f = analyze("", "AB!?");
        assert_eq!(f.uppercase_ratio, 0.5);
        assert_eq!(f.special_char_ratio, 0.5);
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(analyze("", ""), ContentFeatures::default());
    }
}

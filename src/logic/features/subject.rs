//! Subject Feature Extraction

use super::tables::FeatureTables;
use super::text::count_distinct_terms;
use super::vector::{FeatureExtractor, FeatureVector};

/// Minimum letters for a word to count as shouting ("OK" yes, "Q4" no)
pub const MIN_SHOUT_LETTERS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectFeatures {
    pub length: usize,
    pub uppercase_words: usize,
    pub exclamation_count: usize,
    pub urgency_hits: usize,
}

impl SubjectFeatures {
    pub fn analyze(subject: &str, tables: &FeatureTables) -> Self {
        let lower = subject.to_lowercase();

        Self {
            length: subject.chars().count(),
            uppercase_words: subject.split_whitespace().filter(|w| is_shouting(w)).count(),
            exclamation_count: subject.matches('!').count(),
            urgency_hits: count_distinct_terms(
                &lower,
                tables.urgency_terms.iter().map(|u| u.term.as_str()),
            ),
        }
    }
}

impl FeatureExtractor for SubjectFeatures {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.set_by_name("subject_length", self.length as f32);
        vector.set_by_name("subject_uppercase_words", self.uppercase_words as f32);
        vector.set_by_name("subject_exclamation_count", self.exclamation_count as f32);
        vector.set_by_name("subject_urgency_hits", self.urgency_hits as f32);
    }
}

fn is_shouting(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= MIN_SHOUT_LETTERS && letters.iter().all(|c| c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(subject: &str) -> SubjectFeatures {
        SubjectFeatures::analyze(subject, &FeatureTables::default())
    }

    #[test]
    fn test_urgent_subject() {
        let f = analyze("URGENT: Your account will be suspended!");
        assert_eq!(f.uppercase_words, 1);
        assert_eq!(f.exclamation_count, 1);
        assert_eq!(f.urgency_hits, 2); // urgent, suspended
        assert_eq!(f.length, 39);
    }

    #[test]
    fn test_calm_subject() {
        let f = analyze("Project Update - Q4 Review");
        assert_eq!(f.uppercase_words, 0);
        assert_eq!(f.exclamation_count, 0);
        assert_eq!(f.urgency_hits, 0);
    }

    #[test]
    fn test_shouting_words() {
        assert!(is_shouting("NOW!!"));
        assert!(is_shouting("FINAL"));
        assert!(!is_shouting("Q4"));
        assert!(!is_shouting("Final"));
        assert!(!is_shouting("!!!"));
        assert_eq!(analyze("FINAL NOTICE - Account Locked").uppercase_words, 2);
    }

    #[test]
    fn test_urgency_is_case_insensitive() {
        assert_eq!(analyze("Please VERIFY Immediately").urgency_hits, 2);
    }

    #[test]
    fn test_empty_subject() {
        assert_eq!(analyze(""), SubjectFeatures::default());
    }
}

//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! A model file records the version and hash it was trained against, so any
//! drift here is caught at load time instead of producing silent garbage.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Sender (0-5) ===
    "sender_valid",              // 0: one '@', non-empty local and domain
    "sender_domain_has_digits",  // 1: digits in sender domain
    "sender_domain_suspicious",  // 2: suspicious substring in sender domain
    "sender_suspicious_tld",     // 3: sender domain on a high-risk TLD
    "sender_free_mail",          // 4: free-mail provider
    "sender_domain_length",      // 5: chars in sender domain

    // === Subject (6-9) ===
    "subject_length",            // 6
    "subject_uppercase_words",   // 7: shouting
    "subject_exclamation_count", // 8
    "subject_urgency_hits",      // 9: distinct urgency terms

    // === Content (10-15) ===
    "body_length",               // 10: text body chars (tags stripped)
    "body_word_count",           // 11
    "phishing_keyword_count",    // 12: distinct phishing keywords, subject + body
    "special_char_ratio",        // 13: non-alphanumeric / total
    "uppercase_ratio",           // 14: uppercase / total
    "urgency_score",             // 15: weighted urgency hits per 100 chars

    // === URL (16-21) ===
    "url_count",                 // 16
    "ip_url_count",              // 17: raw IP hosts
    "shortened_url_count",       // 18: bit.ly & co
    "mismatched_url_count",      // 19: display text names another domain
    "suspicious_tld_url_count",  // 20
    "url_dot_count",             // 21: subdomain depth indicator

    // === HTML / structure (22-24) ===
    "has_form",                  // 22
    "has_script",                // 23
    "has_hidden_element",        // 24
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 25;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), ModelError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(ModelError::LayoutMismatch {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

/// Check if layout is compatible (same version, same hash)
pub fn is_layout_compatible(version: u8, hash: u32) -> bool {
    version == FEATURE_VERSION && hash == layout_hash()
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 25);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_feature_names_unique() {
        let unique: HashSet<_> = FEATURE_LAYOUT.iter().collect();
        assert_eq!(unique.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(compute_layout_hash(), compute_layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_validate_layout() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash()).is_ok());
        assert!(validate_layout(FEATURE_VERSION + 1, layout_hash()).is_err());
        assert!(validate_layout(FEATURE_VERSION, layout_hash().wrapping_add(1)).is_err());
        assert!(is_layout_compatible(FEATURE_VERSION, layout_hash()));
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("sender_valid"), Some(0));
        assert_eq!(feature_index("url_count"), Some(16));
        assert_eq!(feature_index("has_hidden_element"), Some(24));
        assert_eq!(feature_index("cpu_percent"), None);
    }

    #[test]
    fn test_feature_name() {
        assert_eq!(feature_name(0), Some("sender_valid"));
        assert_eq!(feature_name(24), Some("has_hidden_element"));
        assert_eq!(feature_name(100), None);
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }
}

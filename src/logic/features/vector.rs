//! Feature Vector - Core data structure for model input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::layout::{
    feature_index, layout_hash, validate_layout, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION,
};
use crate::error::ModelError;

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
///
/// Every vector carries the full key set; there is no way to build one with
/// a missing or extra feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0.0; FEATURE_COUNT],
        }
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Number of named features (always FEATURE_COUNT)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        feature_index(name).and_then(|i| self.get(i))
    }

    pub fn set(&mut self, index: usize, value: f32) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    /// Set feature by name. Returns false for names outside the layout.
    pub fn set_by_name(&mut self, name: &str, value: f32) -> bool {
        match feature_index(name) {
            Some(index) => {
                self.set(index, value);
                true
            }
            None => false,
        }
    }

    /// Set a 0/1 indicator feature
    pub fn set_flag(&mut self, name: &str, flag: bool) -> bool {
        self.set_by_name(name, if flag { 1.0 } else { 0.0 })
    }

    /// (name, value) pairs in layout order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }

    /// Name-keyed view, sorted by name
    pub fn to_named_map(&self) -> BTreeMap<&'static str, f32> {
        self.iter().collect()
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_layout(self.version, self.layout_hash)
    }

    pub fn is_compatible(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values.to_vec(),
            "named_values": self.to_named_map(),
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[f32; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f32; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

// ============================================================================
// FEATURE EXTRACTOR TRAIT
// ============================================================================

/// One analyzed feature group (sender, subject, content, url, html).
///
/// Each group writes only its own slots; running every group over a zeroed
/// vector yields the complete layout.
pub trait FeatureExtractor {
    /// Write this group's features into the vector
    fn extract(&self, vector: &mut FeatureVector);
}

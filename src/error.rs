//! Error handling
//!
//! Feature extraction has no error type: it normalizes malformed input
//! instead of rejecting it. Everything that can fail lives here.

use thiserror::Error;

/// Errors raised by the risk classifier.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ClassifyError {
    /// Model returned something outside `[0, 1]` (or NaN / infinity)
    #[error("invalid phishing probability {0}: expected a finite value in [0, 1]")]
    InvalidProbability(f64),
}

/// Errors raised while loading or running a probability model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(
        "feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), \
         got v{actual_version} (hash: {actual_hash:08x})"
    )]
    LayoutMismatch {
        expected_version: u8,
        expected_hash: u32,
        actual_version: u8,
        actual_hash: u32,
    },

    #[error("model references unknown feature '{0}'")]
    MissingFeature(String),

    #[error("model weight for '{0}' is not a finite number")]
    InvalidWeight(String),

    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while loading detector configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid risk bands: {0}")]
    InvalidBands(String),
}

/// Errors surfaced by the detector facade.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

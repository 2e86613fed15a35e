//! Model Module - Probability models
//!
//! Tách logic inference khỏi risk scoring.
//! Dễ dàng swap model: linear weights từ file, hoặc heuristic fallback.

pub mod inference;
pub mod linear;

// Re-export common types
pub use inference::{FeatureWeight, HeuristicModel, ModelInfo, PhishingModel};
pub use linear::{LinearModel, LinearModelSpec, NormalizationParams};

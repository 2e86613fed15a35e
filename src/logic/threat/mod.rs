//! Threat Module
//!
//! Phân loại email dựa trên phishing probability từ model.
//! Đây là CORE STEP - nơi quyết định PHISHING/LEGITIMATE và risk level.
//!
//! ## Structure
//! - `types`: Core types (Label, RiskLevel, Verdict)
//! - `rules`: Thresholds, band table, recommendations
//! - `classifier`: Classification logic
//!
//! ## Usage
//! ```ignore
//! use mailshield_core::logic::threat::{classify, RiskLevel};
//!
//! let verdict = classify(&vector, 0.945)?;
//! match verdict.risk_level {
//!     RiskLevel::Critical | RiskLevel::High => println!("Block"),
//!     RiskLevel::Medium => println!("Warn"),
//!     _ => println!("Deliver"),
//! }
//! ```

pub mod classifier;
pub mod rules;
pub mod types;

// Re-export main types for convenience
pub use types::{Label, RiskLevel, Verdict};

pub use rules::{
    recommendation, RiskBand, RiskBands, CRITICAL_THRESHOLD, HIGH_THRESHOLD, LOW_THRESHOLD,
    MEDIUM_THRESHOLD, PHISHING_THRESHOLD,
};

pub use classifier::{classify, risk_level, RiskClassifier};

//! Logic Module - Business Logic & Engines
//!
//! Chứa pipeline phân tích email: Features → Model → Threat.
//!
//! - `features/` - Feature extraction (sender, subject, content, URL, HTML)
//! - `model/` - Probability models (linear weights, heuristic fallback)
//! - `threat/` - Risk classification (label, confidence, risk level)
//! - `detector` - Facade ghép cả pipeline, có stats
//! - `samples` - Labeled corpus & evaluation

pub mod config;
pub mod detector;
pub mod email;
pub mod features;
pub mod model;
pub mod samples;
pub mod threat;

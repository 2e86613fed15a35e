//! Features Module - Feature Extraction Engine
//!
//! Tách logic trích xuất features khỏi phân loại.
//! Mỗi nhóm (sender, subject, content, url, html) nằm trong file riêng,
//! `extractor` ghép chúng thành một `FeatureVector` cố định.

pub mod content;
pub mod extractor;
pub mod html;
pub mod layout;
pub mod sender;
pub mod subject;
pub mod tables;
pub mod text;
pub mod url;
pub mod vector;


// Re-export common types
pub use extractor::EmailFeatureExtractor;
pub use layout::{feature_index, feature_name, layout_hash, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use tables::{FeatureTables, UrgencyTerm};
pub use vector::{FeatureExtractor, FeatureVector};

//! HTML / Structural Feature Extraction
//!
//! Pattern detection only, over the raw body. No DOM.

use once_cell::sync::Lazy;
use regex::Regex;

use super::tables::FeatureTables;
use super::text::compact_lowercase;
use super::vector::{FeatureExtractor, FeatureVector};

/// Bare `hidden` attribute, e.g. `<div hidden>` or `<span class=x hidden/>`
static HIDDEN_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<[a-z][a-z0-9]*\b[^>]*\shidden(\s*=\s*["']?[^"'\s>]*["']?)?(\s|/|>)"#)
        .expect("valid hidden attribute regex")
});

/// Zero font size in any unit, matched on the compacted body.
/// `font-size:0.5em` and `font-size:10px` do not match.
static ZERO_FONT_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"font-size:0+(\.0+)?(px|pt|em|rem|%)?([;"'>}]|!important|$)"#)
        .expect("valid zero font size regex")
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlFeatures {
    pub has_form: bool,
    pub has_script: bool,
    pub has_hidden_element: bool,
}

impl HtmlFeatures {
    pub fn analyze(raw_body: &str, tables: &FeatureTables) -> Self {
        let lower = raw_body.to_lowercase();
        let compact = compact_lowercase(raw_body);

        Self {
            has_form: lower.contains("<form"),
            has_script: lower.contains("<script"),
            has_hidden_element: tables
                .hidden_markers
                .iter()
                .any(|marker| compact.contains(marker.as_str()))
                || ZERO_FONT_SIZE.is_match(&compact)
                || HIDDEN_ATTRIBUTE.is_match(raw_body),
        }
    }
}

impl FeatureExtractor for HtmlFeatures {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.set_flag("has_form", self.has_form);
        vector.set_flag("has_script", self.has_script);
        vector.set_flag("has_hidden_element", self.has_hidden_element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(body: &str) -> HtmlFeatures {
        HtmlFeatures::analyze(body, &FeatureTables::default())
    }

    #[test]
    fn test_form_and_script() {
        let f = analyze(r#"<FORM action="http://x.tk"><input name=p></form><Script>x()</script>"#);
        assert!(f.has_form);
        assert!(f.has_script);
        assert!(!f.has_hidden_element);
    }

    #[test]
    fn test_hidden_markers() {
        assert!(analyze(r#"<div style="display : none">x</div>"#).has_hidden_element);
        assert!(analyze(r#"<span style='VISIBILITY:hidden'>"#).has_hidden_element);
        assert!(analyze(r#"<input type="hidden" name="t">"#).has_hidden_element);
        assert!(analyze("<div hidden>secret</div>").has_hidden_element);
        assert!(analyze(r#"<p class="a" hidden="hidden">x</p>"#).has_hidden_element);
    }

    #[test]
    fn test_zero_font_size() {
        assert!(analyze(r#"<span style="font-size:0">verify now</span>"#).has_hidden_element);
        assert!(analyze(r#"<span style='font-size: 0px'>x</span>"#).has_hidden_element);
        assert!(analyze(r#"<td style="FONT-SIZE:0;color:#fff">x</td>"#).has_hidden_element);
        assert!(analyze(r#"<p style="font-size:0.0em !important">x</p>"#).has_hidden_element);
        assert!(analyze("<style>.t{font-size:0%}</style>").has_hidden_element);

        assert!(!analyze(r#"<span style="font-size:0.5em">small</span>"#).has_hidden_element);
        assert!(!analyze(r#"<span style="font-size:10px">x</span>"#).has_hidden_element);
        assert!(!analyze(r#"<span style="font-size:0.75rem">x</span>"#).has_hidden_element);
    }

    #[test]
    fn test_plain_text_mentions_are_not_markup() {
        let f = analyze("The form is hidden in the attached document.");
        assert!(!f.has_form);
        assert!(!f.has_script);
        assert!(!f.has_hidden_element);
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(analyze(""), HtmlFeatures::default());
    }
}

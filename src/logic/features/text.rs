//! Text helpers shared by the feature groups
//!
//! Không dùng HTML parser: chỉ cần loại bỏ tag để đếm ký tự / từ.

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<(script|style)\b.*?</(script|style)\s*>|</?[a-z!][^>]*>")
        .expect("valid tag regex")
});

static HTML_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?[a-z][a-z0-9]*(\s[^>]*)?/?>").expect("valid hint regex"));

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(nbsp|amp|lt|gt|quot|#39);").expect("valid entity regex"));

/// Does the body look like markup rather than plain text?
pub fn looks_like_html(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.contains("<html") || lower.contains("<body") || HTML_HINT.is_match(body)
}

/// Visible text of an HTML body: tags, comments, scripts and styles removed,
/// common entities decoded, whitespace collapsed. Plain text passes through.
pub fn text_body(body: &str) -> String {
    if !looks_like_html(body) {
        return body.to_string();
    }

    let stripped = HTML_TAG.replace_all(body, " ");
    let decoded = ENTITY.replace_all(&stripped, |caps: &regex::Captures| {
        match &caps[1] {
            "nbsp" => " ",
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "quot" => "\"",
            _ => "'",
        }
        .to_string()
    });

    collapse_whitespace(&decoded)
}

/// Remove markup from a fragment (anchor display text)
pub fn strip_tags(fragment: &str) -> String {
    collapse_whitespace(&HTML_TAG.replace_all(fragment, " "))
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercased copy with every whitespace char removed
pub fn compact_lowercase(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Number of listed terms that appear at least once in `haystack`.
/// Both sides are expected in lowercase.
pub fn count_distinct_terms<'a, I>(haystack: &str, terms: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    terms
        .into_iter()
        .filter(|term| haystack.contains(term))
        .count()
}

/// Character ratio helper: 0 for empty text
pub fn char_ratio(text: &str, predicate: impl Fn(char) -> bool) -> f32 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let matched = text.chars().filter(|c| predicate(*c)).count();
    matched as f32 / total as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_untouched() {
        let body = "Hi team,  see you at 3 < 4 pm";
        assert!(!looks_like_html(body));
        assert_eq!(text_body(body), body);
    }

    #[test]
    fn test_html_is_stripped() {
        let body = "<html><body><p>Hello&nbsp;<b>there</b></p><script>var x=1;</script></body></html>";
        assert!(looks_like_html(body));
        assert_eq!(text_body(body), "Hello there");
    }

    #[test]
    fn test_fragment_detected_without_html_tag() {
        assert!(looks_like_html(r#"Go <a href="http://x.com">here</a>"#));
        assert_eq!(text_body(r#"Go <a href="http://x.com">here</a>"#), "Go here");
    }

    #[test]
    fn test_compact_lowercase() {
        assert_eq!(compact_lowercase("Display : NONE"), "display:none");
    }

    #[test]
    fn test_count_distinct_terms() {
        let text = "verify verify your account";
        assert_eq!(count_distinct_terms(text, ["verify", "account", "bank"]), 2);
    }

    #[test]
    fn test_char_ratio() {
        assert_eq!(char_ratio("", |c| c.is_uppercase()), 0.0);
        assert_eq!(char_ratio("AbCd", |c| c.is_uppercase()), 0.5);
    }
}

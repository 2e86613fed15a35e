//! URL Feature Extraction
//!
//! URLs come from the explicit `urls` list when given, otherwise they are
//! pulled out of the raw body. Hosts are parsed with `url` (WHATWG rules),
//! so numeric IPv4 spellings normalize to addresses.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use url::{Host, ParseError, Url};

use super::tables::{is_same_or_subdomain, FeatureTables};
use super::text::strip_tags;
use super::vector::{FeatureExtractor, FeatureVector};

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bhttps?://[^\s<>"'`]+"#).expect("valid url regex"));

static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a\s*>"#)
        .expect("valid anchor regex")
});

static DOMAIN_LIKE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b((?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,24})\b")
        .expect("valid domain regex")
});

/// Last labels that name attachments rather than TLDs
const FILE_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "csv", "rtf", "odt", "png",
    "jpg", "jpeg", "gif", "svg", "htm", "html", "exe", "msi", "rar", "eml", "ics", "json", "xml",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlFeatures {
    pub url_count: usize,
    pub ip_url_count: usize,
    pub shortened_url_count: usize,
    pub mismatched_url_count: usize,
    pub suspicious_tld_url_count: usize,
    pub dot_count: usize,
}

impl UrlFeatures {
    /// `urls` is the explicit list (may be empty); `raw_body` is the body as
    /// submitted, markup included.
    pub fn analyze(urls: &[String], raw_body: &str, tables: &FeatureTables) -> Self {
        let urls = collect_urls(urls, raw_body);
        let hosts: Vec<Host<String>> = urls.iter().filter_map(|u| url_host(u)).collect();
        let domains: Vec<&str> = hosts
            .iter()
            .filter_map(|h| match h {
                Host::Domain(d) => Some(d.as_str()),
                _ => None,
            })
            .collect();

        Self {
            url_count: urls.len(),
            ip_url_count: hosts.iter().filter(|h| is_ip(h)).count(),
            shortened_url_count: domains.iter().filter(|d| tables.is_shortener(d)).count(),
            mismatched_url_count: count_mismatched_links(raw_body),
            suspicious_tld_url_count: domains
                .iter()
                .filter(|d| tables.is_suspicious_tld(d))
                .count(),
            dot_count: hosts.iter().map(|h| h.to_string().matches('.').count()).sum(),
        }
    }
}

impl FeatureExtractor for UrlFeatures {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.set_by_name("url_count", self.url_count as f32);
        vector.set_by_name("ip_url_count", self.ip_url_count as f32);
        vector.set_by_name("shortened_url_count", self.shortened_url_count as f32);
        vector.set_by_name("mismatched_url_count", self.mismatched_url_count as f32);
        vector.set_by_name("suspicious_tld_url_count", self.suspicious_tld_url_count as f32);
        vector.set_by_name("url_dot_count", self.dot_count as f32);
    }
}

/// Explicit list if it has any non-blank entry, else URLs found in the body.
/// Duplicates are dropped, first-seen order kept.
pub fn collect_urls(explicit: &[String], raw_body: &str) -> Vec<String> {
    let explicit: Vec<&str> = explicit
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .collect();

    let candidates: Vec<&str> = if explicit.is_empty() {
        extract_urls(raw_body)
    } else {
        explicit
    };

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|u| seen.insert(*u))
        .map(str::to_string)
        .collect()
}

/// `http(s)://` tokens in free text, trailing punctuation trimmed
pub fn extract_urls(text: &str) -> Vec<&str> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(|c: char| ".,;:!?)]}".contains(c)))
        .collect()
}

/// Host of a URL, `None` when it has none (`mailto:`, garbage).
/// Entries without a scheme are read as `http://` + entry.
pub fn url_host(raw: &str) -> Option<Host<String>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.chars().any(char::is_whitespace) {
        return None;
    }

    let parsed = match Url::parse(raw) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{}", raw)).ok()?,
        Err(_) => return None,
    };

    parsed.host().map(|host| host.to_owned())
}

/// Raw IPv4/IPv6 host (decimal, hex and octal IPv4 forms included)
pub fn is_ip(host: &Host<String>) -> bool {
    matches!(host, Host::Ipv4(_) | Host::Ipv6(_))
}

/// Anchors whose visible text names a domain other than the link target.
///
/// The displayed domain matches when the href host is that domain or one of
/// its subdomains (`www.` is ignored on both sides).
pub fn count_mismatched_links(raw_body: &str) -> usize {
    ANCHOR
        .captures_iter(raw_body)
        .filter(|caps| {
            let Some(host) = url_host(&caps[1]) else {
                return false;
            };
            let display = strip_tags(&caps[2]);
            let host = host.to_string();
            let host = strip_www(&host);

            DOMAIN_LIKE
                .captures_iter(&display)
                .map(|d| d[1].to_lowercase())
                .filter(|d| !is_file_name(d))
                .any(|shown| !is_same_or_subdomain(host, strip_www(&shown)))
        })
        .count()
}

/// `report.pdf` in link text is a file, not a domain. `.zip` stays a domain.
fn is_file_name(candidate: &str) -> bool {
    if candidate.starts_with("www.") {
        return false;
    }
    candidate
        .rsplit('.')
        .next()
        .map_or(false, |ext| FILE_EXTENSIONS.contains(&ext))
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

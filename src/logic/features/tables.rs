//! Static lookup tables for feature extraction
//!
//! Keyword lists, TLD and domain tables are plain data handed to the
//! extractor at construction. Defaults are built in; a JSON file may replace
//! any subset of them (missing keys keep the default).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Urgency vocabulary entry with its weight in `urgency_score`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrgencyTerm {
    pub term: String,
    pub weight: f32,
}

impl UrgencyTerm {
    pub fn new(term: &str, weight: f32) -> Self {
        Self {
            term: term.to_string(),
            weight,
        }
    }
}

/// Immutable tables consumed by the feature groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureTables {
    /// Content keywords (subject + body), counted once each
    pub phishing_keywords: Vec<String>,
    /// Urgency vocabulary (subject hits and body urgency score)
    pub urgency_terms: Vec<UrgencyTerm>,
    /// High-risk TLDs, without the leading dot
    pub suspicious_tlds: Vec<String>,
    /// Substrings that make a sender domain look like a lure
    pub suspicious_domain_terms: Vec<String>,
    pub free_mail_domains: Vec<String>,
    pub url_shorteners: Vec<String>,
    /// Matched against the lowercased body with all whitespace removed
    pub hidden_markers: Vec<String>,
}

impl Default for FeatureTables {
    fn default() -> Self {
        Self {
            phishing_keywords: to_strings(&[
                "urgent",
                "verify",
                "confirm",
                "suspend",
                "restricted",
                "update",
                "click here",
                "login",
                "account",
                "password",
                "credit card",
                "bank",
                "security",
                "alert",
                "winner",
                "prize",
                "congratulations",
                "claim",
                "verify your account",
                "suspended",
                "locked",
                "unusual activity",
                "confirm your identity",
                "gift card",
                "refund",
                "tax",
                "inheritance",
            ]),
            urgency_terms: vec![
                UrgencyTerm::new("urgent", 2.0),
                UrgencyTerm::new("immediately", 2.0),
                UrgencyTerm::new("act now", 2.0),
                UrgencyTerm::new("suspended", 1.5),
                UrgencyTerm::new("verify", 1.0),
                UrgencyTerm::new("expire", 1.5),
                UrgencyTerm::new("limited time", 1.5),
                UrgencyTerm::new("hurry", 1.5),
                UrgencyTerm::new("last chance", 2.0),
                UrgencyTerm::new("final notice", 2.0),
                UrgencyTerm::new("action required", 2.0),
                UrgencyTerm::new("within 24 hours", 2.0),
                UrgencyTerm::new("don't wait", 1.5),
                UrgencyTerm::new("right away", 1.0),
                UrgencyTerm::new("asap", 1.0),
            ],
            suspicious_tlds: to_strings(&[
                "tk", "ml", "ga", "cf", "gq", "xyz", "top", "click", "loan", "work", "zip",
                "review", "country", "kim", "men", "su",
            ]),
            suspicious_domain_terms: to_strings(&[
                "secure", "verify", "alert", "login", "signin", "update", "account", "billing",
                "support", "confirm", "wallet", "recovery",
            ]),
            free_mail_domains: to_strings(&[
                "gmail.com",
                "googlemail.com",
                "yahoo.com",
                "outlook.com",
                "hotmail.com",
                "live.com",
                "aol.com",
                "icloud.com",
                "mail.com",
                "gmx.com",
                "protonmail.com",
                "proton.me",
                "yandex.com",
                "mail.ru",
            ]),
            url_shorteners: to_strings(&[
                "bit.ly",
                "tinyurl.com",
                "goo.gl",
                "t.co",
                "ow.ly",
                "short.link",
                "tiny.cc",
                "is.gd",
                "buff.ly",
                "rebrand.ly",
                "cutt.ly",
                "rb.gy",
            ]),
            hidden_markers: to_strings(&[
                "display:none",
                "visibility:hidden",
                "type=\"hidden\"",
                "type='hidden'",
                "type=hidden",
                "max-height:0px",
            ]),
        }
    }
}

impl FeatureTables {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str::<Self>(json)?.normalized())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Lowercase and trim every entry; drop empty ones.
    ///
    /// Matching is case-insensitive, so the tables are stored in lowercase.
    /// Hidden markers additionally lose their whitespace.
    pub fn normalized(mut self) -> Self {
        normalize_list(&mut self.phishing_keywords);
        normalize_list(&mut self.suspicious_domain_terms);
        normalize_list(&mut self.free_mail_domains);
        normalize_list(&mut self.url_shorteners);

        for tld in &mut self.suspicious_tlds {
            *tld = tld.trim().trim_start_matches('.').to_lowercase();
        }
        self.suspicious_tlds.retain(|t| !t.is_empty());

        for marker in &mut self.hidden_markers {
            *marker = marker
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase();
        }
        self.hidden_markers.retain(|m| !m.is_empty());

        for urgency in &mut self.urgency_terms {
            urgency.term = urgency.term.trim().to_lowercase();
        }
        self.urgency_terms
            .retain(|u| !u.term.is_empty() && u.weight.is_finite());

        self
    }

    /// True if `domain` is on (or under) a listed high-risk TLD
    pub fn is_suspicious_tld(&self, domain: &str) -> bool {
        let domain = domain.trim_end_matches('.');
        self.suspicious_tlds.iter().any(|tld| {
            domain
                .strip_suffix(tld.as_str())
                .map_or(false, |rest| rest.ends_with('.'))
        })
    }

    pub fn is_free_mail(&self, domain: &str) -> bool {
        self.free_mail_domains.iter().any(|d| d == domain)
    }

    /// Exact shortener host or any subdomain of one
    pub fn is_shortener(&self, host: &str) -> bool {
        self.url_shorteners.iter().any(|s| is_same_or_subdomain(host, s))
    }

    pub fn has_suspicious_domain_term(&self, domain: &str) -> bool {
        self.suspicious_domain_terms
            .iter()
            .any(|term| domain.contains(term.as_str()))
    }
}

/// `host == domain` or `host` ends with `.domain`
pub(crate) fn is_same_or_subdomain(host: &str, domain: &str) -> bool {
    match host.strip_suffix(domain) {
        Some("") => true,
        Some(rest) => rest.ends_with('.'),
        None => false,
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn normalize_list(items: &mut Vec<String>) {
    for item in items.iter_mut() {
        *item = item.trim().to_lowercase();
    }
    items.retain(|i| !i.is_empty());
}

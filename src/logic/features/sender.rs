//! Sender Feature Extraction
//!
//! Trích xuất features từ địa chỉ người gửi.

use super::tables::FeatureTables;
use super::vector::{FeatureExtractor, FeatureVector};

/// Sender features from the raw `From` value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SenderFeatures {
    pub valid: bool,
    pub domain_has_digits: bool,
    pub domain_suspicious: bool,
    pub suspicious_tld: bool,
    pub free_mail: bool,
    pub domain_length: usize,
}

impl SenderFeatures {
    pub fn analyze(sender: &str, tables: &FeatureTables) -> Self {
        let address = bare_address(sender);
        let valid = is_valid_address(address);

        // Domain heuristics still apply to a malformed address as long as
        // there is something after the last '@'.
        let domain = address
            .rsplit_once('@')
            .map(|(_, d)| d.trim_end_matches('.').to_lowercase())
            .unwrap_or_default();

        if domain.is_empty() {
            return Self {
                valid,
                ..Self::default()
            };
        }

        Self {
            valid,
            domain_has_digits: domain.chars().any(|c| c.is_ascii_digit()),
            domain_suspicious: tables.has_suspicious_domain_term(&domain),
            suspicious_tld: tables.is_suspicious_tld(&domain),
            free_mail: tables.is_free_mail(&domain),
            domain_length: domain.chars().count(),
        }
    }
}

impl FeatureExtractor for SenderFeatures {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.set_flag("sender_valid", self.valid);
        vector.set_flag("sender_domain_has_digits", self.domain_has_digits);
        vector.set_flag("sender_domain_suspicious", self.domain_suspicious);
        vector.set_flag("sender_suspicious_tld", self.suspicious_tld);
        vector.set_flag("sender_free_mail", self.free_mail);
        vector.set_by_name("sender_domain_length", self.domain_length as f32);
    }
}

/// `"Name" <user@host>` → `user@host`; anything else is trimmed as-is
pub fn bare_address(sender: &str) -> &str {
    let sender = sender.trim();
    match (sender.rfind('<'), sender.rfind('>')) {
        (Some(open), Some(close)) if open < close => sender[open + 1..close].trim(),
        _ => sender,
    }
}

/// Exactly one '@', non-empty local part and domain, no whitespace
pub fn is_valid_address(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = address.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(sender: &str) -> SenderFeatures {
        SenderFeatures::analyze(sender, &FeatureTables::default())
    }

    #[test]
    fn test_valid_sender() {
        let f = analyze("pm@yourcompany.com");
        assert!(f.valid);
        assert!(!f.domain_has_digits);
        assert!(!f.suspicious_tld);
        assert!(!f.free_mail);
        assert_eq!(f.domain_length, "yourcompany.com".len());
    }

    #[test]
    fn test_address_validity() {
        assert!(is_valid_address("a@b"));
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("no-at-sign"));
        assert!(!is_valid_address("@domain.com"));
        assert!(!is_valid_address("user@"));
        assert!(!is_valid_address("a@b@c.com"));
        assert!(!is_valid_address("john doe@x.com"));
    }

    #[test]
    fn test_display_name_form() {
        assert_eq!(bare_address("PayPal Support <service@paypa1.tk>"), "service@paypa1.tk");
        let f = analyze("PayPal Support <service@paypa1-secure.tk>");
        assert!(f.valid);
        assert!(f.domain_has_digits);
        assert!(f.domain_suspicious);
        assert!(f.suspicious_tld);
    }

    #[test]
    fn test_free_mail() {
        assert!(analyze("someone@Gmail.com").free_mail);
    }

    #[test]
    fn test_digits_in_domain() {
        let f = analyze("security@b4nk-alert123.com");
        assert!(f.domain_has_digits);
        assert!(f.domain_suspicious); // "alert"
    }

    #[test]
    fn test_empty_sender_is_all_zero() {
        assert_eq!(analyze(""), SenderFeatures::default());
        assert_eq!(analyze("   "), SenderFeatures::default());
    }

    #[test]
    fn test_extract_writes_sender_slots() {
        let mut vector = FeatureVector::new();
        analyze("x@evil.ml").extract(&mut vector);
        assert_eq!(vector.get_by_name("sender_valid"), Some(1.0));
        assert_eq!(vector.get_by_name("sender_suspicious_tld"), Some(1.0));
        assert_eq!(vector.get_by_name("sender_domain_length"), Some(7.0));
    }
}

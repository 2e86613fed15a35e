//! Email Record - input of the analysis pipeline
//!
//! Deserialization is lenient: missing or `null` fields become empty values,
//! so any JSON object can be analyzed.

use serde::{Deserialize, Deserializer, Serialize};

/// Raw email as submitted for analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    /// Plain text or HTML
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sender: String,
    /// Explicit URL list; when empty, URLs are pulled from the body
    #[serde(default, deserialize_with = "lenient_urls")]
    pub urls: Vec<String>,
}

impl EmailRecord {
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            sender: sender.into(),
            urls: Vec::new(),
        }
    }

    pub fn with_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.urls = urls.into_iter().map(Into::into).collect();
        self
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_urls<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let urls = Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(urls.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let email: EmailRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(email, EmailRecord::default());
    }

    #[test]
    fn test_null_fields_default_to_empty() {
        let email: EmailRecord = serde_json::from_str(
            r#"{"subject": null, "body": "hi", "sender": null, "urls": null}"#,
        )
        .unwrap();
        assert_eq!(email.subject, "");
        assert_eq!(email.body, "hi");
        assert!(email.urls.is_empty());
    }

    #[test]
    fn test_null_url_entries_dropped() {
        let email: EmailRecord =
            serde_json::from_str(r#"{"urls": ["http://a.com", null, "http://b.com"]}"#).unwrap();
        assert_eq!(email.urls, vec!["http://a.com", "http://b.com"]);
    }

    #[test]
    fn test_builder() {
        let email = EmailRecord::new("s", "b", "x@y.com").with_urls(["http://z.com"]);
        assert_eq!(email.urls.len(), 1);
        assert_eq!(email.sender, "x@y.com");
    }
}

//! Records as read from the feed.

use serde::{Deserialize, Serialize};

/// One feed record. Every field is optional on the wire; missing values
/// render as empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: Option<String>,
    pub slug: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub pub_date: Option<String>,
    pub tags: Vec<String>,
    pub emoji: Option<String>,
    pub url: Option<String>,
}

impl ClientRecord {
    /// Link target of the card: the record url, else the docs route.
    pub fn href(&self) -> String {
        match self.url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => url.to_string(),
            None => format!("/docs/{}", self.slug),
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().filter(|t| !t.is_empty()).unwrap_or("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_fields() {
        let record: ClientRecord = serde_json::from_str(r#"{"slug": "a", "unknown": 1}"#).unwrap();
        assert_eq!(record.slug, "a");
        assert!(record.tags.is_empty());
        assert!(record.pub_date.is_none());
        assert_eq!(record.display_title(), "Untitled");
        assert_eq!(record.href(), "/docs/a");
    }

    #[test]
    fn test_reads_index_records() {
        let json = r#"{
            "id": "tool-anki/setup", "slug": "anki/setup", "title": "Setup",
            "pubDate": "2024-03-01T00:00:00Z", "type": "tool-article",
            "url": "/tools/anki/setup", "tags": ["srs"]
        }"#;
        let record: ClientRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.pub_date.as_deref(), Some("2024-03-01T00:00:00Z"));
        assert_eq!(record.href(), "/tools/anki/setup");
        assert_eq!(record.display_title(), "Setup");
    }
}

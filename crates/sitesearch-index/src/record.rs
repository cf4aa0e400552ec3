//! The normalized search record.

use serde::{Deserialize, Serialize};
use sitesearch_core::RecordType;

/// One search-ready record, normalized from any content collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// `{prefix}-{slug}`, unique across the whole index.
    pub id: String,

    pub slug: String,

    pub title: String,

    pub description: String,

    /// ISO-8601 publish date.
    pub pub_date: String,

    /// Cleaned content.
    pub content: String,

    /// Cleaned content; carried twice for consumers of the older artifact.
    pub full_content: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Only set on tool-article records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// Card emoji; only docs declare one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,

    /// Every textual field joined, used for substring matching.
    pub searchable_text: String,

    pub word_count: usize,

    /// Character count of the cleaned content.
    pub content_length: usize,

    pub has_code_blocks: bool,

    pub has_images: bool,

    pub url: String,

    pub path: String,
}

impl ContentRecord {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether this is a tool article about `tool`.
    pub fn is_about_tool(&self, tool: &str) -> bool {
        self.record_type == RecordType::ToolArticle && self.tool_name.as_deref() == Some(tool)
    }
}

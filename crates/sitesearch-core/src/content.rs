//! Content types and structures.
//!
//! Raw entries from the three collections are modelled as a tagged union,
//! [`ContentEntry`], so consumers can match exhaustively on the source kind
//! instead of probing for optional fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three content collections backing the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Documentation articles.
    Docs,
    /// Articles about a specific tool.
    ToolArticles,
    /// Standalone pages.
    Pages,
}

impl SourceKind {
    /// All source kinds in aggregation order.
    pub const ALL: [SourceKind; 3] = [Self::Docs, Self::ToolArticles, Self::Pages];

    /// Collection name, also the default directory name.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Docs => "docs",
            Self::ToolArticles => "tool-articles",
            Self::Pages => "pages",
        }
    }

    /// Prefix of record ids built from this collection.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Docs => "docs",
            Self::ToolArticles => "tool",
            Self::Pages => "page",
        }
    }

    /// Category used when an entry declares none.
    pub fn fallback_category(&self) -> &'static str {
        match self {
            Self::Docs => "general",
            Self::ToolArticles => "tools",
            Self::Pages => "pages",
        }
    }

    /// Record type produced by normalizing this collection.
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::Docs => RecordType::Docs,
            Self::ToolArticles => RecordType::ToolArticle,
            Self::Pages => RecordType::Page,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// Type tag of a normalized search record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    #[serde(rename = "docs")]
    Docs,
    #[serde(rename = "tool-article")]
    ToolArticle,
    #[serde(rename = "page")]
    Page,
}

impl RecordType {
    /// Wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docs => "docs",
            Self::ToolArticle => "tool-article",
            Self::Page => "page",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication status of a content entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    #[default]
    Draft,
    Archived,
}

impl PostStatus {
    /// Whether entries with this status appear in public output.
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Published)
    }

    /// Whether entries with this status are kept out of public output.
    pub fn is_hidden(&self) -> bool {
        !self.is_visible()
    }

    /// Human readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft (hidden)",
            Self::Archived => "archived (hidden)",
        }
    }
}

/// Frontmatter of a docs entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocFrontmatter {
    pub title: String,
    pub description: String,
    #[serde(alias = "published_date")]
    pub published_date: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default, alias = "featured_image")]
    pub featured_image: Option<String>,
}

/// Frontmatter of a tool article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolArticleFrontmatter {
    pub title: String,
    pub description: String,
    #[serde(alias = "published_date")]
    pub published_date: String,
    #[serde(default, alias = "updated_date")]
    pub updated_date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, alias = "tool_name")]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, alias = "related_tools")]
    pub related_tools: Vec<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default, alias = "featured_image")]
    pub featured_image: Option<String>,
}

/// Frontmatter of a standalone page. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFrontmatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "published_date")]
    pub published_date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub status: PostStatus,
}

/// A raw collection entry: slug, typed frontmatter and unprocessed body.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<F> {
    pub slug: String,
    pub data: F,
    pub body: String,
}

impl<F> Entry<F> {
    pub fn new(slug: impl Into<String>, data: F, body: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            data,
            body: body.into(),
        }
    }
}

/// A raw entry from any of the three collections.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentEntry {
    Docs(Entry<DocFrontmatter>),
    ToolArticle(Entry<ToolArticleFrontmatter>),
    Page(Entry<PageFrontmatter>),
}

impl ContentEntry {
    /// Collection this entry came from.
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Docs(_) => SourceKind::Docs,
            Self::ToolArticle(_) => SourceKind::ToolArticles,
            Self::Page(_) => SourceKind::Pages,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Self::Docs(e) => &e.slug,
            Self::ToolArticle(e) => &e.slug,
            Self::Page(e) => &e.slug,
        }
    }

    pub fn status(&self) -> PostStatus {
        match self {
            Self::Docs(e) => e.data.status,
            Self::ToolArticle(e) => e.data.status,
            Self::Page(e) => e.data.status,
        }
    }

    /// Whether this entry may enter public output.
    pub fn is_published(&self) -> bool {
        self.status().is_visible()
    }

    /// Display title, falling back to the slug for untitled pages.
    pub fn title(&self) -> &str {
        match self {
            Self::Docs(e) => &e.data.title,
            Self::ToolArticle(e) => &e.data.title,
            Self::Page(e) => e.data.title.as_deref().unwrap_or(&e.slug),
        }
    }

    /// Names of required fields that are present but empty.
    pub fn empty_required_fields(&self) -> Vec<&'static str> {
        let (title, description, date) = match self {
            Self::Docs(e) => (&e.data.title, &e.data.description, &e.data.published_date),
            Self::ToolArticle(e) => (&e.data.title, &e.data.description, &e.data.published_date),
            Self::Page(_) => return Vec::new(),
        };

        [
            ("title", title),
            ("description", description),
            ("publishedDate", date),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Entries of the given slice whose status is `published`.
pub fn published(entries: &[ContentEntry]) -> Vec<&ContentEntry> {
    with_status(entries, PostStatus::Published)
}

/// Entries of the given slice whose status is `draft`.
pub fn drafts(entries: &[ContentEntry]) -> Vec<&ContentEntry> {
    with_status(entries, PostStatus::Draft)
}

/// Entries of the given slice whose status is `archived`.
pub fn archived(entries: &[ContentEntry]) -> Vec<&ContentEntry> {
    with_status(entries, PostStatus::Archived)
}

fn with_status(entries: &[ContentEntry], status: PostStatus) -> Vec<&ContentEntry> {
    entries.iter().filter(|e| e.status() == status).collect()
}

/// Per-status entry counts for one collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub published: usize,
    pub draft: usize,
    pub archived: usize,
}

impl StatusCounts {
    /// Count the statuses of the given entries.
    pub fn tally(entries: &[ContentEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut counts, entry| {
            match entry.status() {
                PostStatus::Published => counts.published += 1,
                PostStatus::Draft => counts.draft += 1,
                PostStatus::Archived => counts.archived += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.published + self.draft + self.archived
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(slug: &str, status: PostStatus) -> ContentEntry {
        ContentEntry::Docs(Entry::new(
            slug,
            DocFrontmatter {
                title: format!("Doc {slug}"),
                description: "A document about immersion".to_string(),
                published_date: "2024-01-01T00:00:00Z".to_string(),
                status,
                ..Default::default()
            },
            "body",
        ))
    }

    #[test]
    fn test_source_kind_names() {
        assert_eq!(SourceKind::Docs.collection(), "docs");
        assert_eq!(SourceKind::ToolArticles.collection(), "tool-articles");
        assert_eq!(SourceKind::Pages.collection(), "pages");
        assert_eq!(SourceKind::ToolArticles.id_prefix(), "tool");
        assert_eq!(SourceKind::Pages.fallback_category(), "pages");
        assert_eq!(
            SourceKind::ToolArticles.record_type(),
            RecordType::ToolArticle
        );
    }

    #[test]
    fn test_record_type_names() {
        for ty in [RecordType::Docs, RecordType::ToolArticle, RecordType::Page] {
            assert_eq!(serde_json::to_value(ty).unwrap(), ty.as_str());
        }
        assert_eq!(
            serde_json::to_string(&RecordType::ToolArticle).unwrap(),
            "\"tool-article\""
        );
    }

    #[test]
    fn test_status_visibility() {
        assert!(PostStatus::Published.is_visible());
        assert!(PostStatus::Draft.is_hidden());
        assert!(PostStatus::Archived.is_hidden());
        assert_eq!(PostStatus::default(), PostStatus::Draft);
        assert!(PostStatus::Archived.label().contains("hidden"));
    }

    #[test]
    fn test_status_filters() {
        let entries = vec![
            doc("a", PostStatus::Published),
            doc("b", PostStatus::Draft),
            doc("c", PostStatus::Archived),
            doc("d", PostStatus::Published),
        ];

        let slugs = |v: Vec<&ContentEntry>| v.iter().map(|e| e.slug().to_string()).collect::<Vec<_>>();
        assert_eq!(slugs(published(&entries)), vec!["a", "d"]);
        assert_eq!(slugs(drafts(&entries)), vec!["b"]);
        assert_eq!(slugs(archived(&entries)), vec!["c"]);

        let counts = StatusCounts::tally(&entries);
        assert_eq!(counts.published, 2);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_page_title_falls_back_to_slug() {
        let page = ContentEntry::Page(Entry::new("about", PageFrontmatter::default(), ""));
        assert_eq!(page.title(), "about");
        assert_eq!(page.kind(), SourceKind::Pages);
        assert!(!page.is_published());
    }

    #[test]
    fn test_empty_required_fields() {
        let entry = ContentEntry::Docs(Entry::new(
            "empty",
            DocFrontmatter {
                title: " ".to_string(),
                published_date: "2024-01-01".to_string(),
                ..Default::default()
            },
            "",
        ));
        assert_eq!(entry.empty_required_fields(), vec!["title", "description"]);
    }
}

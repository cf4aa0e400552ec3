//! Frontmatter parsing for content files.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{
    content::{ContentEntry, Entry, SourceKind},
    error::{CoreError, Result},
};

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let after_first = &content[delimiter.len()..];
    let closing_pos = after_first.find(delimiter)?;

    let frontmatter = after_first[..closing_pos].trim();
    let body = after_first[closing_pos + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Parse typed frontmatter from a content file.
///
/// Returns the frontmatter and the body that follows it. Content without a
/// frontmatter block is an error: every collection declares required fields.
pub fn parse_frontmatter<T: DeserializeOwned>(content: &str, path: &Path) -> Result<(T, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Err(CoreError::frontmatter(path, "missing frontmatter block"));
    };

    let frontmatter: T = match format {
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => {
            toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
    };

    Ok((frontmatter, body.to_string()))
}

/// Parse a content file of the given collection into a typed entry.
pub fn parse_entry(
    kind: SourceKind,
    slug: impl Into<String>,
    content: &str,
    path: &Path,
) -> Result<ContentEntry> {
    let slug = slug.into();
    let entry = match kind {
        SourceKind::Docs => {
            let (data, body) = parse_frontmatter(content, path)?;
            ContentEntry::Docs(Entry::new(slug, data, body))
        }
        SourceKind::ToolArticles => {
            let (data, body) = parse_frontmatter(content, path)?;
            ContentEntry::ToolArticle(Entry::new(slug, data, body))
        }
        SourceKind::Pages => {
            let (data, body) = parse_frontmatter(content, path)?;
            ContentEntry::Page(Entry::new(slug, data, body))
        }
    };
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{DocFrontmatter, PostStatus};

    #[test]
    fn test_split_yaml_frontmatter() {
        let content = r#"---
title: "Hello World"
publishedDate: "2024-01-14T00:00:00Z"
---

This is the body content."#;

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Yaml);
        assert!(fm.contains("title:"));
        assert!(body.starts_with("This is the body"));
    }

    #[test]
    fn test_split_toml_frontmatter() {
        let content = r#"+++
title = "Hello World"
+++

This is the body content."#;

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Toml);
        assert!(fm.contains("title ="));
        assert!(body.starts_with("This is the body"));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just some content without frontmatter.";
        assert!(split_frontmatter(content).is_none());

        let err = parse_frontmatter::<DocFrontmatter>(content, Path::new("docs/x.md")).unwrap_err();
        assert!(err.to_string().contains("missing frontmatter"));
    }

    #[test]
    fn test_parse_doc_entry() {
        let content = r#"---
title: "Immersion 101"
description: "How to start learning Japanese through immersion"
publishedDate: "2024-01-14T10:00:00Z"
categories:
  - getting-started
tags:
  - immersion
status: published
---

Content here."#;

        let entry =
            parse_entry(SourceKind::Docs, "immersion-101", content, Path::new("x.md")).expect("parse");

        let ContentEntry::Docs(doc) = entry else {
            panic!("expected docs entry");
        };
        assert_eq!(doc.slug, "immersion-101");
        assert_eq!(doc.data.title, "Immersion 101");
        assert_eq!(doc.data.status, PostStatus::Published);
        assert_eq!(
            doc.data.categories.as_deref(),
            Some(&["getting-started".to_string()][..])
        );
        assert_eq!(doc.body, "Content here.");
    }

    #[test]
    fn test_parse_tool_article_toml() {
        let content = r#"+++
title = "Anki setup"
description = "Setting up Anki decks for mining"
publishedDate = "2024-03-01T00:00:00Z"
toolName = "anki"
status = "draft"
+++

Body"#;

        let entry = parse_entry(
            SourceKind::ToolArticles,
            "anki/setup",
            content,
            Path::new("x.md"),
        )
        .expect("parse");

        let ContentEntry::ToolArticle(article) = entry else {
            panic!("expected tool article");
        };
        assert_eq!(article.data.tool_name.as_deref(), Some("anki"));
        assert_eq!(article.data.status, PostStatus::Draft);
        assert!(article.data.tags.is_none());
    }

    #[test]
    fn test_status_defaults_to_draft() {
        let content = r#"---
title: "About"
---
Who we are."#;

        let entry = parse_entry(SourceKind::Pages, "about", content, Path::new("x.md")).expect("parse");
        assert_eq!(entry.status(), PostStatus::Draft);
    }

    #[test]
    fn test_missing_required_field() {
        let content = r#"---
title: "No date"
description: "This entry has no publish date"
---
Body"#;

        let result = parse_entry(SourceKind::Docs, "no-date", content, Path::new("docs/no-date.md"));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("docs/no-date.md"));
    }
}

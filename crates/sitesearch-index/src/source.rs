//! Content sources.
//!
//! A [`ContentStore`] hands out the raw entries of one collection at a time.
//! [`FsContentStore`] reads markdown files with frontmatter from disk;
//! [`StaticContentStore`] serves entries held in memory.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use sitesearch_core::{ContentEntry, SourceKind, config::ContentConfig, frontmatter::parse_entry};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::{IndexError, Result};

const CONTENT_EXTENSIONS: [&str; 3] = ["md", "markdown", "mdx"];

/// Source of raw collection entries.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Every entry of the collection regardless of status.
    async fn entries(&self, kind: SourceKind) -> Result<Vec<ContentEntry>>;

    /// Entries whose status is `published`.
    async fn published_entries(&self, kind: SourceKind) -> Result<Vec<ContentEntry>> {
        let mut entries = self.entries(kind).await?;
        entries.retain(ContentEntry::is_published);
        Ok(entries)
    }
}

/// Reads the three collections from the content directory.
///
/// Each collection is a directory of markdown files. The slug of a file is
/// its path relative to the collection root without extension; `index.md`
/// takes the slug of its parent directory. Two files resolving to the same
/// slug fail the fetch. A missing collection directory yields no entries.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    config: ContentConfig,
}

impl FsContentStore {
    pub fn new(config: ContentConfig) -> Self {
        Self { config }
    }

    /// Directory holding the given collection.
    pub fn collection_dir(&self, kind: SourceKind) -> PathBuf {
        self.config.collection_dir(kind)
    }

    fn read_collection(kind: SourceKind, root: &Path) -> Result<Vec<ContentEntry>> {
        if !root.is_dir() {
            debug!(collection = %kind, dir = %root.display(), "collection directory missing");
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for item in walker {
            let item = item.map_err(|e| IndexError::source_fetch(kind, e.to_string()))?;
            if !item.file_type().is_file() || !is_content_file(item.path()) {
                continue;
            }

            let path = item.path();
            let Some(slug) = slug_for(root, path) else {
                continue;
            };
            if let Some(first) = seen.get(&slug) {
                return Err(IndexError::source_fetch(
                    kind,
                    format!(
                        "duplicate slug '{slug}' ({} and {})",
                        first.display(),
                        path.display()
                    ),
                ));
            }
            seen.insert(slug.clone(), path.to_path_buf());

            let source = fs::read_to_string(path)
                .map_err(|e| IndexError::source_fetch(kind, format!("{}: {e}", path.display())))?;
            let entry = parse_entry(kind, slug, &source, path)
                .map_err(|e| IndexError::source_fetch(kind, e.to_string()))?;
            entries.push(entry);
        }

        debug!(collection = %kind, count = entries.len(), "read collection");
        Ok(entries)
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn entries(&self, kind: SourceKind) -> Result<Vec<ContentEntry>> {
        let root = self.collection_dir(kind);
        tokio::task::spawn_blocking(move || Self::read_collection(kind, &root))
            .await
            .map_err(|e| IndexError::Task(e.to_string()))?
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()))
}

/// Slug of a content file: relative path without extension, with
/// `index` files collapsing onto their directory.
fn slug_for(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let mut segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if segments.len() > 1 && segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }

    let slug = segments.join("/");
    (!slug.is_empty()).then_some(slug)
}

/// In-memory [`ContentStore`].
///
/// Collections can be marked as failing, which makes every fetch of that
/// collection return [`IndexError::SourceFetch`].
#[derive(Debug, Clone, Default)]
pub struct StaticContentStore {
    collections: HashMap<SourceKind, Vec<ContentEntry>>,
    failures: HashMap<SourceKind, String>,
}

impl StaticContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the collection matching its variant.
    #[must_use]
    pub fn with_entry(mut self, entry: ContentEntry) -> Self {
        self.collections.entry(entry.kind()).or_default().push(entry);
        self
    }

    /// Add several entries.
    #[must_use]
    pub fn with_entries(self, entries: impl IntoIterator<Item = ContentEntry>) -> Self {
        entries.into_iter().fold(self, Self::with_entry)
    }

    /// Make fetches of `kind` fail with `message`.
    #[must_use]
    pub fn with_failure(mut self, kind: SourceKind, message: impl Into<String>) -> Self {
        self.failures.insert(kind, message.into());
        self
    }
}

#[async_trait]
impl ContentStore for StaticContentStore {
    async fn entries(&self, kind: SourceKind) -> Result<Vec<ContentEntry>> {
        if let Some(message) = self.failures.get(&kind) {
            return Err(IndexError::source_fetch(kind, message.clone()));
        }
        Ok(self.collections.get(&kind).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use sitesearch_core::PostStatus;
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn doc_source(title: &str, status: &str) -> String {
        format!(
            "---\ntitle: \"{title}\"\ndescription: \"About {title}\"\npublishedDate: \"2024-01-01T00:00:00Z\"\nstatus: {status}\n---\n\nBody of {title}."
        )
    }

    fn store(dir: &TempDir) -> FsContentStore {
        FsContentStore::new(ContentConfig {
            dir: dir.path().to_path_buf(),
            ..Default::default()
        })
    }

    #[test]
    fn test_slug_for() {
        let root = Path::new("/c/docs");
        assert_eq!(slug_for(root, Path::new("/c/docs/a.md")).as_deref(), Some("a"));
        assert_eq!(
            slug_for(root, Path::new("/c/docs/anki/setup.md")).as_deref(),
            Some("anki/setup")
        );
        assert_eq!(
            slug_for(root, Path::new("/c/docs/guide/index.md")).as_deref(),
            Some("guide")
        );
        assert_eq!(slug_for(root, Path::new("/c/docs/index.md")).as_deref(), Some("index"));
    }

    #[tokio::test]
    async fn test_reads_collection_sorted() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "docs/b.md", &doc_source("B", "published"));
        write(dir.path(), "docs/a.md", &doc_source("A", "draft"));
        write(dir.path(), "docs/notes.txt", "ignored");
        write(dir.path(), "docs/.hidden/x.md", &doc_source("X", "published"));

        let entries = store(&dir).entries(SourceKind::Docs).await.unwrap();
        let slugs: Vec<_> = entries.iter().map(ContentEntry::slug).collect();
        assert_eq!(slugs, vec!["a", "b"]);
        assert_eq!(entries[0].status(), PostStatus::Draft);
    }

    #[tokio::test]
    async fn test_published_entries_only() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "docs/a.md", &doc_source("A", "published"));
        write(dir.path(), "docs/b.md", &doc_source("B", "draft"));
        write(dir.path(), "docs/c.md", &doc_source("C", "archived"));

        let entries = store(&dir).published_entries(SourceKind::Docs).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].slug(), "a");
    }

    #[tokio::test]
    async fn test_duplicate_slug_fails_fetch() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "docs/setup.md", &doc_source("A", "published"));
        write(dir.path(), "docs/setup.markdown", &doc_source("B", "published"));

        let err = store(&dir).entries(SourceKind::Docs).await.unwrap_err();
        assert!(err.to_string().contains("duplicate slug 'setup'"));
    }

    #[tokio::test]
    async fn test_missing_collection_is_empty() {
        let dir = TempDir::new().unwrap();
        let entries = store(&dir).entries(SourceKind::Pages).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_bad_frontmatter_fails_fetch() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "tool-articles/anki/setup.md", "no frontmatter here");

        let err = store(&dir).entries(SourceKind::ToolArticles).await.unwrap_err();
        assert!(matches!(
            err,
            IndexError::SourceFetch {
                kind: SourceKind::ToolArticles,
                ..
            }
        ));
        assert!(err.to_string().contains("missing frontmatter"));
    }

    #[tokio::test]
    async fn test_static_store() {
        let page = ContentEntry::Page(sitesearch_core::Entry::new(
            "about",
            sitesearch_core::PageFrontmatter::default(),
            "",
        ));
        let store = StaticContentStore::new()
            .with_entry(page)
            .with_failure(SourceKind::Docs, "offline");

        assert_eq!(store.entries(SourceKind::Pages).await.unwrap().len(), 1);
        assert!(store.entries(SourceKind::ToolArticles).await.unwrap().is_empty());
        // Draft by default.
        assert!(store.published_entries(SourceKind::Pages).await.unwrap().is_empty());
        assert!(store.entries(SourceKind::Docs).await.is_err());
    }
}

//! Entry normalization.
//!
//! Converts each [`ContentEntry`] variant into a [`ContentRecord`]. Every
//! derived field is computed here, once.

use sitesearch_core::{
    BuildLogger, ContentEntry, DocFrontmatter, Entry, LogLevel, PageFrontmatter, SourceKind,
    ToolArticleFrontmatter,
};

use crate::{
    record::ContentRecord,
    routes::PathResolver,
    sanitize::{count_words, sanitize_content},
};

const FALLBACK_TOOL: &str = "general";

/// Normalizes raw entries into search records.
pub struct Normalizer<'a> {
    resolver: &'a dyn PathResolver,
    logger: &'a dyn BuildLogger,
    infer_tool_from_tags: bool,
    generated_at: String,
}

/// Body-derived fields shared by all variants.
struct BodyStats {
    cleaned: String,
    word_count: usize,
    content_length: usize,
    has_code_blocks: bool,
    has_images: bool,
}

impl BodyStats {
    fn from_body(body: &str) -> Self {
        let cleaned = sanitize_content(body);
        Self {
            word_count: count_words(&cleaned),
            content_length: cleaned.chars().count(),
            has_code_blocks: body.contains("```"),
            has_images: body.contains("!["),
            cleaned,
        }
    }
}

impl<'a> Normalizer<'a> {
    /// Create a normalizer. `generated_at` is the publish date given to
    /// pages that declare none.
    pub fn new(
        resolver: &'a dyn PathResolver,
        logger: &'a dyn BuildLogger,
        generated_at: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            logger,
            infer_tool_from_tags: true,
            generated_at: generated_at.into(),
        }
    }

    /// Enable or disable the lowercase-tag tool name fallback.
    #[must_use]
    pub fn with_tool_inference(mut self, enabled: bool) -> Self {
        self.infer_tool_from_tags = enabled;
        self
    }

    pub fn normalize(&self, entry: &ContentEntry) -> ContentRecord {
        match entry {
            ContentEntry::Docs(doc) => self.normalize_doc(doc),
            ContentEntry::ToolArticle(article) => self.normalize_tool_article(article),
            ContentEntry::Page(page) => self.normalize_page(page),
        }
    }

    fn normalize_doc(&self, doc: &Entry<DocFrontmatter>) -> ContentRecord {
        let data = &doc.data;
        let stats = BodyStats::from_body(&doc.body);
        let tags = data.tags.clone().unwrap_or_default();
        let categories = data
            .categories
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| vec![SourceKind::Docs.fallback_category().to_string()]);

        let searchable_text = searchable_text(
            [data.title.as_str(), data.description.as_str(), stats.cleaned.as_str()]
                .into_iter()
                .chain(tags.iter().map(String::as_str))
                .chain(data.categories.iter().flatten().map(String::as_str)),
        );

        let url = self.resolve_url(SourceKind::Docs, &doc.slug, || {
            format!("/docs/{}", doc.slug)
        });

        ContentRecord {
            id: record_id(SourceKind::Docs, &doc.slug),
            slug: doc.slug.clone(),
            title: data.title.clone(),
            description: data.description.clone(),
            pub_date: data.published_date.clone(),
            content: stats.cleaned.clone(),
            full_content: stats.cleaned,
            tags,
            categories,
            record_type: SourceKind::Docs.record_type(),
            tool_name: None,
            emoji: data.emoji.clone().filter(|e| !e.is_empty()),
            searchable_text,
            word_count: stats.word_count,
            content_length: stats.content_length,
            has_code_blocks: stats.has_code_blocks,
            has_images: stats.has_images,
            url,
            path: format!("docs/{}", doc.slug),
        }
    }

    fn normalize_tool_article(&self, article: &Entry<ToolArticleFrontmatter>) -> ContentRecord {
        let data = &article.data;
        let stats = BodyStats::from_body(&article.body);
        let tags = data.tags.clone().unwrap_or_default();
        let tool_name = self.tool_name(data);
        let declared = data.categories.clone().unwrap_or_default();

        let mut categories = Vec::with_capacity(declared.len() + 2);
        categories.push(SourceKind::ToolArticles.fallback_category().to_string());
        categories.push(tool_name.clone());
        categories.extend(declared.iter().cloned());

        let searchable_text = searchable_text(
            [data.title.as_str(), data.description.as_str(), stats.cleaned.as_str()]
                .into_iter()
                .chain(tags.iter().map(String::as_str))
                .chain(std::iter::once(tool_name.as_str()))
                .chain(declared.iter().map(String::as_str)),
        );

        let url = self.resolve_url(SourceKind::ToolArticles, &article.slug, || {
            format!("/tools/{tool_name}/{}", article.slug)
        });

        ContentRecord {
            id: record_id(SourceKind::ToolArticles, &article.slug),
            slug: article.slug.clone(),
            title: data.title.clone(),
            description: data.description.clone(),
            pub_date: data.published_date.clone(),
            content: stats.cleaned.clone(),
            full_content: stats.cleaned,
            tags,
            categories,
            record_type: SourceKind::ToolArticles.record_type(),
            emoji: None,
            searchable_text,
            word_count: stats.word_count,
            content_length: stats.content_length,
            has_code_blocks: stats.has_code_blocks,
            has_images: stats.has_images,
            url,
            path: format!("tools/{tool_name}/{}", article.slug),
            tool_name: Some(tool_name),
        }
    }

    fn normalize_page(&self, page: &Entry<PageFrontmatter>) -> ContentRecord {
        let data = &page.data;
        let stats = BodyStats::from_body(&page.body);
        let title = data
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| page.slug.clone());
        let description = data.description.clone().unwrap_or_default();
        let pub_date = data
            .published_date
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| self.generated_at.clone());

        let searchable_text = searchable_text([
            title.as_str(),
            description.as_str(),
            stats.cleaned.as_str(),
        ]);

        let url = self.resolve_url(SourceKind::Pages, &page.slug, || format!("/{}", page.slug));

        ContentRecord {
            id: record_id(SourceKind::Pages, &page.slug),
            slug: page.slug.clone(),
            title,
            description,
            pub_date,
            content: stats.cleaned.clone(),
            full_content: stats.cleaned,
            tags: Vec::new(),
            categories: vec![SourceKind::Pages.fallback_category().to_string()],
            record_type: SourceKind::Pages.record_type(),
            tool_name: None,
            emoji: None,
            searchable_text,
            word_count: stats.word_count,
            content_length: stats.content_length,
            has_code_blocks: stats.has_code_blocks,
            has_images: stats.has_images,
            url,
            path: page.slug.clone(),
        }
    }

    /// Declared tool name, else the first all-lowercase tag, else `general`.
    fn tool_name(&self, data: &ToolArticleFrontmatter) -> String {
        if let Some(name) = data.tool_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        let inferred = self
            .infer_tool_from_tags
            .then(|| data.tags.iter().flatten().find(|tag| is_tool_identifier(tag)))
            .flatten();

        inferred.cloned().unwrap_or_else(|| FALLBACK_TOOL.to_string())
    }

    fn resolve_url(&self, kind: SourceKind, slug: &str, fallback: impl FnOnce() -> String) -> String {
        match self.resolver.resolve(kind, slug) {
            Ok(url) => url,
            Err(e) => {
                self.logger.log(
                    &format!("Failed to resolve {kind} path for {slug}: {e}"),
                    LogLevel::Warning,
                );
                fallback()
            }
        }
    }
}

fn record_id(kind: SourceKind, slug: &str) -> String {
    format!("{}-{slug}", kind.id_prefix())
}

fn is_tool_identifier(tag: &str) -> bool {
    !tag.is_empty() && tag.chars().all(|c| c.is_ascii_lowercase())
}

fn searchable_text<'s>(parts: impl IntoIterator<Item = &'s str>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

//! Index aggregation.
//!
//! Fetches the three collections concurrently, normalizes the published
//! entries and merges them in fixed source order: docs, tool articles,
//! pages. Metadata always describes the full corpus; filters only narrow
//! the returned records.

use std::{collections::HashSet, sync::Arc, time::Instant};

use chrono::{SecondsFormat, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sitesearch_core::{BuildLogger, ContentEntry, LogLevel, RecordType, SourceKind};
use tracing::{debug, instrument};

use crate::{
    Result, normalize::Normalizer, record::ContentRecord, routes::PathResolver,
    source::ContentStore,
};

/// Kind tag carried in the index metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    #[default]
    Comprehensive,
}

/// Optional narrowing of the returned records. Constraints are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Matches tool articles with this tool name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,

    /// Record type name. A name outside [`RecordType`] matches nothing.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
}

impl IndexFilters {
    /// Build filters from raw query values. Empty values mean no constraint.
    pub fn from_query(
        category: Option<&str>,
        tag: Option<&str>,
        tool: Option<&str>,
        record_type: Option<&str>,
    ) -> Self {
        let non_empty = |v: Option<&str>| v.filter(|v| !v.is_empty()).map(str::to_string);

        Self {
            category: non_empty(category),
            tag: non_empty(tag),
            tool: non_empty(tool),
            record_type: non_empty(record_type),
        }
    }

    /// Constrain to one record type.
    #[must_use]
    pub fn with_type(mut self, record_type: RecordType) -> Self {
        self.record_type = Some(record_type.as_str().to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Whether `record` satisfies every constraint.
    pub fn matches(&self, record: &ContentRecord) -> bool {
        self.category.as_deref().is_none_or(|c| record.has_category(c))
            && self.tag.as_deref().is_none_or(|t| record.has_tag(t))
            && self.tool.as_deref().is_none_or(|t| record.is_about_tool(t))
            && self
                .record_type
                .as_deref()
                .is_none_or(|ty| record.record_type.as_str() == ty)
    }
}

/// Corpus-wide metadata, always computed from the unfiltered record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMetadata {
    pub total_items: usize,
    pub docs_count: usize,
    pub tool_articles_count: usize,
    pub pages_count: usize,
    pub last_updated: String,
    pub available_categories: Vec<String>,
    pub available_tags: Vec<String>,
    pub available_tools: Vec<String>,
    #[serde(rename = "type")]
    pub kind: IndexKind,
}

/// The comprehensive index document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub metadata: IndexMetadata,
    pub data: Vec<ContentRecord>,
    pub filters: IndexFilters,
}

/// Every published record in source order, before filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    pub records: Vec<ContentRecord>,
    pub docs_count: usize,
    pub tool_articles_count: usize,
    pub pages_count: usize,
    /// RFC 3339 generation timestamp.
    pub generated_at: String,
}

impl Corpus {
    pub fn metadata(&self) -> IndexMetadata {
        let records = &self.records;
        IndexMetadata {
            total_items: records.len(),
            docs_count: self.docs_count,
            tool_articles_count: self.tool_articles_count,
            pages_count: self.pages_count,
            last_updated: self.generated_at.clone(),
            available_categories: union(records.iter().flat_map(|r| &r.categories)),
            available_tags: union(records.iter().flat_map(|r| &r.tags)),
            available_tools: union(
                records
                    .iter()
                    .filter(|r| r.record_type == RecordType::ToolArticle)
                    .filter_map(|r| r.tool_name.as_ref()),
            ),
            kind: IndexKind::Comprehensive,
        }
    }

    /// Records matching `filters`, in corpus order.
    pub fn filter(&self, filters: &IndexFilters) -> Vec<ContentRecord> {
        self.records
            .iter()
            .filter(|r| filters.matches(r))
            .cloned()
            .collect()
    }

    /// Narrow the corpus into a response. Metadata stays unfiltered.
    pub fn into_response(self, filters: &IndexFilters) -> SearchResponse {
        let metadata = self.metadata();
        let data = if filters.is_empty() {
            self.records
        } else {
            self.filter(filters)
        };
        SearchResponse {
            metadata,
            data,
            filters: filters.clone(),
        }
    }
}

/// De-duplicate keeping first-seen order.
fn union<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .cloned()
        .collect()
}

/// Builds the comprehensive index from a content store.
pub struct IndexAggregator {
    store: Arc<dyn ContentStore>,
    resolver: Arc<dyn PathResolver>,
    logger: Arc<dyn BuildLogger>,
    infer_tool_from_tags: bool,
}

impl IndexAggregator {
    pub fn new(
        store: Arc<dyn ContentStore>,
        resolver: Arc<dyn PathResolver>,
        logger: Arc<dyn BuildLogger>,
    ) -> Self {
        Self {
            store,
            resolver,
            logger,
            infer_tool_from_tags: true,
        }
    }

    /// See [`Normalizer::with_tool_inference`].
    #[must_use]
    pub fn with_tool_inference(mut self, enabled: bool) -> Self {
        self.infer_tool_from_tags = enabled;
        self
    }

    /// Build the index and apply `filters`.
    ///
    /// Any collection failing to load fails the whole aggregation; no
    /// partial index is ever returned. Each call runs in its own `aggregate`
    /// span, so log lines of concurrent calls stay apart.
    #[instrument(name = "aggregate", skip_all, fields(filters = ?filters))]
    pub async fn aggregate(&self, filters: &IndexFilters) -> Result<SearchResponse> {
        let started = Instant::now();
        self.logger.start_group("Comprehensive search data generation");

        let corpus = match self.collect().await {
            Ok(corpus) => corpus,
            Err(e) => {
                self.logger.log(
                    &format!("Error generating comprehensive search data: {e}"),
                    LogLevel::Error,
                );
                self.logger.end_group();
                return Err(e);
            }
        };

        let total = corpus.records.len();
        let response = corpus.into_response(filters);
        let metadata = &response.metadata;

        self.logger.log(
            &format!(
                "Generated comprehensive search data for {} items ({total} total)",
                response.data.len()
            ),
            LogLevel::Success,
        );
        self.logger.summary(
            "Comprehensive search data summary",
            &[
                ("Total items", total),
                ("Filtered items", response.data.len()),
                ("Docs items", metadata.docs_count),
                ("Tool articles", metadata.tool_articles_count),
                ("Pages", metadata.pages_count),
                ("Available categories", metadata.available_categories.len()),
                ("Available tags", metadata.available_tags.len()),
                ("Available tools", metadata.available_tools.len()),
            ],
        );
        self.logger.end_group();
        debug!(
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "aggregation finished"
        );

        Ok(response)
    }

    /// Build the unfiltered corpus without opening a log group.
    pub async fn build_corpus(&self) -> Result<Corpus> {
        self.collect().await
    }

    async fn collect(&self) -> Result<Corpus> {
        self.logger.log(
            "Generating comprehensive search data from all content collections",
            LogLevel::Info,
        );

        let (docs, tool_articles, pages) = tokio::try_join!(
            self.store.published_entries(SourceKind::Docs),
            self.store.published_entries(SourceKind::ToolArticles),
            self.store.published_entries(SourceKind::Pages),
        )?;

        self.logger.log(
            &format!(
                "Found {} docs, {} tool articles, {} pages",
                docs.len(),
                tool_articles.len(),
                pages.len()
            ),
            LogLevel::Success,
        );

        let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let normalizer = Normalizer::new(
            self.resolver.as_ref(),
            self.logger.as_ref(),
            generated_at.clone(),
        )
        .with_tool_inference(self.infer_tool_from_tags);

        let mut records = Vec::with_capacity(docs.len() + tool_articles.len() + pages.len());
        for entries in [&docs, &tool_articles, &pages] {
            records.extend(normalize_all(&normalizer, entries));
        }
        debug!(records = records.len(), "normalized corpus");

        Ok(Corpus {
            records,
            docs_count: docs.len(),
            tool_articles_count: tool_articles.len(),
            pages_count: pages.len(),
            generated_at,
        })
    }
}

/// Normalize in parallel, keeping input order.
fn normalize_all(normalizer: &Normalizer<'_>, entries: &[ContentEntry]) -> Vec<ContentRecord> {
    entries
        .par_iter()
        .filter(|e| e.is_published())
        .map(|e| normalizer.normalize(e))
        .collect()
}

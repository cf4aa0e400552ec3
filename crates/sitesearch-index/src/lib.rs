//! Sitesearch Index Library
//!
//! Builds the comprehensive search index of a content site: one flat,
//! filterable JSON corpus merged from the docs, tool-articles and pages
//! collections.
//!
//! # Pipeline
//!
//! - [`source`]: reads the three collections, published entries only
//! - [`normalize`]: turns each entry into a [`ContentRecord`]
//! - [`aggregate`]: merges, computes corpus metadata, applies filters
//! - [`emit`]: serializes the result with cache and CORS headers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use sitesearch_core::{Config, TracingLogger};
//! use sitesearch_index::{FsContentStore, IndexAggregator, IndexEmitter, IndexFilters, RouteResolver};
//!
//! # async fn run() -> sitesearch_index::Result<()> {
//! let config = Config::new("My Site", "https://example.com");
//! let aggregator = IndexAggregator::new(
//!     Arc::new(FsContentStore::new(config.content.clone())),
//!     Arc::new(RouteResolver::new(config.routes.clone())),
//!     Arc::new(TracingLogger::new()),
//! );
//! let response = aggregator.aggregate(&IndexFilters::default()).await?;
//! let emitted = IndexEmitter::from_config(&config.search).emit(Ok(&response));
//! assert_eq!(emitted.status, 200);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod emit;
pub mod normalize;
pub mod record;
pub mod routes;
pub mod sanitize;
pub mod source;

pub use aggregate::{Corpus, IndexAggregator, IndexFilters, IndexKind, IndexMetadata, SearchResponse};
pub use emit::{EmittedIndex, ErrorBody, IndexEmitter};
pub use normalize::Normalizer;
pub use record::ContentRecord;
pub use routes::{PathResolutionError, PathResolver, RouteResolver};
pub use sanitize::{count_words, sanitize_content};
use sitesearch_core::SourceKind;
pub use source::{ContentStore, FsContentStore, StaticContentStore};
use thiserror::Error;

/// Index building errors.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A content collection could not be read. Fatal to the whole aggregation.
    #[error("failed to fetch {kind} entries: {message}")]
    SourceFetch { kind: SourceKind, message: String },

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),
}

impl IndexError {
    /// Create a source fetch error.
    pub fn source_fetch(kind: SourceKind, message: impl Into<String>) -> Self {
        Self::SourceFetch {
            kind,
            message: message.into(),
        }
    }
}

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_fetch_message() {
        let err = IndexError::source_fetch(SourceKind::ToolArticles, "permission denied");
        assert_eq!(
            err.to_string(),
            "failed to fetch tool-articles entries: permission denied"
        );
    }
}

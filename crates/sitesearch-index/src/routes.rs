//! Route resolution for record URLs.

use sitesearch_core::{SourceKind, config::RoutesConfig};
use thiserror::Error;

/// No route mapping exists for an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route for {kind} entry '{slug}': {reason}")]
pub struct PathResolutionError {
    pub kind: SourceKind,
    pub slug: String,
    pub reason: String,
}

impl PathResolutionError {
    pub fn new(kind: SourceKind, slug: &str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            slug: slug.to_string(),
            reason: reason.into(),
        }
    }
}

/// Maps a collection entry to its public URL.
pub trait PathResolver: Send + Sync {
    fn resolve(&self, kind: SourceKind, slug: &str) -> Result<String, PathResolutionError>;
}

/// [`PathResolver`] driven by the `[routes]` prefixes.
///
/// Tool articles live under a directory per tool, so their slugs are
/// `tool/article` and resolve to `{prefix}/tool/article`. A flat tool
/// article slug has no route.
#[derive(Debug, Clone)]
pub struct RouteResolver {
    routes: RoutesConfig,
}

impl RouteResolver {
    pub fn new(routes: RoutesConfig) -> Self {
        Self { routes }
    }
}

impl Default for RouteResolver {
    fn default() -> Self {
        Self::new(RoutesConfig::default())
    }
}

impl PathResolver for RouteResolver {
    fn resolve(&self, kind: SourceKind, slug: &str) -> Result<String, PathResolutionError> {
        let slug = slug.trim_matches('/');
        if slug.is_empty() {
            return Err(PathResolutionError::new(kind, slug, "empty slug"));
        }
        if slug.split('/').any(|segment| segment.is_empty() || segment == "..") {
            return Err(PathResolutionError::new(kind, slug, "malformed path segment"));
        }
        if slug.chars().any(char::is_whitespace) {
            return Err(PathResolutionError::new(kind, slug, "slug contains whitespace"));
        }

        if kind == SourceKind::ToolArticles && !slug.contains('/') {
            return Err(PathResolutionError::new(
                kind,
                slug,
                "tool article is not inside a tool directory",
            ));
        }

        Ok(format!("{}/{slug}", self.routes.prefix(kind)))
    }
}

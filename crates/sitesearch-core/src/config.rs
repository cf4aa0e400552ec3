//! Site configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    content::SourceKind,
    error::{CoreError, Result},
};

/// Main configuration structure for sitesearch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Content collection locations.
    #[serde(default)]
    pub content: ContentConfig,

    /// Route prefixes used to resolve record URLs.
    #[serde(default)]
    pub routes: RoutesConfig,

    /// Search index settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,
}

/// Where the three content collections live on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Root content directory.
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,

    /// Directory name of the docs collection.
    #[serde(default = "default_docs_dir")]
    pub docs: String,

    /// Directory name of the tool-articles collection.
    #[serde(default = "default_tool_articles_dir")]
    pub tool_articles: String,

    /// Directory name of the pages collection.
    #[serde(default = "default_pages_dir")]
    pub pages: String,
}

/// URL prefixes for each collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_docs_route")]
    pub docs: String,

    #[serde(default = "default_tool_articles_route")]
    pub tool_articles: String,

    #[serde(default)]
    pub pages: String,
}

/// Search index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// File name of the comprehensive index document.
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// File name of the bare record array consumed by the client engine.
    #[serde(default = "default_records_file")]
    pub records_file: String,

    /// `max-age` of the emitted `Cache-Control` header, in seconds.
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age: u32,

    /// Whether to pretty-print the emitted JSON.
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Fall back to the first all-lowercase tag when a tool article
    /// declares no tool name.
    #[serde(default = "default_true")]
    pub infer_tool_from_tags: bool,
}

// Default value functions
fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_docs_dir() -> String {
    SourceKind::Docs.collection().to_string()
}

fn default_tool_articles_dir() -> String {
    SourceKind::ToolArticles.collection().to_string()
}

fn default_pages_dir() -> String {
    SourceKind::Pages.collection().to_string()
}

fn default_docs_route() -> String {
    "/docs".to_string()
}

fn default_tool_articles_route() -> String {
    "/tools".to_string()
}

fn default_index_file() -> String {
    "search-index.json".to_string()
}

fn default_records_file() -> String {
    "search.json".to_string()
}

fn default_cache_max_age() -> u32 {
    1800
}

fn default_true() -> bool {
    true
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            docs: default_docs_dir(),
            tool_articles: default_tool_articles_dir(),
            pages: default_pages_dir(),
        }
    }
}

impl ContentConfig {
    /// Directory holding the given collection.
    pub fn collection_dir(&self, kind: SourceKind) -> PathBuf {
        let name = match kind {
            SourceKind::Docs => &self.docs,
            SourceKind::ToolArticles => &self.tool_articles,
            SourceKind::Pages => &self.pages,
        };
        self.dir.join(name)
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            docs: default_docs_route(),
            tool_articles: default_tool_articles_route(),
            pages: String::new(),
        }
    }
}

impl RoutesConfig {
    /// Route prefix for the given collection, without a trailing slash.
    pub fn prefix(&self, kind: SourceKind) -> &str {
        let prefix = match kind {
            SourceKind::Docs => &self.docs,
            SourceKind::ToolArticles => &self.tool_articles,
            SourceKind::Pages => &self.pages,
        };
        prefix.trim_end_matches('/')
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_file: default_index_file(),
            records_file: default_records_file(),
            cache_max_age: default_cache_max_age(),
            pretty: true,
            infer_tool_from_tags: true,
        }
    }
}

impl Config {
    /// Build a configuration with defaults for everything but the site section.
    pub fn new(title: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            site: SiteConfig {
                title: title.into(),
                base_url: base_url.into(),
            },
            content: ContentConfig::default(),
            routes: RoutesConfig::default(),
            search: SearchConfig::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `SITESEARCH__` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("SITESEARCH").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        if self.search.index_file == self.search.records_file {
            return Err(CoreError::config(
                "search.index_file and search.records_file must differ",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
title = "GoRakuDo"
base_url = "https://example.com"

[content]
dir = "site/content"
tool_articles = "tools"

[routes]
docs = "/articles/"

[search]
cache_max_age = 600
pretty = false
infer_tool_from_tags = false
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("sitesearch.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "GoRakuDo");
        assert_eq!(config.content.dir, PathBuf::from("site/content"));
        assert_eq!(
            config.content.collection_dir(SourceKind::ToolArticles),
            PathBuf::from("site/content/tools")
        );
        assert_eq!(
            config.content.collection_dir(SourceKind::Docs),
            PathBuf::from("site/content/docs")
        );
        assert_eq!(config.routes.prefix(SourceKind::Docs), "/articles");
        assert_eq!(config.search.cache_max_age, 600);
        assert!(!config.search.pretty);
        assert!(!config.search.infer_tool_from_tags);
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("sitesearch.toml");
        let minimal_config = r#"
[site]
title = "Minimal Site"
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, minimal_config).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.content.dir, PathBuf::from("content"));
        assert_eq!(config.content.pages, "pages");
        assert_eq!(config.routes.prefix(SourceKind::Docs), "/docs");
        assert_eq!(config.routes.prefix(SourceKind::ToolArticles), "/tools");
        assert_eq!(config.routes.prefix(SourceKind::Pages), "");
        assert_eq!(config.search.index_file, "search-index.json");
        assert_eq!(config.search.records_file, "search.json");
        assert_eq!(config.search.cache_max_age, 1800);
        assert!(config.search.pretty);
        assert!(config.search.infer_tool_from_tags);
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("sitesearch.toml");
        let config_content = r#"
[site]
title = ""
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_config_validation_same_output_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("sitesearch.toml");
        let config_content = r#"
[site]
title = "Test"
base_url = "https://example.com"

[search]
index_file = "search.json"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let err = Config::load(&config_path).unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/sitesearch.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_with_env_reads_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("sitesearch.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.site.title, "GoRakuDo");
        assert_eq!(config.search.cache_max_age, 600);
    }
}

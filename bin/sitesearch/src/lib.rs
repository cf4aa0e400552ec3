//! Sitesearch CLI Library
//!
//! Command implementations and the preview server behind the `sitesearch`
//! binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, serve, check)
//! - [`server`] - HTTP server for the index endpoints
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use sitesearch::cmd::{self, build::FilterArgs};
//!
//! # async fn run() -> color_eyre::eyre::Result<()> {
//! cmd::build::run(Path::new("sitesearch.toml"), Path::new("public"), &FilterArgs::default()).await?;
//! # Ok(())
//! # }
//! ```

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};

pub mod cmd;
pub mod server;

// Re-export core types for convenience
pub use sitesearch_core::Config;
use sitesearch_core::TracingLogger;
pub use sitesearch_index::{IndexAggregator, IndexEmitter, IndexFilters, SearchResponse};
use sitesearch_index::{FsContentStore, RouteResolver};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Load the configuration file with `SITESEARCH__` environment overrides.
pub fn load_config(path: &Path) -> Result<Config> {
    Config::load_with_env(path).wrap_err("Failed to load configuration")
}

/// Aggregator reading the configured content directory.
pub fn aggregator_for(config: &Config) -> IndexAggregator {
    IndexAggregator::new(
        Arc::new(FsContentStore::new(config.content.clone())),
        Arc::new(RouteResolver::new(config.routes.clone())),
        Arc::new(TracingLogger::new()),
    )
    .with_tool_inference(config.search.infer_tool_from_tags)
}

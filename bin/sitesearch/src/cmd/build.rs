//! Build command - generates the search index files

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr};
use sitesearch_index::{IndexEmitter, IndexFilters};

/// Filters narrowing the emitted records.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FilterArgs {
    /// Only records in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Only records carrying this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Only tool articles about this tool
    #[arg(long)]
    pub tool: Option<String>,

    /// Only records of this type (docs, tool-article, page)
    #[arg(long = "type")]
    pub record_type: Option<String>,
}

impl FilterArgs {
    pub fn to_filters(&self) -> IndexFilters {
        IndexFilters::from_query(
            self.category.as_deref(),
            self.tag.as_deref(),
            self.tool.as_deref(),
            self.record_type.as_deref(),
        )
    }
}

/// Run the build command.
///
/// Aggregates every collection and writes the index document and the
/// record array to `output`. A failed aggregation writes nothing.
pub async fn run(config_path: &Path, output: &Path, filters: &FilterArgs) -> Result<Vec<PathBuf>> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, ?filters, "Starting build");

    let config = crate::load_config(config_path)?;
    let filters = filters.to_filters();

    let response = crate::aggregator_for(&config)
        .aggregate(&filters)
        .await
        .wrap_err("Failed to aggregate search data")?;

    let written = IndexEmitter::from_config(&config.search)
        .write_files(&response, output, &config.search)
        .wrap_err("Failed to write search index")?;

    let elapsed = start.elapsed();
    let metadata = &response.metadata;

    println!("✓ Search index built in {:.2}s", elapsed.as_secs_f64());
    println!(
        "  {} records ({} total: {} docs, {} tool articles, {} pages)",
        response.data.len(),
        metadata.total_items,
        metadata.docs_count,
        metadata.tool_articles_count,
        metadata.pages_count
    );
    for path in &written {
        println!("  → {}", path.display());
    }

    Ok(written)
}

//! Sitesearch CLI
//!
//! Builds, serves and checks the comprehensive search index of a content site.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use sitesearch::cmd::build::FilterArgs;

/// Command-line interface for sitesearch.
#[derive(Parser)]
#[command(
    name = "sitesearch",
    version,
    about = "Search index builder for content sites"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sitesearch.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Generate search-index.json and search.json
    Build {
        /// Output directory
        #[arg(short, long, default_value = "public")]
        output: std::path::PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Serve the index endpoints and the output directory
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        /// Directory served as static files
        #[arg(short, long, default_value = "public")]
        output: std::path::PathBuf,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    sitesearch::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output, filters } => {
            sitesearch::cmd::build::run(&cli.config, &output, &filters).await?;
        }
        Commands::Serve { port, output } => {
            sitesearch::cmd::serve::run(&cli.config, &output, port).await?;
        }
        Commands::Check { strict } => {
            sitesearch::cmd::check::run(&cli.config, strict).await?;
        }
    }

    Ok(())
}

//! Serve command - index endpoints plus static files

use std::{net::SocketAddr, path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};
use sitesearch_index::IndexEmitter;

use crate::server::{ServerState, create_router};

/// Run the serve command.
///
/// The index is rebuilt on every request, so content edits show up
/// without a restart.
pub async fn run(config_path: &Path, output: &Path, port: u16) -> Result<()> {
    tracing::info!(?config_path, ?output, port, "Starting server");

    let config = crate::load_config(config_path)?;
    let state = Arc::new(ServerState::new(
        crate::aggregator_for(&config),
        IndexEmitter::from_config(&config.search),
    ));

    let app = create_router(output, state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!("Serving search index at http://{addr}/search-index.json");
    println!("Press Ctrl+C to stop");

    axum::serve(listener, app).await.wrap_err("Server error")?;

    Ok(())
}

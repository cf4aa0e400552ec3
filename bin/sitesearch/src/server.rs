//! Preview server exposing the index endpoints next to the static output

use std::{path::Path, sync::Arc};

use axum::{
    Router,
    body::Body,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use sitesearch_index::{EmittedIndex, IndexAggregator, IndexEmitter, IndexFilters, SearchResponse};
use tower_http::services::ServeDir;

/// Shared state of the index handlers.
pub struct ServerState {
    pub aggregator: IndexAggregator,
    pub emitter: IndexEmitter,
}

impl ServerState {
    pub fn new(aggregator: IndexAggregator, emitter: IndexEmitter) -> Self {
        Self {
            aggregator,
            emitter,
        }
    }

    async fn aggregate(&self, query: &IndexQuery) -> sitesearch_index::Result<SearchResponse> {
        let filters = IndexFilters::from_query(
            query.category.as_deref(),
            query.tag.as_deref(),
            query.tool.as_deref(),
            query.record_type.as_deref(),
        );
        self.aggregator.aggregate(&filters).await
    }
}

/// Query parameters accepted by the index endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub tool: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
}

/// Create the server router.
///
/// `/search-index.json` and `/search.json` are built per request; every
/// other path is served from `output_dir`.
pub fn create_router(output_dir: &Path, state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/search-index.json", get(index_handler))
        .route("/search.json", get(records_handler))
        .fallback_service(ServeDir::new(output_dir))
        .with_state(state)
}

/// The comprehensive index document.
pub async fn index_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<IndexQuery>,
) -> Response {
    let outcome = state.aggregate(&query).await;
    to_response(state.emitter.emit(outcome.as_ref()))
}

/// The bare record array read by the pagination client.
pub async fn records_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<IndexQuery>,
) -> Response {
    let outcome = state.aggregate(&query).await;
    to_response(state.emitter.emit_records(outcome.as_ref()))
}

fn to_response(emitted: EmittedIndex) -> Response {
    let mut builder = Response::builder().status(emitted.status);
    for (name, value) in &emitted.headers {
        builder = builder.header(*name, value.as_str());
    }
    builder
        .body(Body::from(emitted.body))
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to build index response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}

//! Sitesearch Client
//!
//! Browser-side pagination and display of the record feed (`search.json`).
//!
//! The [`PaginationEngine`] fetches the feed once, sorts it newest first and
//! renders one page of cards at a time. Page changes are in-memory slices;
//! the network is only touched by [`PaginationEngine::load`].
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { DocsPagination } from 'sitesearch-client';
//!
//! await init();
//! const pagination = await DocsPagination.mount('#postsContainer', 'paginationControls', 6);
//! pagination.changePage(2);
//! ```

pub mod date;
pub mod engine;
pub mod fetch;
pub mod logger;
pub mod pagination;
pub mod record;
pub mod render;
pub mod surface;
pub mod wasm;

pub use engine::{EngineSettings, EngineState, PaginationEngine};
pub use fetch::{Fetcher, HttpFetcher, StaticFetcher};
pub use logger::{ClientLogLevel, ClientLogger, ConsoleLogger, MemoryClientLogger};
pub use pagination::{
    Pagination, PaginationResult, page_window, should_redirect_to_first_page, validate_page_number,
};
pub use record::ClientRecord;
pub use surface::{DisplaySurface, DomSurface, MemoryCard, MemorySurface};
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Errors raised while loading the record feed.
///
/// They never escape the engine: [`PaginationEngine::load`] logs them and
/// moves to [`EngineState::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request could not be sent or the body could not be read.
    #[error("Network error: {0}")]
    Fetch(String),

    /// The server answered with a non-success status.
    #[error("HTTP error! status: {0}")]
    Http(u16),

    /// No response within the configured timeout.
    #[error("request timed out after {0} ms")]
    Timeout(u32),

    /// The body is not a JSON array of records.
    #[error("Invalid data format: {0}")]
    Parse(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Initialize the WASM module.
///
/// Sets up panic hook for better error messages in the console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the version of the client library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        assert!(get_version().starts_with("0."));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ClientError::Http(404).to_string(), "HTTP error! status: 404");
        assert_eq!(
            ClientError::Parse("expected array".into()).to_string(),
            "Invalid data format: expected array"
        );
    }
}

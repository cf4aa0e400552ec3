//! Feed fetching.

use async_trait::async_trait;
use futures::{FutureExt, future::Either, pin_mut};
use gloo_net::http::Request;
use wasm_bindgen_futures::JsFuture;

use crate::{ClientError, Result};

/// Fetches the feed body. Futures are not `Send`: the engine runs on the
/// browser's single UI thread.
#[async_trait(?Send)]
pub trait Fetcher {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// [`Fetcher`] over the browser `fetch` API.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    timeout_ms: Option<u32>,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail requests that take longer than `timeout_ms`.
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: Option<u32>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn request(url: &str) -> Result<String> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| ClientError::Fetch(e.to_string()))?;

        if !response.ok() {
            return Err(ClientError::Http(response.status()));
        }

        response
            .text()
            .await
            .map_err(|e| ClientError::Fetch(format!("Failed to read response: {e}")))
    }
}

#[async_trait(?Send)]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let Some(timeout_ms) = self.timeout_ms else {
            return Self::request(url).await;
        };

        let request = Self::request(url).fuse();
        let timer = sleep(timeout_ms).fuse();
        pin_mut!(request, timer);

        match futures::future::select(request, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(ClientError::Timeout(timeout_ms)),
        }
    }
}

/// Resolve after `ms` milliseconds using `setTimeout`.
async fn sleep(ms: u32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                &resolve,
                i32::try_from(ms).unwrap_or(i32::MAX),
            );
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// [`Fetcher`] returning a fixed outcome. Useful off the browser.
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    outcome: Result<String>,
}

impl StaticFetcher {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            outcome: Ok(body.into()),
        }
    }

    pub fn err(error: ClientError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

#[async_trait(?Send)]
impl Fetcher for StaticFetcher {
    async fn fetch_text(&self, _url: &str) -> Result<String> {
        self.outcome.clone()
    }
}

//! The pagination and display engine.

use std::cmp::Reverse;

use chrono::Locale;

use crate::{
    ClientError, Result,
    date::sort_key,
    fetch::Fetcher,
    logger::{ClientLogger, ConsoleLogger},
    pagination::{Pagination, PaginationResult, should_redirect_to_first_page},
    record::ClientRecord,
    render::{render_card, render_pagination},
    surface::DisplaySurface,
};

/// Lifecycle of an engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EngineState {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    /// The last load failed; the engine shows no records.
    Failed,
}

/// Engine construction parameters.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// URL of the record feed.
    pub index_url: String,
    pub posts_per_page: usize,
    /// Upper bound on numbered page buttons.
    pub max_visible_pages: usize,
    /// Page shown after loading.
    pub initial_page: usize,
    /// Locale of displayed dates.
    pub locale: Locale,
    pub fetch_timeout_ms: Option<u32>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            index_url: "/search.json".to_string(),
            posts_per_page: 6,
            max_visible_pages: 10,
            initial_page: 1,
            locale: Locale::id_ID,
            fetch_timeout_ms: None,
        }
    }
}

/// Fetches the feed once and shows it one page at a time.
///
/// The engine exclusively owns its sorted copy of the feed and the card
/// pool of its [`DisplaySurface`].
pub struct PaginationEngine<F, S, L = ConsoleLogger> {
    settings: EngineSettings,
    fetcher: F,
    surface: S,
    logger: L,
    state: EngineState,
    sorted_posts: Vec<ClientRecord>,
    current_page: usize,
}

impl<F: Fetcher, S: DisplaySurface, L: ClientLogger> PaginationEngine<F, S, L> {
    pub fn new(settings: EngineSettings, fetcher: F, surface: S, logger: L) -> Self {
        let settings = EngineSettings {
            posts_per_page: settings.posts_per_page.max(1),
            initial_page: settings.initial_page.max(1),
            ..settings
        };
        Self {
            current_page: settings.initial_page,
            settings,
            fetcher,
            surface,
            logger,
            state: EngineState::Uninitialized,
            sorted_posts: Vec::new(),
        }
    }

    /// Fetch, validate and sort the feed, then render the current page.
    ///
    /// Never fails: errors are logged and leave the engine `Failed` with no
    /// records.
    pub async fn load(&mut self) -> EngineState {
        self.state = EngineState::Loading;
        let result = match self.fetcher.fetch_text(&self.settings.index_url).await {
            Ok(text) => parse_feed(&text),
            Err(e) => Err(e),
        };
        self.apply(result)
    }

    /// Like [`load`](Self::load) with the feed body already in hand.
    pub fn load_json(&mut self, json: &str) -> EngineState {
        self.state = EngineState::Loading;
        self.apply(parse_feed(json))
    }

    fn apply(&mut self, result: Result<Vec<ClientRecord>>) -> EngineState {
        match result {
            Ok(posts) => {
                self.sorted_posts = posts;
                self.state = EngineState::Ready;
                self.logger
                    .info(&format!("Loaded {} posts", self.sorted_posts.len()));
                if should_redirect_to_first_page(self.current_page, self.total_pages()) {
                    self.current_page = 1;
                }
                self.update_display();
            }
            Err(e) => {
                self.logger.error(&format!("Error loading content data: {e}"));
                self.sorted_posts.clear();
                self.state = EngineState::Failed;
            }
        }
        self.state
    }

    /// Show page `page`. Out-of-range pages are ignored.
    ///
    /// Returns whether the page changed.
    pub fn change_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.current_page = page;
        self.update_display();
        true
    }

    pub fn total_pages(&self) -> usize {
        self.sorted_posts.len().div_ceil(self.settings.posts_per_page)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == EngineState::Ready
    }

    /// The feed, newest first.
    pub fn posts(&self) -> &[ClientRecord] {
        &self.sorted_posts
    }

    /// Geometry of the current page.
    pub fn geometry(&self) -> PaginationResult {
        Pagination::calculate(
            self.sorted_posts.len(),
            self.settings.posts_per_page,
            self.current_page,
        )
    }

    /// Records of the current page.
    pub fn current_window(&self) -> &[ClientRecord] {
        self.geometry().slice(&self.sorted_posts)
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Re-render cards and pagination controls for the current page.
    pub fn update_display(&mut self) {
        self.update_content_display();
        self.update_pagination();
    }

    fn update_content_display(&mut self) {
        if !self.surface.is_attached() {
            self.logger.error("Content container not found");
            return;
        }
        if self.sorted_posts.is_empty() {
            self.logger.warn("No posts data available");
            return;
        }

        let window = self.geometry();

        for index in 0..self.surface.card_count() {
            self.surface.hide_card(index);
        }

        for (index, post) in window.slice(&self.sorted_posts).iter().enumerate() {
            if index >= self.surface.card_count() {
                self.surface.create_card();
            }
            let html = render_card(post, self.settings.locale);
            self.surface.show_card(index, &html);
        }
    }

    fn update_pagination(&mut self) {
        let html = render_pagination(
            self.current_page,
            &self.geometry(),
            self.settings.max_visible_pages,
        );
        self.surface.set_pagination(&html);
    }
}

/// Parse the feed body: a JSON array of records, returned newest first.
pub fn parse_feed(text: &str) -> Result<Vec<ClientRecord>> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ClientError::Parse(e.to_string()))?;
    if !value.is_array() {
        return Err(ClientError::Parse("expected array".to_string()));
    }

    let mut posts: Vec<ClientRecord> =
        serde_json::from_value(value).map_err(|e| ClientError::Parse(e.to_string()))?;
    sort_newest_first(&mut posts);
    Ok(posts)
}

/// Stable sort by publish date, newest first. Records without a valid
/// date sort as the epoch.
pub fn sort_newest_first(posts: &mut [ClientRecord]) {
    posts.sort_by_key(|post| Reverse(sort_key(post.pub_date.as_deref())));
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::{
        fetch::StaticFetcher,
        logger::{ClientLogLevel, MemoryClientLogger},
        surface::MemorySurface,
    };

    type TestEngine = PaginationEngine<StaticFetcher, MemorySurface, Rc<MemoryClientLogger>>;

    fn feed(count: usize) -> String {
        let records: Vec<_> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "slug": format!("post-{i}"),
                    "title": format!("Post {i}"),
                    "pubDate": format!("2024-01-{:02}T00:00:00Z", i + 1),
                })
            })
            .collect();
        serde_json::Value::Array(records).to_string()
    }

    fn engine(fetcher: StaticFetcher) -> (TestEngine, Rc<MemoryClientLogger>) {
        let logger = Rc::new(MemoryClientLogger::new());
        let engine = PaginationEngine::new(
            EngineSettings::default(),
            fetcher,
            MemorySurface::new(),
            logger.clone(),
        );
        (engine, logger)
    }

    #[tokio::test]
    async fn test_thirteen_posts_three_pages() {
        let (mut engine, _) = engine(StaticFetcher::ok(feed(13)));
        assert_eq!(engine.state(), EngineState::Uninitialized);

        assert_eq!(engine.load().await, EngineState::Ready);
        assert_eq!(engine.total_pages(), 3);
        assert_eq!(engine.current_window().len(), 6);
        assert_eq!(engine.surface().visible_cards().len(), 6);

        assert!(engine.change_page(3));
        assert_eq!(engine.current_page(), 3);
        assert_eq!(engine.current_window().len(), 1);
        // Cards are reused by position; the rest stay hidden in the pool.
        assert_eq!(engine.surface().card_count(), 6);
        assert_eq!(engine.surface().visible_cards().len(), 1);
        assert!(engine.surface().visible_cards()[0].contains("Post 0"));
    }

    #[tokio::test]
    async fn test_out_of_range_pages_ignored() {
        let (mut engine, logger) = engine(StaticFetcher::ok(feed(13)));
        engine.load().await;
        assert!(engine.change_page(2));

        assert!(!engine.change_page(0));
        assert!(!engine.change_page(engine.total_pages() + 1));
        assert_eq!(engine.current_page(), 2);
        assert!(logger.messages(ClientLogLevel::Error).is_empty());
    }

    #[tokio::test]
    async fn test_newest_first_missing_dates_last() {
        let json = r#"[
            {"slug": "undated"},
            {"slug": "old", "pubDate": "2023-05-01"},
            {"slug": "bad", "pubDate": "someday"},
            {"slug": "new", "pubDate": "2024-06-01T00:00:00Z"}
        ]"#;
        let (mut engine, _) = engine(StaticFetcher::ok(json));
        engine.load().await;

        let slugs: Vec<_> = engine.posts().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "old", "undated", "bad"]);
    }

    #[tokio::test]
    async fn test_non_array_payload_fails() {
        let (mut engine, logger) = engine(StaticFetcher::ok(r#"{"data": []}"#));

        assert_eq!(engine.load().await, EngineState::Failed);
        assert!(engine.posts().is_empty());
        assert_eq!(engine.total_pages(), 0);
        assert!(!engine.change_page(1));

        let errors = logger.messages(ClientLogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("expected array"));
    }

    #[tokio::test]
    async fn test_fetch_error_fails() {
        let (mut engine, logger) = engine(StaticFetcher::err(ClientError::Http(404)));
        assert_eq!(engine.load().await, EngineState::Failed);
        assert!(!engine.is_ready());
        assert!(logger.messages(ClientLogLevel::Error)[0].contains("status: 404"));
    }

    #[tokio::test]
    async fn test_failed_reload_clears_posts() {
        let (mut engine, _) = engine(StaticFetcher::ok(feed(3)));
        engine.load().await;
        assert_eq!(engine.posts().len(), 3);

        assert_eq!(engine.load_json("not json"), EngineState::Failed);
        assert!(engine.posts().is_empty());
    }

    #[test]
    fn test_empty_feed() {
        let (mut engine, logger) = engine(StaticFetcher::ok("[]"));
        assert_eq!(engine.load_json("[]"), EngineState::Ready);
        assert_eq!(engine.total_pages(), 0);
        assert!(engine.current_window().is_empty());
        assert!(!engine.surface().pagination.contains("<button"));
        assert_eq!(logger.messages(ClientLogLevel::Warn).len(), 1);
    }

    #[test]
    fn test_pagination_rendered() {
        let (mut engine, _) = engine(StaticFetcher::ok("[]"));
        engine.load_json(&feed(13));

        let controls = &engine.surface().pagination;
        assert!(controls.contains(r#"data-page="3""#));
        assert!(controls.contains("Next"));
        assert!(!controls.contains("Previous"));
    }

    #[test]
    fn test_initial_page_past_end_shows_first_page() {
        let settings = EngineSettings {
            initial_page: 5,
            ..Default::default()
        };
        let mut engine: TestEngine = PaginationEngine::new(
            settings,
            StaticFetcher::ok("[]"),
            MemorySurface::new(),
            Rc::new(MemoryClientLogger::new()),
        );
        assert_eq!(engine.current_page(), 5);

        assert_eq!(engine.load_json(&feed(2)), EngineState::Ready);
        assert_eq!(engine.current_page(), 1);
        assert_eq!(engine.surface().visible_cards().len(), 2);
        assert!(!engine.surface().pagination.contains("Previous"));
        assert!(engine.surface().pagination.contains(r#"aria-current="page">1<"#));
    }

    #[test]
    fn test_initial_page_kept_when_in_range() {
        let settings = EngineSettings {
            initial_page: 2,
            ..Default::default()
        };
        let mut engine: TestEngine = PaginationEngine::new(
            settings,
            StaticFetcher::ok("[]"),
            MemorySurface::new(),
            Rc::new(MemoryClientLogger::new()),
        );
        engine.load_json(&feed(13));

        assert_eq!(engine.current_page(), 2);
        let geometry = engine.geometry();
        assert!(geometry.has_previous);
        assert!(geometry.has_next);
        assert!(engine.surface().pagination.contains("Previous"));
        assert!(engine.surface().pagination.contains("Next"));
    }

    #[test]
    fn test_settings_clamped() {
        let settings = EngineSettings {
            posts_per_page: 0,
            initial_page: 0,
            ..Default::default()
        };
        let engine: TestEngine = PaginationEngine::new(
            settings,
            StaticFetcher::ok("[]"),
            MemorySurface::new(),
            Rc::new(MemoryClientLogger::new()),
        );
        assert_eq!(engine.settings().posts_per_page, 1);
        assert_eq!(engine.current_page(), 1);
    }
}

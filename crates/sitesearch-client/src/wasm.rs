//! JavaScript bindings.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{Element, Event};

use crate::{
    engine::{EngineSettings, PaginationEngine},
    fetch::HttpFetcher,
    logger::ConsoleLogger,
    pagination::validate_page_number,
    surface::DomSurface,
};

type DomEngine = PaginationEngine<HttpFetcher, DomSurface, ConsoleLogger>;

/// Paginated post list bound to the page DOM.
#[wasm_bindgen]
pub struct DocsPagination {
    engine: Rc<RefCell<DomEngine>>,
}

#[wasm_bindgen]
impl DocsPagination {
    /// Bind to the DOM, load the feed and render the first page.
    ///
    /// Clicks on any `[data-page]` element inside the pagination controls
    /// switch pages.
    #[wasm_bindgen(js_name = mount)]
    pub async fn mount(
        container_selector: String,
        pagination_id: String,
        posts_per_page: Option<usize>,
        index_url: Option<String>,
        timeout_ms: Option<u32>,
    ) -> DocsPagination {
        let defaults = EngineSettings::default();
        let settings = EngineSettings {
            index_url: index_url.unwrap_or(defaults.index_url.clone()),
            posts_per_page: posts_per_page.unwrap_or(defaults.posts_per_page),
            fetch_timeout_ms: timeout_ms,
            ..defaults
        };

        let surface = DomSurface::from_document(&container_selector, &pagination_id);
        let controls = surface.pagination_element().cloned();
        let fetcher = HttpFetcher::new().with_timeout(settings.fetch_timeout_ms);

        let mut engine = PaginationEngine::new(settings, fetcher, surface, ConsoleLogger);
        engine.load().await;

        let engine = Rc::new(RefCell::new(engine));
        if let Some(controls) = controls {
            attach_click_handler(&controls, Rc::downgrade(&engine));
        }

        Self { engine }
    }

    /// Show page `page`; out-of-range pages are ignored.
    #[wasm_bindgen(js_name = changePage)]
    pub fn change_page(&self, page: i32) -> bool {
        let Ok(page) = usize::try_from(page) else {
            return false;
        };
        self.engine
            .try_borrow_mut()
            .map(|mut engine| engine.change_page(page))
            .unwrap_or(false)
    }

    #[wasm_bindgen(js_name = totalPages)]
    pub fn total_pages(&self) -> usize {
        self.engine.borrow().total_pages()
    }

    #[wasm_bindgen(js_name = currentPage)]
    pub fn current_page(&self) -> usize {
        self.engine.borrow().current_page()
    }

    #[wasm_bindgen(js_name = postCount)]
    pub fn post_count(&self) -> usize {
        self.engine.borrow().posts().len()
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.engine.borrow().is_ready()
    }
}

fn attach_click_handler(controls: &Element, engine: Weak<RefCell<DomEngine>>) {
    let handler = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
        let page = ev
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("[data-page]").ok().flatten())
            .and_then(|el| el.get_attribute("data-page"));
        let Some(page) = page else {
            return;
        };

        let page = validate_page_number(Some(&page));
        if let Some(engine) = engine.upgrade()
            && let Ok(mut engine) = engine.try_borrow_mut()
        {
            engine.change_page(page);
        }
    });

    let _ = controls.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref());

    // Leak the closure to keep it alive
    handler.forget();
}

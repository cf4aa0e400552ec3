//! Display targets for the engine.
//!
//! Cards form a pool indexed by position. The engine reuses card `i` for
//! the `i`-th record of whatever page is shown, and hides cards past the
//! window instead of removing them.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

const CARD_CLASS: &str = "post-card";
const FALLBACK_CONTAINER: &str = ".posts-container";

/// Where cards and pagination controls are rendered.
pub trait DisplaySurface {
    /// Whether the card container exists.
    fn is_attached(&self) -> bool {
        true
    }

    /// Number of cards in the pool.
    fn card_count(&self) -> usize;

    /// Append one card to the pool.
    fn create_card(&mut self);

    /// Fill card `index` with `html` and show it. Out of range is a no-op.
    fn show_card(&mut self, index: usize, html: &str);

    /// Hide card `index` without removing it. Out of range is a no-op.
    fn hide_card(&mut self, index: usize);

    /// Replace the pagination controls.
    fn set_pagination(&mut self, html: &str);
}

/// One card of a [`MemorySurface`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCard {
    pub html: String,
    pub visible: bool,
}

/// In-memory [`DisplaySurface`].
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub cards: Vec<MemoryCard>,
    pub pagination: String,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the visible cards, in pool order.
    pub fn visible_cards(&self) -> Vec<&str> {
        self.cards
            .iter()
            .filter(|c| c.visible)
            .map(|c| c.html.as_str())
            .collect()
    }
}

impl DisplaySurface for MemorySurface {
    fn card_count(&self) -> usize {
        self.cards.len()
    }

    fn create_card(&mut self) {
        self.cards.push(MemoryCard::default());
    }

    fn show_card(&mut self, index: usize, html: &str) {
        if let Some(card) = self.cards.get_mut(index) {
            card.html = html.to_string();
            card.visible = true;
        }
    }

    fn hide_card(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            card.visible = false;
        }
    }

    fn set_pagination(&mut self, html: &str) {
        self.pagination = html.to_string();
    }
}

/// [`DisplaySurface`] over the page DOM.
///
/// Cards already present in the container (server-rendered `.post-card`
/// elements) seed the pool.
pub struct DomSurface {
    document: Option<Document>,
    container: Option<Element>,
    pagination: Option<Element>,
    cards: Vec<HtmlElement>,
}

impl DomSurface {
    /// Bind to the container matching `container_selector` (falling back to
    /// `.posts-container`) and the element with id `pagination_id`.
    pub fn from_document(container_selector: &str, pagination_id: &str) -> Self {
        let document = web_sys::window().and_then(|w| w.document());

        let container = document.as_ref().and_then(|doc| {
            doc.query_selector(container_selector)
                .ok()
                .flatten()
                .or_else(|| doc.query_selector(FALLBACK_CONTAINER).ok().flatten())
        });
        let pagination = document
            .as_ref()
            .and_then(|doc| doc.get_element_by_id(pagination_id));

        let cards = container
            .as_ref()
            .map(existing_cards)
            .unwrap_or_default();

        Self {
            document,
            container,
            pagination,
            cards,
        }
    }

    /// The pagination controls element, if present.
    pub fn pagination_element(&self) -> Option<&Element> {
        self.pagination.as_ref()
    }
}

fn existing_cards(container: &Element) -> Vec<HtmlElement> {
    let Ok(nodes) = container.query_selector_all(&format!(".{CARD_CLASS}")) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn set_display(card: &HtmlElement, value: &str) {
    let _ = card.style().set_property("display", value);
}

impl DisplaySurface for DomSurface {
    fn is_attached(&self) -> bool {
        self.container.is_some()
    }

    fn card_count(&self) -> usize {
        self.cards.len()
    }

    fn create_card(&mut self) {
        let (Some(document), Some(container)) = (&self.document, &self.container) else {
            return;
        };
        let Some(card) = document
            .create_element("article")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        card.set_class_name(CARD_CLASS);
        if container.append_child(&card).is_ok() {
            self.cards.push(card);
        }
    }

    fn show_card(&mut self, index: usize, html: &str) {
        if let Some(card) = self.cards.get(index) {
            card.set_inner_html(html);
            set_display(card, "block");
        }
    }

    fn hide_card(&mut self, index: usize) {
        if let Some(card) = self.cards.get(index) {
            set_display(card, "none");
        }
    }

    fn set_pagination(&mut self, html: &str) {
        if let Some(pagination) = &self.pagination {
            pagination.set_inner_html(html);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_surface_pool() {
        let mut surface = MemorySurface::new();
        surface.create_card();
        surface.create_card();
        surface.show_card(0, "a");
        surface.show_card(1, "b");
        surface.hide_card(1);
        surface.show_card(5, "ignored");

        assert_eq!(surface.card_count(), 2);
        assert_eq!(surface.visible_cards(), vec!["a"]);
        assert_eq!(surface.cards[1].html, "b");
    }
}

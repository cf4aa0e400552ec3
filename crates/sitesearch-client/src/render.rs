//! HTML markup for cards and pagination controls.

use std::fmt::Write;

use chrono::Locale;

use crate::{
    date::format_display_date,
    pagination::{PaginationResult, page_window},
    record::ClientRecord,
};

/// Tags shown on a card before the `+N` marker.
pub const VISIBLE_TAGS: usize = 3;

/// Escape text for HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Inner markup of one post card.
pub fn render_card(record: &ClientRecord, locale: Locale) -> String {
    let href = escape_html(&record.href());
    let mut html = String::new();

    if let Some(emoji) = record.emoji.as_deref().filter(|e| !e.is_empty()) {
        let _ = write!(html, r#"<div class="post-emoji">{}</div>"#, escape_html(emoji));
    }

    let all_tags = serde_json::to_string(&record.tags).unwrap_or_else(|_| "[]".to_string());
    let _ = write!(
        html,
        concat!(
            r#"<div class="post-card-container">"#,
            r#"<div class="post-header">"#,
            r#"<h2 class="post-title"><a href="{href}">{title}</a></h2>"#,
            r#"<div class="post-meta"><span class="post-date">{date}</span></div>"#,
            r#"</div>"#,
            r#"<p class="post-description">{description}</p>"#,
            r#"<div class="post-tags" data-all-tags="{all_tags}">"#,
        ),
        href = href,
        title = escape_html(record.display_title()),
        date = format_display_date(record.pub_date.as_deref(), locale),
        description = escape_html(record.description.as_deref().unwrap_or_default()),
        all_tags = escape_html(&all_tags),
    );

    for tag in record.tags.iter().take(VISIBLE_TAGS) {
        let _ = write!(html, r#"<span class="post-tag">{}</span>"#, escape_html(tag));
    }
    let hidden = record.tags.len().saturating_sub(VISIBLE_TAGS);
    if hidden > 0 {
        let _ = write!(
            html,
            r#"<span class="post-tag-more" data-count="{hidden}">+{hidden}</span>"#
        );
    }

    let _ = write!(
        html,
        r#"</div><a href="{href}" class="read-more-btn">Baca Selengkapnya →</a></div>"#
    );
    html
}

/// Pagination controls: Previous, a window of page buttons, Next.
///
/// Every button carries its target page in `data-page`. `geometry` is the
/// [`PaginationResult`] of `current`.
pub fn render_pagination(current: usize, geometry: &PaginationResult, max_visible: usize) -> String {
    let mut html =
        String::from(r#"<div class="pagination" role="navigation" aria-label="Pagination">"#);

    if geometry.has_previous {
        let _ = write!(
            html,
            r#"<button class="pagination-btn" data-page="{}" aria-label="Previous page">← Previous</button>"#,
            current - 1
        );
    }

    for page in page_window(current, geometry.total_pages, max_visible) {
        let (class, aria_current) = if page == current {
            ("pagination-btn active", "page")
        } else {
            ("pagination-btn", "false")
        };
        let _ = write!(
            html,
            r#"<button class="{class}" data-page="{page}" aria-label="Page {page}" aria-current="{aria_current}">{page}</button>"#
        );
    }

    if geometry.has_next {
        let _ = write!(
            html,
            r#"<button class="pagination-btn" data-page="{}" aria-label="Next page">Next →</button>"#,
            current + 1
        );
    }

    html.push_str("</div>");
    html
}

//! Pagination arithmetic.

use std::ops::RangeInclusive;

/// Page geometry of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationResult {
    /// Index of the first item on the page.
    pub start: usize,
    /// One past the last item on the page, clamped to the list length.
    pub end: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationResult {
    /// The page's items out of `items`. Empty past the last page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end.min(items.len());
        items.get(self.start.min(end)..end).unwrap_or_default()
    }
}

pub struct Pagination;

impl Pagination {
    /// Geometry of 1-based `page` over `len` items, `per_page` per page.
    pub fn calculate(len: usize, per_page: usize, page: usize) -> PaginationResult {
        let per_page = per_page.max(1);
        let page = page.max(1);
        let total_pages = len.div_ceil(per_page);
        let start = (page - 1).saturating_mul(per_page);
        let end = start.saturating_add(per_page).min(len);

        PaginationResult {
            start,
            end: end.max(start.min(len)),
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }
}

/// Page numbers shown around `current`: at most `max_visible`, starting
/// `max_visible / 2` before `current` and clamped to `[1, total]`.
///
/// Empty when there are no pages.
pub fn page_window(current: usize, total: usize, max_visible: usize) -> RangeInclusive<usize> {
    let start = current.saturating_sub(max_visible / 2).max(1);
    let end = total.min(start + max_visible.saturating_sub(1));
    // `start..=end` with end < start is empty.
    start..=end
}

/// Page number from a raw parameter; anything unparsable or below 1 is 1.
pub fn validate_page_number(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

/// Whether `current` points past the last page of a non-empty list.
pub fn should_redirect_to_first_page(current: usize, total_pages: usize) -> bool {
    total_pages > 0 && current > total_pages
}

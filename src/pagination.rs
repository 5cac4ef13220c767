//! This modules defines the common functionality for paging data.

use serde::Serialize;

/// The config for pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to display per page when not specified in a request.
    pub default_page_size: u64,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_pages: 5,
        }
    }
}

/// The number of pages needed for `item_count` items, never less than one.
///
/// An empty list still has one (empty) page. `page_size` must be non-zero.
pub fn count_pages(item_count: u64, page_size: u64) -> u64 {
    item_count.div_ceil(page_size).max(1)
}

/// Clamp `page` into `1..=page_count`.
pub fn clamp_page(page: u64, page_count: u64) -> u64 {
    page.clamp(1, page_count.max(1))
}

/// One control in a pagination bar.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PaginationIndicator {
    /// A link to another page.
    Page(u64),
    /// The page being shown.
    CurrPage(u64),
    /// A gap in the page numbers.
    Ellipsis,
    /// A link to the following page.
    NextButton(u64),
    /// A link to the preceding page.
    BackButton(u64),
}

/// Lay out the pagination bar for `curr_page` out of `page_count` pages.
///
/// At most `max_pages` page numbers are shown around the current page, with
/// the first and last page always reachable. A list that fits on one page
/// gets no pagination bar at all.
pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    if page_count <= 1 {
        return Vec::new();
    }

    let curr_page = clamp_page(curr_page, page_count);
    let max_pages = max_pages.max(1);
    let half_window = max_pages / 2;

    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let window = if page_count <= max_pages {
        1..=page_count
    } else if curr_page <= half_window {
        1..=max_pages
    } else if curr_page > page_count - half_window {
        (page_count - max_pages + 1)..=page_count
    } else {
        (curr_page - half_window)..=(curr_page + half_window)
    };

    let mut indicators: Vec<PaginationIndicator> = Vec::new();

    if curr_page > 1 {
        indicators.push(PaginationIndicator::BackButton(curr_page - 1));
    }

    let (window_start, window_end) = (*window.start(), *window.end());

    if window_start > 1 {
        indicators.push(PaginationIndicator::Page(1));
        if window_start > 2 {
            indicators.push(PaginationIndicator::Ellipsis);
        }
    }

    indicators.extend(window.map(map_page));

    if window_end < page_count {
        if window_end < page_count - 1 {
            indicators.push(PaginationIndicator::Ellipsis);
        }
        indicators.push(PaginationIndicator::Page(page_count));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

//! Page numbering for search result listings.

use serde::Serialize;

/// Index of the first result on a 1-based `page`.
///
/// Saturates instead of overflowing on absurd page numbers.
pub fn start_offset(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1).saturating_mul(page_size)
}

/// Rebuild a result-page link from a URL whose `page` parameter was stripped.
pub fn page_url(normalized_url: &str, page: usize) -> String {
    if normalized_url.ends_with('?') || normalized_url.ends_with('&') {
        format!("{}page={}", normalized_url, page)
    } else if normalized_url.contains('?') {
        format!("{}&page={}", normalized_url, page)
    } else {
        format!("{}?page={}", normalized_url, page)
    }
}

/// Links around the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub page: usize,
    pub start: usize,
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl PageLinks {
    /// Build links for `page`.
    ///
    /// With a known `total` the next link only appears when more results
    /// remain; without one it is always offered.
    pub fn new(normalized_url: &str, page: usize, page_size: usize, total: Option<u64>) -> Self {
        let page = page.max(1);
        let start = start_offset(page, page_size);

        let previous = (page > 1).then(|| page_url(normalized_url, page - 1));
        let has_next = page < usize::MAX
            && total.map_or(true, |total| (start.saturating_add(page_size) as u64) < total);
        let next = has_next.then(|| page_url(normalized_url, page + 1));

        Self {
            page,
            start,
            previous,
            next,
        }
    }
}

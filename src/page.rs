//! Page requests, clamping and the page handed to the display layer.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Default number of rows per page in history views.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Default number of numbered page buttons shown at once.
pub const DEFAULT_WINDOW_WIDTH: usize = 5;

/// Which page the presentation layer wants.
///
/// `page_number` is 1-based but any value is accepted; it is clamped
/// against the filtered total when the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page_number: i64,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page_number: i64, page_size: usize) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// First page at the given size.
    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }

    /// Page size actually used for slicing (never zero).
    pub fn effective_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Page number clamped into `[1, total_pages]`.
    pub fn clamped(&self, total_pages: usize) -> usize {
        let last = total_pages.max(1) as i64;
        self.page_number.clamp(1, last) as usize
    }
}

/// `max(1, ceil(total / page_size))`.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Range of page numbers to show as buttons.
///
/// Holds `width` consecutive pages (fewer when there are fewer pages),
/// keeps `current` inside and centered where the bounds allow. `current`
/// is clamped first, so the range never leaves `[1, total_pages]`.
pub fn page_window(current: usize, total_pages: usize, width: usize) -> RangeInclusive<usize> {
    let total = total_pages.max(1);
    let width = width.clamp(1, total);
    let current = current.clamp(1, total);

    let start = current.saturating_sub(width / 2).max(1);
    let start = start.min(total - width + 1);
    start..=start + width - 1
}

/// One displayable page of filtered, sorted records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPage<'a> {
    /// Rows on this page, most recent first.
    pub items: Vec<&'a Record>,
    /// Number of records passing the criteria, across all pages.
    pub total_matching: usize,
    /// `max(1, ceil(total_matching / page_size))`.
    pub total_pages: usize,
    /// Effective page number after clamping.
    pub page_number: usize,
    pub page_size: usize,
}

impl<'a> ViewPage<'a> {
    /// Slice one page out of the already filtered and sorted rows.
    pub fn slice(rows: Vec<&'a Record>, request: &PageRequest) -> Self {
        let page_size = request.effective_size();
        let total_matching = rows.len();
        let total_pages = total_pages(total_matching, page_size);
        let page_number = request.clamped(total_pages);

        let start = (page_number - 1) * page_size;
        let items = rows.into_iter().skip(start).take(page_size).collect();

        Self {
            items,
            total_matching,
            total_pages,
            page_number,
            page_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// 1-based position of the first row on this page, 0 when empty.
    pub fn first_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page_number - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last row on this page, 0 when empty.
    pub fn last_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_item() + self.items.len() - 1
        }
    }

    /// "X–Y of Z" caption for the pagination bar.
    pub fn caption(&self) -> String {
        if self.items.is_empty() {
            format!("0 of {}", self.total_matching)
        } else {
            format!(
                "{}–{} of {}",
                self.first_item(),
                self.last_item(),
                self.total_matching
            )
        }
    }

    /// Numbered page buttons around the current page.
    pub fn window(&self, width: usize) -> RangeInclusive<usize> {
        page_window(self.page_number, self.total_pages, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<Record> {
        (0..n).map(|i| Record::new(i.to_string())).collect()
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn test_clamp_out_of_range_requests() {
        assert_eq!(PageRequest::new(0, 20).clamped(3), 1);
        assert_eq!(PageRequest::new(-7, 20).clamped(3), 1);
        assert_eq!(PageRequest::new(99, 20).clamped(3), 3);
        assert_eq!(PageRequest::new(2, 20).clamped(3), 2);
        assert_eq!(PageRequest::new(5, 20).clamped(0), 1);
    }

    #[test]
    fn test_slice_last_partial_page() {
        let records = rows(45);
        let page = ViewPage::slice(records.iter().collect(), &PageRequest::new(3, 20));
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].id, "40");
        assert_eq!(page.caption(), "41–45 of 45");
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_slice_empty() {
        let page = ViewPage::slice(Vec::new(), &PageRequest::new(4, 20));
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.caption(), "0 of 0");
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_window_centered() {
        assert_eq!(page_window(6, 10, 5), 4..=8);
        assert_eq!(page_window(1, 10, 5), 1..=5);
        assert_eq!(page_window(10, 10, 5), 6..=10);
        assert_eq!(page_window(9, 10, 5), 6..=10);
    }

    #[test]
    fn test_window_fewer_pages_than_width() {
        assert_eq!(page_window(1, 1, 5), 1..=1);
        assert_eq!(page_window(2, 3, 5), 1..=3);
        assert_eq!(page_window(3, 3, 5), 1..=3);
        assert_eq!(page_window(7, 3, 5), 1..=3);
    }

    #[test]
    fn test_window_even_width() {
        assert_eq!(page_window(5, 10, 4), 3..=6);
        assert_eq!(page_window(1, 10, 0), 1..=1);
    }
}

//! Transient view state owned by the presentation layer.
//!
//! Holds the criteria and page request between user interactions and
//! applies the control inputs a history screen sends: keystrokes in the
//! search box, filter chip toggles, page buttons, and the reset action.

use serde::{Deserialize, Serialize};

use crate::criteria::FilterCriteria;
use crate::page::{PageRequest, ViewPage};
use crate::pipeline::ViewPipeline;
use crate::record::Record;

/// Criteria and page request for one history view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub criteria: FilterCriteria,
    pub page: PageRequest,
}

impl ViewState {
    /// Fresh state at page 1 with the given page size.
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::new(),
            page: PageRequest::first(page_size),
        }
    }

    /// Replace the search text. Returns to page 1.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.criteria.search_text = text.into();
        self.page.page_number = 1;
    }

    /// Toggle one accepted value for a field. Returns to page 1.
    pub fn toggle_selection(&mut self, field: &str, value: &str) {
        self.criteria.toggle(field, value);
        self.page.page_number = 1;
    }

    /// Replace the accepted values for a field. Returns to page 1.
    pub fn set_selection<I, S>(&mut self, field: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.criteria.select(field, values);
        self.page.page_number = 1;
    }

    /// Request a page; clamping happens when the view is rendered.
    pub fn go_to_page(&mut self, page_number: i64) {
        self.page.page_number = page_number;
    }

    /// Advance one page, stopping at `total_pages`.
    pub fn next_page(&mut self, total_pages: usize) {
        let current = self.page.clamped(total_pages) as i64;
        self.page.page_number = (current + 1).min(total_pages.max(1) as i64);
    }

    /// Go back one page from the page actually shown, stopping at 1.
    pub fn previous_page(&mut self, total_pages: usize) {
        let current = self.page.clamped(total_pages) as i64;
        self.page.page_number = (current - 1).max(1);
    }

    /// Clear search and selections, back to page 1. Page size is kept.
    pub fn reset(&mut self) {
        self.criteria.reset();
        self.page.page_number = 1;
    }

    /// The record set was replaced; stale criteria are dropped.
    pub fn reload(&mut self) {
        tracing::debug!("record set reloaded, resetting view state");
        self.reset();
    }

    /// Compute the visible page for the current state.
    pub fn render<'r>(&self, pipeline: &ViewPipeline, records: &'r [Record]) -> ViewPage<'r> {
        pipeline.apply(records, &self.criteria, &self.page)
    }
}

//! View configuration.

use serde::{Deserialize, Serialize};

use crate::error::ViewError;
use crate::page::{DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_WIDTH};
use crate::view::ViewState;

/// Largest page size accepted from configuration.
pub const MAX_PAGE_SIZE: usize = 500;

/// Page size and pagination bar width for a history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub page_size: usize,
    pub window_width: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            window_width: DEFAULT_WINDOW_WIDTH,
        }
    }
}

impl ViewConfig {
    /// Reject sizes the view cannot sensibly show.
    pub fn validate(&self) -> Result<(), ViewError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ViewError::Configuration(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        if self.window_width == 0 {
            return Err(ViewError::Configuration(
                "window_width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Initial view state for this configuration.
    pub fn initial_state(&self) -> ViewState {
        ViewState::new(self.page_size)
    }
}

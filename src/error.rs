//! Error type for loading record sets and parsing view controls.
//!
//! The view pipeline itself never fails: malformed records degrade to
//! neutral field values and out-of-range pages are clamped. Errors only
//! come from the edges (reading a record file, parsing a CLI selection,
//! validating configuration).

use std::io;

use thiserror::Error;

/// Errors raised by record sources, selection parsing and configuration.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("record set must be a JSON array of objects: {0}")]
    InvalidRecordSet(String),
    #[error("invalid selection '{input}': {reason}")]
    InvalidSelection { input: String, reason: String },
    #[error("configuration error: {0}")]
    Configuration(String),
}

//! Record sources: where a view's full record set comes from.
//!
//! Fetching happens before the pipeline runs and always yields a complete
//! record set. A source fails as a whole only when it cannot produce a
//! record array at all; a single bad entry is skipped or degraded so the
//! rest of the page still renders.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::ViewError;
use crate::record::Record;
use crate::session::SessionContext;

/// Supplies the complete record set for a view.
pub trait RecordSource {
    fn load(&self, session: &SessionContext) -> Result<Vec<Record>, ViewError>;
}

/// Reads a JSON array of record objects from a file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonFileSource {
    fn load(&self, session: &SessionContext) -> Result<Vec<Record>, ViewError> {
        let text = fs::read_to_string(&self.path)?;
        let records = parse_records(&text)?;
        tracing::info!(
            path = %self.path.display(),
            user = %session.user.id,
            role = %session.user.role,
            records = records.len(),
            "loaded record set"
        );
        Ok(records)
    }
}

/// In-memory source, for callers that already hold the records.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<Record>,
}

impl StaticSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl RecordSource for StaticSource {
    fn load(&self, _session: &SessionContext) -> Result<Vec<Record>, ViewError> {
        Ok(self.records.clone())
    }
}

/// Parse a JSON array of records, skipping elements that are not objects.
pub fn parse_records(text: &str) -> Result<Vec<Record>, ViewError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(items) = value else {
        return Err(ViewError::InvalidRecordSet(
            "top-level value is not an array".to_string(),
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match Record::from_json(item) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(index, "skipping record: {e}"),
        }
    }
    Ok(records)
}

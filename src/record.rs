//! Record type for history views.
//!
//! A record is one row of a list or table view (one audit-log entry, for
//! example). It carries categorical fields for exact-match filtering, free
//! text fields for substring search, and a timestamp for ordering.
//!
//! ## Example
//!
//! ```
//! use history_view::Record;
//!
//! let record = Record::new("42")
//!     .at("2024-03-01T09:30:00Z".parse().unwrap())
//!     .with_category("action", "LOGIN")
//!     .with_text("message", "User attempted login");
//!
//! assert_eq!(record.category("action"), Some("LOGIN"));
//! assert_eq!(record.text("author"), "");
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ViewError;

/// One displayable entry in a history view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Stable identifier, used for list-key stability only.
    pub id: String,
    /// When the entry happened. `None` sorts after every dated record.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Categorical field name to upper-snake token.
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
    /// Free text field name to value.
    #[serde(default)]
    pub text: BTreeMap<String, String>,
}

impl Record {
    /// Create an empty record with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the timestamp.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Add a categorical field.
    pub fn with_category(mut self, field: impl Into<String>, token: impl Into<String>) -> Self {
        self.categories.insert(field.into(), token.into());
        self
    }

    /// Add a free text field.
    pub fn with_text(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.text.insert(field.into(), value.into());
        self
    }

    /// Token stored in a categorical field, if present.
    pub fn category(&self, field: &str) -> Option<&str> {
        self.categories.get(field).map(String::as_str)
    }

    /// Value of a text field; a missing field reads as the empty string.
    pub fn text(&self, field: &str) -> &str {
        self.text.get(field).map(String::as_str).unwrap_or("")
    }

    /// Build a record from a JSON object, tolerating malformed fields.
    ///
    /// Expected shape:
    /// `{"id": "...", "timestamp": "RFC3339", "categories": {..}, "text": {..}}`.
    /// Numeric ids are stringified, an unparsable timestamp becomes `None`,
    /// and non-string values inside `categories`/`text` are dropped. Only a
    /// value that is not an object at all is rejected.
    pub fn from_json(value: &Value) -> Result<Self, ViewError> {
        let Value::Object(map) = value else {
            return Err(ViewError::InvalidRecordSet(format!(
                "expected an object, found {}",
                json_kind(value)
            )));
        };

        let id = match map.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                tracing::warn!(kind = json_kind(other), "record id is not a string or number");
                String::new()
            }
            None => String::new(),
        };

        let timestamp = match map.get("timestamp") {
            Some(Value::String(s)) => match DateTime::parse_from_rfc3339(s) {
                Ok(ts) => Some(ts.with_timezone(&Utc)),
                Err(e) => {
                    tracing::warn!(record = %id, timestamp = %s, "unparsable timestamp: {e}");
                    None
                }
            },
            Some(Value::Null) | None => None,
            Some(other) => {
                tracing::warn!(record = %id, kind = json_kind(other), "timestamp is not a string");
                None
            }
        };

        Ok(Self {
            categories: string_map(map.get("categories"), &id, "categories"),
            text: string_map(map.get("text"), &id, "text"),
            id,
            timestamp,
        })
    }
}

/// Collect the string-valued entries of a JSON object, dropping the rest.
fn string_map(value: Option<&Value>, id: &str, section: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    match value {
        Some(Value::Object(map)) => {
            for (field, v) in map {
                match v {
                    Value::String(s) => {
                        out.insert(field.clone(), s.clone());
                    }
                    Value::Null => {}
                    other => tracing::warn!(
                        record = %id,
                        section,
                        field = %field,
                        kind = json_kind(other),
                        "dropping non-string field"
                    ),
                }
            }
        }
        Some(Value::Null) | None => {}
        Some(other) => {
            tracing::warn!(record = %id, section, kind = json_kind(other), "expected an object");
        }
    }
    out
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

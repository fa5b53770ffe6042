//! Filter criteria: free-text search plus categorical selections.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::Vocabulary;
use crate::error::ViewError;
use crate::record::Record;

/// Active search text and categorical selections.
///
/// An empty `search_text` imposes no constraint. A field mapped to an empty
/// set accepts every value of that field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_text: String,
    pub selections: BTreeMap<String, BTreeSet<String>>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style search text.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Builder-style selection for one field.
    pub fn with_selection<I, S>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select(field, values);
        self
    }

    /// Replace the accepted values for a field.
    pub fn select<I, S>(&mut self, field: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selections
            .insert(field.into(), values.into_iter().map(Into::into).collect());
    }

    /// Add the value if absent, remove it if present.
    pub fn toggle(&mut self, field: &str, value: &str) {
        let set = self.selections.entry(field.to_string()).or_default();
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }

    /// Drop any selection on a field.
    pub fn clear_field(&mut self, field: &str) {
        self.selections.remove(field);
    }

    /// True when no dimension constrains anything.
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.selections.values().all(BTreeSet::is_empty)
    }

    /// Back to defaults: no search text, no selections.
    pub fn reset(&mut self) {
        self.search_text.clear();
        self.selections.clear();
    }

    /// Lowercased search needle, or `None` when search is inactive.
    pub fn needle(&self) -> Option<String> {
        if self.search_text.is_empty() {
            None
        } else {
            Some(self.search_text.to_lowercase())
        }
    }

    /// Selections that actually constrain (non-empty sets).
    pub fn active_selections(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.selections
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(field, values)| (field.as_str(), values))
    }

    /// Categorical dimension only.
    pub fn matches_selections(&self, record: &Record) -> bool {
        self.active_selections()
            .all(|(field, accepted)| match record.category(field) {
                Some(token) => accepted.contains(token),
                None => false,
            })
    }
}

/// Literal substring search over text fields and displayed categorical labels.
///
/// `needle` must already be lowercased.
pub fn matches_text(record: &Record, needle: &str, vocabulary: &Vocabulary) -> bool {
    if record
        .text
        .values()
        .any(|value| value.to_lowercase().contains(needle))
    {
        return true;
    }
    record.categories.iter().any(|(field, token)| {
        vocabulary
            .search_labels(field, token)
            .iter()
            .any(|label| label.contains(needle))
    })
}

/// One `field=V1,V2` selection as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub field: String,
    pub values: BTreeSet<String>,
}

impl FromStr for Selection {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ViewError::InvalidSelection {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (field, values) = s
            .split_once('=')
            .ok_or_else(|| invalid("expected field=VALUE[,VALUE...]"))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(invalid("field name is empty"));
        }

        let values = values
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Selection {
            field: field.to_string(),
            values,
        })
    }
}

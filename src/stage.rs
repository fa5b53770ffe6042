//! Pipeline stages.
//!
//! A view run is a short chain of stages over borrowed rows: search,
//! categorical selection, then ordering. Each stage takes the rows that
//! survived the previous one and returns the rows it keeps, in the order
//! it wants them. Records themselves are never touched.

use serde::Serialize;

use crate::category::Vocabulary;
use crate::criteria::{FilterCriteria, matches_text};
use crate::record::Record;

/// One step of the view pipeline.
pub trait Stage {
    /// Process the surviving rows, returning the rows to pass on.
    fn process<'r>(&self, rows: Vec<&'r Record>) -> Vec<&'r Record>;

    /// The display name of this stage.
    fn name(&self) -> &'static str;
}

/// SEARCH - keeps rows whose text or displayed categories contain the needle.
pub struct SearchStage<'v> {
    needle: Option<String>,
    vocabulary: &'v Vocabulary,
}

impl<'v> SearchStage<'v> {
    pub fn new(criteria: &FilterCriteria, vocabulary: &'v Vocabulary) -> Self {
        Self {
            needle: criteria.needle(),
            vocabulary,
        }
    }
}

impl Stage for SearchStage<'_> {
    fn process<'r>(&self, rows: Vec<&'r Record>) -> Vec<&'r Record> {
        match &self.needle {
            Some(needle) => rows
                .into_iter()
                .filter(|r| matches_text(r, needle, self.vocabulary))
                .collect(),
            None => rows,
        }
    }

    fn name(&self) -> &'static str {
        "SEARCH"
    }
}

/// SELECT - keeps rows whose categorical values are in every active selection.
pub struct SelectionStage<'c> {
    criteria: &'c FilterCriteria,
}

impl<'c> SelectionStage<'c> {
    pub fn new(criteria: &'c FilterCriteria) -> Self {
        Self { criteria }
    }
}

impl Stage for SelectionStage<'_> {
    fn process<'r>(&self, rows: Vec<&'r Record>) -> Vec<&'r Record> {
        if self.criteria.active_selections().next().is_none() {
            return rows;
        }
        rows.into_iter()
            .filter(|r| self.criteria.matches_selections(r))
            .collect()
    }

    fn name(&self) -> &'static str {
        "SELECT"
    }
}

/// SORT - most recent first; ties and undated rows keep their input order,
/// undated rows after all dated ones.
pub struct SortStage;

impl Stage for SortStage {
    fn process<'r>(&self, mut rows: Vec<&'r Record>) -> Vec<&'r Record> {
        // `None < Some`, so comparing b to a puts undated rows last.
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        rows
    }

    fn name(&self) -> &'static str {
        "SORT"
    }
}

/// Row counts observed around one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageTrace {
    pub stage_name: String,
    pub input_count: usize,
    pub output_count: usize,
}

/// Push rows through each stage in order.
pub fn run_stages<'r>(
    rows: Vec<&'r Record>,
    stages: &[Box<dyn Stage + '_>],
) -> Vec<&'r Record> {
    stages.iter().fold(rows, |current, stage| stage.process(current))
}

/// Push rows through each stage in order, recording counts per stage.
pub fn run_stages_traced<'r>(
    rows: Vec<&'r Record>,
    stages: &[Box<dyn Stage + '_>],
) -> (Vec<&'r Record>, Vec<StageTrace>) {
    let mut traces = Vec::with_capacity(stages.len());
    let mut current = rows;
    for stage in stages {
        let input_count = current.len();
        current = stage.process(current);
        traces.push(StageTrace {
            stage_name: stage.name().to_string(),
            input_count,
            output_count: current.len(),
        });
    }
    (current, traces)
}

//! The view pipeline: records + criteria + page request -> one page.
//!
//! Every call recomputes from scratch over the full record slice. There is
//! no cached state between calls, so the same inputs always give the same
//! page.
//!
//! ## Example
//!
//! ```
//! use history_view::{FilterCriteria, PageRequest, Record, ViewPipeline};
//!
//! let records = vec![
//!     Record::new("1").with_category("action", "CREATION"),
//!     Record::new("2").with_category("action", "SUPPRESSION"),
//!     Record::new("3").with_category("action", "MODIFICATION"),
//! ];
//! let criteria = FilterCriteria::new().with_selection("action", ["CREATION", "SUPPRESSION"]);
//!
//! let page = ViewPipeline::new().apply(&records, &criteria, &PageRequest::default());
//! assert_eq!(page.total_matching, 2);
//! assert_eq!(page.total_pages, 1);
//! ```

use crate::category::Vocabulary;
use crate::criteria::FilterCriteria;
use crate::page::{PageRequest, ViewPage};
use crate::record::Record;
use crate::stage::{
    SearchStage, SelectionStage, SortStage, Stage, StageTrace, run_stages, run_stages_traced,
};

/// Reduces a full record set to one displayable page.
#[derive(Debug, Clone)]
pub struct ViewPipeline {
    vocabulary: Vocabulary,
}

impl Default for ViewPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewPipeline {
    /// Pipeline using the standard action/entity/status vocabulary.
    pub fn new() -> Self {
        Self::with_vocabulary(Vocabulary::standard())
    }

    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn stages<'s>(&'s self, criteria: &'s FilterCriteria) -> Vec<Box<dyn Stage + 's>> {
        vec![
            Box::new(SearchStage::new(criteria, &self.vocabulary)),
            Box::new(SelectionStage::new(criteria)),
            Box::new(SortStage),
        ]
    }

    /// Search, select, sort by timestamp descending, then slice the page.
    pub fn apply<'r>(
        &self,
        records: &'r [Record],
        criteria: &FilterCriteria,
        request: &PageRequest,
    ) -> ViewPage<'r> {
        let rows = run_stages(records.iter().collect(), &self.stages(criteria));
        let page = ViewPage::slice(rows, request);
        tracing::debug!(
            records = records.len(),
            matching = page.total_matching,
            page = page.page_number,
            pages = page.total_pages,
            "view pipeline applied"
        );
        page
    }

    /// Same as [`apply`](Self::apply), also returning per-stage row counts.
    pub fn apply_traced<'r>(
        &self,
        records: &'r [Record],
        criteria: &FilterCriteria,
        request: &PageRequest,
    ) -> (ViewPage<'r>, Vec<StageTrace>) {
        let (rows, traces) = run_stages_traced(records.iter().collect(), &self.stages(criteria));
        for trace in &traces {
            tracing::debug!(
                stage = %trace.stage_name,
                input = trace.input_count,
                output = trace.output_count,
                "stage complete"
            );
        }
        (ViewPage::slice(rows, request), traces)
    }
}

/// Run the standard pipeline once.
pub fn apply<'r>(
    records: &'r [Record],
    criteria: &FilterCriteria,
    request: &PageRequest,
) -> ViewPage<'r> {
    ViewPipeline::new().apply(records, criteria, request)
}

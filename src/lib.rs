//! # history-view
//!
//! Search, filter and paginate pipeline for history and audit-log views.
//!
//! A history screen holds the full record set in memory and, on every
//! keystroke, chip toggle or page click, reduces it to the page it shows.
//! This crate is that reduction, kept pure so it can run unconditionally on
//! every state change.
//!
//! ## Overview
//!
//! - **Search**: case-insensitive literal substring over text fields and
//!   the human-readable labels of categorical values
//! - **Selection**: exact-match categorical filters, AND across fields; an
//!   empty selection accepts everything
//! - **Sort**: most recent first, stable
//! - **Paginate**: fixed page size, requested page clamped into range
//!
//! ## Example
//!
//! ```
//! use history_view::{FilterCriteria, PageRequest, Record, apply};
//!
//! let records = vec![
//!     Record::new("1")
//!         .at("2024-03-01T09:00:00Z".parse().unwrap())
//!         .with_category("action", "LOGIN")
//!         .with_text("message", "User attempted login"),
//!     Record::new("2")
//!         .at("2024-03-01T10:00:00Z".parse().unwrap())
//!         .with_category("action", "LOGOUT")
//!         .with_text("message", "User logged in elsewhere"),
//! ];
//!
//! let page = apply(&records, &FilterCriteria::new().search("login"), &PageRequest::default());
//!
//! assert_eq!(page.total_matching, 1);
//! assert_eq!(page.items[0].id, "1");
//! assert_eq!(page.caption(), "1–1 of 1");
//! ```

pub mod category;
pub mod config;
pub mod criteria;
pub mod error;
pub mod page;
pub mod pipeline;
pub mod record;
pub mod session;
pub mod source;
pub mod stage;
pub mod view;

pub use category::{
    ActionKind, Category, DisplayDescriptor, EntityKind, TaskStatus, Vocabulary, canonical_label,
};
pub use config::ViewConfig;
pub use criteria::{FilterCriteria, Selection};
pub use error::ViewError;
pub use page::{DEFAULT_PAGE_SIZE, PageRequest, ViewPage, page_window, total_pages};
pub use pipeline::{ViewPipeline, apply};
pub use record::Record;
pub use session::{Role, SessionContext, SessionUser};
pub use source::{JsonFileSource, RecordSource, StaticSource, parse_records};
pub use stage::{SearchStage, SelectionStage, SortStage, Stage, StageTrace};
pub use view::ViewState;

//! # Journal Core
//!
//! Core logic for the symptom journal.
//!
//! This crate contains pure data operations and file management:
//! - The journal model: a patient's append-only list of dated symptom entries
//! - Loading and writing the JSON journal document, with a timestamped archive copy per write
//! - The symptom catalog used to offer previously logged names
//! - Date-range reports: a text summary and per-symptom time series
//!
//! **No interactive concerns**: prompting, argument parsing and terminal output belong in the
//! `journal-cli` crate.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod model;
pub mod report;
pub mod store;

pub use catalog::distinct_symptoms;
pub use config::CoreConfig;
pub use document::JournalDocument;
pub use error::{JournalError, JournalResult};
pub use model::{Entry, Journal, SymptomObservation};
pub use report::{
    build_series, filter_and_sort, render_text, Report, ReportArtifacts, ReportService,
    SeriesLine, SeriesPoint, SymptomSeries,
};
pub use store::JournalStore;

// Re-export the validated primitives so callers need a single dependency.
pub use journal_types::{DateError, JournalDate, NonEmptyText, Severity, SeverityError, TextError};

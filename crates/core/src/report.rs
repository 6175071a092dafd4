//! Date-range reports over a journal.
//!
//! A report is built in three steps:
//!
//! 1. [`filter_and_sort`] picks the entries dated within an inclusive range and orders them by
//!    date. The sort is stable, so entries sharing a date keep their logged order.
//! 2. [`render_text`] turns those entries into a plain-text summary.
//! 3. [`build_series`] reshapes them into one `(date, severity)` line per symptom, ready for a
//!    charting tool.
//!
//! An empty range (including `start > end`) is a valid report with no entries.
//!
//! [`ReportService`] writes the results into the configured reports directory.

use crate::config::CoreConfig;
use crate::constants::{JSON_EXTENSION, REPORT_TEXT_EXTENSION, SERIES_FILE_SUFFIX};
use crate::model::{Entry, Journal};
use crate::{JournalError, JournalResult};
use journal_types::{JournalDate, NonEmptyText, Severity};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ============================================================================
// AGGREGATION
// ============================================================================

/// Entries of `journal` dated within `start..=end`, ascending by date.
pub fn filter_and_sort(journal: &Journal, start: JournalDate, end: JournalDate) -> Vec<&Entry> {
    filter_and_sort_entries(journal.entries(), start, end)
}

/// Same as [`filter_and_sort`] for an arbitrary sequence of entries.
pub fn filter_and_sort_entries<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
    start: JournalDate,
    end: JournalDate,
) -> Vec<&'a Entry> {
    if start > end {
        tracing::warn!("report range starts after it ends ({start} > {end}); no entries match");
    }

    let mut selected: Vec<&Entry> = entries
        .into_iter()
        .filter(|entry| entry.date() >= start && entry.date() <= end)
        .collect();
    selected.sort_by_key(|entry| entry.date());
    selected
}

/// Renders the text report for already filtered and sorted `entries`.
///
/// ```text
/// =====
/// Daily symptom journal for Jane Doe (01-01-2020 - 01-05-2020)
/// =====
///
/// --- 01-05-2020 ---
/// - headache: 5
///
///   Notes: felt worse
///
/// ```
///
/// The notes line only appears when notes are present and non-empty.
pub fn render_text(
    entries: &[&Entry],
    patient: &str,
    start: JournalDate,
    end: JournalDate,
) -> String {
    let mut text = format!(
        "=====\nDaily symptom journal for {patient} ({start} - {end})\n=====\n\n"
    );

    for entry in entries {
        text.push_str(&format!("--- {} ---\n", entry.date()));

        for symptom in entry.symptoms() {
            text.push_str(&format!("- {}: {}\n", symptom.name(), symptom.severity()));
        }

        if let Some(notes) = entry.notes().filter(|n| !n.is_empty()) {
            text.push_str(&format!("\n  Notes: {notes}\n"));
        }

        text.push('\n');
    }

    text
}

/// Groups the observations of `entries` into one series per symptom.
///
/// Series appear in the order their symptom is first met; points within a series follow the
/// order of `entries`.
pub fn build_series(entries: &[&Entry]) -> SymptomSeries {
    let mut series = SymptomSeries::default();
    for entry in entries {
        for symptom in entry.symptoms() {
            series.push(
                symptom.name(),
                SeriesPoint {
                    date: entry.date(),
                    severity: symptom.severity(),
                },
            );
        }
    }
    series
}

// ============================================================================
// SERIES
// ============================================================================

/// One observation on a symptom's chart line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub date: JournalDate,
    #[serde(rename = "value")]
    pub severity: Severity,
}

/// A symptom and its chart points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeriesLine {
    symptom: NonEmptyText,
    points: Vec<SeriesPoint>,
}

/// Insertion-ordered map from symptom name to its series.
///
/// Chart lines are drawn in this order, so it must not depend on hashing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymptomSeries {
    lines: Vec<SeriesLine>,
    index: HashMap<NonEmptyText, usize>,
}

impl SymptomSeries {
    fn push(&mut self, symptom: &NonEmptyText, point: SeriesPoint) {
        match self.index.get(symptom) {
            Some(&i) => self.lines[i].points.push(point),
            None => {
                self.index.insert(symptom.clone(), self.lines.len());
                self.lines.push(SeriesLine {
                    symptom: symptom.clone(),
                    points: vec![point],
                });
            }
        }
    }

    /// Points recorded for `symptom`, if any.
    pub fn get(&self, symptom: &str) -> Option<&[SeriesPoint]> {
        self.lines
            .iter()
            .find(|line| line.symptom.as_str() == symptom)
            .map(|line| line.points.as_slice())
    }

    /// Symptom names in first-seen order.
    pub fn symptom_names(&self) -> impl Iterator<Item = &NonEmptyText> {
        self.lines.iter().map(|line| &line.symptom)
    }

    /// Number of symptoms.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of points across all symptoms.
    pub fn total_points(&self) -> usize {
        self.lines.iter().map(|line| line.points.len()).sum()
    }
}

impl Serialize for SymptomSeries {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(&self.lines)
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// A generated report for one patient and date range.
#[derive(Clone, Debug)]
pub struct Report {
    start: JournalDate,
    end: JournalDate,
    entry_count: usize,
    text: String,
    series: SymptomSeries,
}

impl Report {
    /// Aggregates `journal` over `start..=end`.
    pub fn generate(journal: &Journal, start: JournalDate, end: JournalDate) -> Self {
        let entries = filter_and_sort(journal, start, end);
        let text = render_text(&entries, journal.patient(), start, end);
        let series = build_series(&entries);

        tracing::debug!(
            entries = entries.len(),
            symptoms = series.len(),
            "generated report for {start} - {end}"
        );

        Self {
            start,
            end,
            entry_count: entries.len(),
            text,
            series,
        }
    }

    /// File stem shared by the report's artifacts: `<start>_<end>`.
    pub fn name(&self) -> String {
        format!("{}_{}", self.start, self.end)
    }

    pub fn start(&self) -> JournalDate {
        self.start
    }

    pub fn end(&self) -> JournalDate {
        self.end
    }

    /// Number of entries inside the range.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn series(&self) -> &SymptomSeries {
        &self.series
    }
}

/// Paths written by [`ReportService::write`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportArtifacts {
    pub text_path: PathBuf,
    pub series_path: Option<PathBuf>,
}

/// Writes reports into the configured reports directory.
#[derive(Clone, Debug)]
pub struct ReportService {
    cfg: Arc<CoreConfig>,
}

impl ReportService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Writes `<name>.txt` and, when `include_series` is set, `<name>_series.json`.
    ///
    /// The reports directory is created if missing. Existing artifacts with the same name are
    /// overwritten.
    ///
    /// # Errors
    ///
    /// - [`JournalError::ReportDirCreation`] if the reports directory cannot be created
    /// - [`JournalError::ReportWrite`] if a file cannot be written
    /// - [`JournalError::Serialisation`] if the series cannot be rendered
    pub fn write(&self, report: &Report, include_series: bool) -> JournalResult<ReportArtifacts> {
        write_report(report, self.cfg.reports_dir(), include_series)
    }
}

fn write_report(
    report: &Report,
    reports_dir: &Path,
    include_series: bool,
) -> JournalResult<ReportArtifacts> {
    fs::create_dir_all(reports_dir).map_err(JournalError::ReportDirCreation)?;

    let name = report.name();
    let text_path = reports_dir.join(format!("{name}.{REPORT_TEXT_EXTENSION}"));
    fs::write(&text_path, report.text()).map_err(JournalError::ReportWrite)?;
    tracing::info!("wrote report text to {}", text_path.display());

    let series_path = if include_series {
        let path = reports_dir.join(format!("{name}{SERIES_FILE_SUFFIX}.{JSON_EXTENSION}"));
        let json =
            serde_json::to_vec_pretty(report.series()).map_err(JournalError::Serialisation)?;
        fs::write(&path, json).map_err(JournalError::ReportWrite)?;
        tracing::info!("wrote report series to {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(ReportArtifacts {
        text_path,
        series_path,
    })
}

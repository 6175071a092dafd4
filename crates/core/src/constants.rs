//! Constants used throughout the journal core crate.
//!
//! Default locations and on-disk naming live here so the store, the report writer and the
//! command line agree on them.

/// Default path of the journal document when none is configured.
pub const DEFAULT_JOURNAL_PATH: &str = "journal.json";

/// Default directory receiving timestamped journal copies.
pub const DEFAULT_ARCHIVE_DIR: &str = "journal_archive";

/// Default directory receiving report artifacts.
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Default number of symptoms offered per logging session.
pub const DEFAULT_DAILY_SYMPTOM_LIMIT: usize = 5;

/// Default report window, in days before the end date.
pub const DEFAULT_REPORT_WINDOW_DAYS: u64 = 30;

/// Prefix of every archive file name.
pub const ARCHIVE_FILE_PREFIX: &str = "archive_";

/// Timestamp pattern embedded in archive file names.
///
/// ISO 8601 with `-` in place of `:` so the name is valid on every filesystem.
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.6f";

/// Extension of journal documents and their archives.
pub const JSON_EXTENSION: &str = "json";

/// Suffix added to the report name for the exported series file.
pub const SERIES_FILE_SUFFIX: &str = "_series";

/// Extension of text reports.
pub const REPORT_TEXT_EXTENSION: &str = "txt";

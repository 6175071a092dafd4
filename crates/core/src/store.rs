//! Journal persistence.
//!
//! This module loads, appends to and writes the journal document. Every successful write is
//! followed by an archival copy:
//!
//! ```text
//! journal.json                                   # primary document, overwritten per session
//! journal_archive/
//!   archive_2020-01-05T21-14-03.512204.json      # copy of journal.json after each write
//!   archive_2020-01-06T08-02-47.100931.json
//! ```
//!
//! The archive copy is taken from the primary file on disk, so an archive only ever exists for a
//! primary write that succeeded. Archives are additive and never read back.
//!
//! ## Single writer
//!
//! There is no locking. One process at a time is expected to touch a journal.

use crate::config::CoreConfig;
use crate::constants::{ARCHIVE_FILE_PREFIX, ARCHIVE_TIMESTAMP_FORMAT, JSON_EXTENSION};
use crate::document::JournalDocument;
use crate::model::{Entry, Journal};
use crate::{JournalError, JournalResult};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Service for reading and writing the configured journal.
#[derive(Clone, Debug)]
pub struct JournalStore {
    cfg: Arc<CoreConfig>,
}

impl JournalStore {
    /// Creates a store bound to the journal and archive locations in `cfg`.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Loads the configured journal, or `None` if no document exists yet.
    ///
    /// See [`load_from`].
    pub fn load(&self) -> JournalResult<Option<Journal>> {
        load_from(self.cfg.journal_path())
    }

    /// Loads the configured journal, treating a missing document as an error.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::JournalNotFound`] if no document exists, otherwise as
    /// [`load_from`].
    pub fn load_existing(&self) -> JournalResult<Journal> {
        let path = self.cfg.journal_path();
        load_from(path)?.ok_or_else(|| JournalError::JournalNotFound(path.to_path_buf()))
    }

    /// Returns `journal` with `entry` appended.
    ///
    /// The journal is taken by value, so a caller holding the previous value never observes the
    /// new entry.
    pub fn append(journal: Journal, entry: Entry) -> Journal {
        tracing::debug!(
            date = %entry.date(),
            symptoms = entry.symptoms().len(),
            "appending journal entry"
        );
        journal.with_entry(entry)
    }

    /// Writes `journal` to the configured path and archives the result.
    ///
    /// Returns the path of the archive copy. See [`persist_to`].
    pub fn persist(&self, journal: &Journal) -> JournalResult<PathBuf> {
        persist_to(journal, self.cfg.journal_path(), self.cfg.archive_dir())
    }
}

/// Loads the journal at `path`.
///
/// A missing file is not an error: it yields `Ok(None)` and the caller decides whether to start
/// a new journal with [`Journal::create_empty`].
///
/// # Errors
///
/// - [`JournalError::FileRead`] if the file exists but cannot be read
/// - [`JournalError::MalformedJournal`] if the file is not a valid journal document, including
///   content that is not UTF-8
pub fn load_from(path: &Path) -> JournalResult<Option<Journal>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("no journal at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(JournalError::FileRead(e)),
    };

    let journal = JournalDocument::parse(&bytes, path)?;
    tracing::debug!(
        entries = journal.entry_count(),
        "loaded journal from {}",
        path.display()
    );
    Ok(Some(journal))
}

/// Writes `journal` to `path`, then copies the written file into `archive_dir`.
///
/// `archive_dir` is created if missing. The copy is named
/// `archive_<local timestamp>.json`; see [`ARCHIVE_TIMESTAMP_FORMAT`].
///
/// # Errors
///
/// - [`JournalError::Serialisation`] if the journal cannot be rendered
/// - [`JournalError::FileWrite`] if the primary write fails; nothing is archived in that case
/// - [`JournalError::ArchiveDirCreation`] if the archive directory cannot be created
/// - [`JournalError::ArchiveCopy`] if the copy fails
pub fn persist_to(journal: &Journal, path: &Path, archive_dir: &Path) -> JournalResult<PathBuf> {
    persist_at(journal, path, archive_dir, Local::now())
}

pub(crate) fn persist_at(
    journal: &Journal,
    path: &Path,
    archive_dir: &Path,
    now: DateTime<Local>,
) -> JournalResult<PathBuf> {
    let bytes = JournalDocument::render(journal)?;
    fs::write(path, bytes).map_err(JournalError::FileWrite)?;
    tracing::info!(
        entries = journal.entry_count(),
        "wrote journal to {}",
        path.display()
    );

    fs::create_dir_all(archive_dir).map_err(JournalError::ArchiveDirCreation)?;
    let archive_path = archive_file(path, archive_dir, now)?;
    tracing::info!("archived journal to {}", archive_path.display());

    Ok(archive_path)
}

/// Copies `source` into a fresh archive file named after `now`.
///
/// Two writes within the same microsecond would share a name; a numeric suffix keeps the earlier
/// archive intact. The target is created with `create_new`, so an existing archive is never
/// overwritten.
fn archive_file(source: &Path, archive_dir: &Path, now: DateTime<Local>) -> JournalResult<PathBuf> {
    let stamp = now.format(ARCHIVE_TIMESTAMP_FORMAT).to_string();
    let mut reader = fs::File::open(source).map_err(JournalError::ArchiveCopy)?;

    for attempt in 0..5 {
        let file_name = if attempt == 0 {
            format!("{ARCHIVE_FILE_PREFIX}{stamp}.{JSON_EXTENSION}")
        } else {
            format!("{ARCHIVE_FILE_PREFIX}{stamp}_{attempt}.{JSON_EXTENSION}")
        };
        let candidate = archive_dir.join(file_name);

        let mut target = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(JournalError::ArchiveCopy(e)),
        };

        io::copy(&mut reader, &mut target).map_err(JournalError::ArchiveCopy)?;
        return Ok(candidate);
    }

    Err(JournalError::ArchiveCopy(io::Error::new(
        ErrorKind::AlreadyExists,
        "failed to allocate a unique archive file name after 5 attempts",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::distinct_symptoms;
    use crate::model::SymptomObservation;
    use chrono::TimeZone;
    use journal_types::JournalDate;
    use tempfile::TempDir;

    fn entry(date: &str, symptoms: &[(&str, i64)], notes: Option<&str>) -> Entry {
        Entry::new(
            JournalDate::parse(date).unwrap(),
            symptoms
                .iter()
                .map(|(name, value)| SymptomObservation::new(name, *value).unwrap())
                .collect(),
            notes.map(str::to_owned),
        )
        .unwrap()
    }

    fn test_cfg(dir: &Path) -> Arc<CoreConfig> {
        Arc::new(
            CoreConfig::new(
                dir.join("journal.json"),
                dir.join("archive"),
                dir.join("reports"),
                5,
            )
            .expect("CoreConfig::new should succeed"),
        )
    }

    fn archive_files(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .map(|it| it.flatten().map(|e| e.path()).collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    #[test]
    fn load_missing_journal_returns_none() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JournalStore::new(test_cfg(temp_dir.path()));

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn load_existing_reports_missing_journal() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JournalStore::new(test_cfg(temp_dir.path()));

        let err = store.load_existing().unwrap_err();
        assert!(matches!(err, JournalError::JournalNotFound(_)));
    }

    #[test]
    fn load_corrupt_journal_is_an_error_not_a_fresh_start() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        fs::write(cfg.journal_path(), "{ truncated").unwrap();

        let err = JournalStore::new(cfg.clone()).load().unwrap_err();
        assert!(matches!(err, JournalError::MalformedJournal { .. }));

        // The corrupt file is left untouched for the user to inspect.
        assert_eq!(
            fs::read_to_string(cfg.journal_path()).unwrap(),
            "{ truncated"
        );
    }

    #[test]
    fn load_non_utf8_journal_is_malformed() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        fs::write(cfg.journal_path(), [0xff, 0xfe, b'{']).unwrap();

        let err = JournalStore::new(cfg.clone()).load().unwrap_err();
        assert!(
            matches!(err, JournalError::MalformedJournal { .. }),
            "unexpected error: {err:?}"
        );
        assert_eq!(fs::read(cfg.journal_path()).unwrap(), vec![0xff, 0xfe, b'{']);
    }

    #[test]
    fn persist_then_load_round_trips() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JournalStore::new(test_cfg(temp_dir.path()));

        let journal = Journal::create_empty("Jane Doe").unwrap();
        let journal = JournalStore::append(journal, entry("01-01-2020", &[("headache", 3)], Some("")));
        let journal = JournalStore::append(
            journal,
            entry("01-05-2020", &[("headache", 5), ("nausea", 2)], Some("felt worse")),
        );
        let journal = JournalStore::append(journal, entry("12-31-2019", &[], None));

        store.persist(&journal).expect("persist should succeed");
        let loaded = store.load().unwrap().expect("journal should exist");

        assert_eq!(loaded, journal);
    }

    #[test]
    fn persist_creates_archive_matching_primary() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let store = JournalStore::new(cfg.clone());
        assert!(!cfg.archive_dir().exists());

        let journal = JournalStore::append(
            Journal::create_empty("Jane Doe").unwrap(),
            entry("01-01-2020", &[("headache", 3)], Some("")),
        );
        let archive_path = store.persist(&journal).unwrap();

        assert!(cfg.archive_dir().is_dir(), "archive dir should be created");
        assert_eq!(archive_files(cfg.archive_dir()), vec![archive_path.clone()]);

        let file_name = archive_path.file_name().unwrap().to_str().unwrap();
        assert!(file_name.starts_with(ARCHIVE_FILE_PREFIX));
        assert!(file_name.ends_with(".json"));

        assert_eq!(
            fs::read(cfg.journal_path()).unwrap(),
            fs::read(&archive_path).unwrap()
        );
    }

    #[test]
    fn persist_at_names_archive_after_timestamp() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let journal = Journal::create_empty("Jane Doe").unwrap();
        let now = Local.with_ymd_and_hms(2020, 1, 5, 21, 14, 3).unwrap();

        let first = persist_at(&journal, cfg.journal_path(), cfg.archive_dir(), now).unwrap();
        let second = persist_at(&journal, cfg.journal_path(), cfg.archive_dir(), now).unwrap();

        assert_eq!(
            first.file_name().unwrap(),
            "archive_2020-01-05T21-14-03.000000.json"
        );
        assert_eq!(
            second.file_name().unwrap(),
            "archive_2020-01-05T21-14-03.000000_1.json"
        );
        assert_eq!(archive_files(cfg.archive_dir()).len(), 2);
    }

    #[test]
    fn archive_never_overwrites_existing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let now = Local.with_ymd_and_hms(2020, 1, 5, 21, 14, 3).unwrap();

        fs::create_dir_all(cfg.archive_dir()).unwrap();
        let taken = cfg
            .archive_dir()
            .join("archive_2020-01-05T21-14-03.000000.json");
        fs::write(&taken, "earlier archive").unwrap();

        let journal = Journal::create_empty("Jane Doe").unwrap();
        let archive_path =
            persist_at(&journal, cfg.journal_path(), cfg.archive_dir(), now).unwrap();

        assert_eq!(
            archive_path.file_name().unwrap(),
            "archive_2020-01-05T21-14-03.000000_1.json"
        );
        assert_eq!(fs::read_to_string(&taken).unwrap(), "earlier archive");
        assert_eq!(
            fs::read(cfg.journal_path()).unwrap(),
            fs::read(&archive_path).unwrap()
        );
    }

    #[test]
    fn archive_gives_up_after_five_names() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let journal = Journal::create_empty("Jane Doe").unwrap();
        let now = Local.with_ymd_and_hms(2020, 1, 5, 21, 14, 3).unwrap();

        for _ in 0..5 {
            persist_at(&journal, cfg.journal_path(), cfg.archive_dir(), now).unwrap();
        }
        let err = persist_at(&journal, cfg.journal_path(), cfg.archive_dir(), now).unwrap_err();

        match err {
            JournalError::ArchiveCopy(e) => assert_eq!(e.kind(), ErrorKind::AlreadyExists),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(archive_files(cfg.archive_dir()).len(), 5);
    }

    #[test]
    fn failed_primary_write_skips_archive() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let journal_path = temp_dir.path().join("missing_dir").join("journal.json");
        let archive_dir = temp_dir.path().join("archive");

        let journal = Journal::create_empty("Jane Doe").unwrap();
        let err = persist_to(&journal, &journal_path, &archive_dir).unwrap_err();

        assert!(matches!(err, JournalError::FileWrite(_)));
        assert!(!archive_dir.exists(), "no archive should be attempted");
    }

    #[test]
    fn archive_dir_blocked_by_file_is_reported() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let journal_path = temp_dir.path().join("journal.json");
        let archive_dir = temp_dir.path().join("archive");
        fs::write(&archive_dir, "not a directory").unwrap();

        let journal = Journal::create_empty("Jane Doe").unwrap();
        let err = persist_to(&journal, &journal_path, &archive_dir).unwrap_err();

        assert!(matches!(err, JournalError::ArchiveDirCreation(_)));
        assert!(journal_path.is_file(), "primary write happens first");
    }

    #[test]
    fn catalog_survives_persist_and_reload() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JournalStore::new(test_cfg(temp_dir.path()));

        let journal = JournalStore::append(
            Journal::create_empty("Jane Doe").unwrap(),
            entry("01-01-2020", &[("nausea", 1), ("headache", 3)], None),
        );
        store.persist(&journal).unwrap();

        let reloaded = store.load().unwrap().unwrap();
        let catalog = distinct_symptoms(&reloaded);
        let names: Vec<&str> = catalog.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["nausea", "headache"]);
    }
}

//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Environment variables are read by the binary only; the helpers here
//! take the raw values as `Option<String>` so they stay testable without touching process state.

use crate::constants::{
    DEFAULT_ARCHIVE_DIR, DEFAULT_DAILY_SYMPTOM_LIMIT, DEFAULT_JOURNAL_PATH, DEFAULT_REPORTS_DIR,
};
use crate::{JournalError, JournalResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    journal_path: PathBuf,
    archive_dir: PathBuf,
    reports_dir: PathBuf,
    daily_symptom_limit: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::InvalidInput`] if the journal path is empty or the daily symptom
    /// limit is zero.
    pub fn new(
        journal_path: PathBuf,
        archive_dir: PathBuf,
        reports_dir: PathBuf,
        daily_symptom_limit: usize,
    ) -> JournalResult<Self> {
        if journal_path.as_os_str().is_empty() {
            return Err(JournalError::InvalidInput(
                "journal path cannot be empty".into(),
            ));
        }

        if daily_symptom_limit == 0 {
            return Err(JournalError::InvalidInput(
                "daily symptom limit must be at least 1".into(),
            ));
        }

        Ok(Self {
            journal_path,
            archive_dir,
            reports_dir,
            daily_symptom_limit,
        })
    }

    pub fn journal_path(&self) -> &Path {
        &self.journal_path
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn daily_symptom_limit(&self) -> usize {
        self.daily_symptom_limit
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            journal_path: PathBuf::from(DEFAULT_JOURNAL_PATH),
            archive_dir: PathBuf::from(DEFAULT_ARCHIVE_DIR),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            daily_symptom_limit: DEFAULT_DAILY_SYMPTOM_LIMIT,
        }
    }
}

/// Resolve a path setting from an optional raw value.
///
/// `None`, empty and whitespace-only values fall back to `default`.
pub fn path_from_env_value(value: Option<String>, default: &str) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Parse the daily symptom limit from an optional raw value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DAILY_SYMPTOM_LIMIT`].
pub fn daily_symptom_limit_from_env_value(value: Option<String>) -> JournalResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let parsed = value
        .map(|v| {
            v.parse::<usize>().map_err(|_| {
                JournalError::InvalidInput(format!(
                    "daily symptom limit must be a positive integer, got '{v}'"
                ))
            })
        })
        .transpose()?;

    Ok(parsed.unwrap_or(DEFAULT_DAILY_SYMPTOM_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_symptom_limit() {
        let result = CoreConfig::new(
            PathBuf::from("journal.json"),
            PathBuf::from("archive"),
            PathBuf::from("reports"),
            0,
        );
        assert!(matches!(result, Err(JournalError::InvalidInput(_))));
    }

    #[test]
    fn new_rejects_empty_journal_path() {
        let result = CoreConfig::new(
            PathBuf::new(),
            PathBuf::from("archive"),
            PathBuf::from("reports"),
            3,
        );
        assert!(matches!(result, Err(JournalError::InvalidInput(_))));
    }

    #[test]
    fn defaults_match_constants() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.journal_path(), Path::new(DEFAULT_JOURNAL_PATH));
        assert_eq!(cfg.archive_dir(), Path::new(DEFAULT_ARCHIVE_DIR));
        assert_eq!(cfg.reports_dir(), Path::new(DEFAULT_REPORTS_DIR));
        assert_eq!(cfg.daily_symptom_limit(), DEFAULT_DAILY_SYMPTOM_LIMIT);
    }

    #[test]
    fn path_from_env_value_falls_back_on_blank() {
        assert_eq!(
            path_from_env_value(None, "journal.json"),
            PathBuf::from("journal.json")
        );
        assert_eq!(
            path_from_env_value(Some("   ".into()), "journal.json"),
            PathBuf::from("journal.json")
        );
        assert_eq!(
            path_from_env_value(Some(" /data/mine.json ".into()), "journal.json"),
            PathBuf::from("/data/mine.json")
        );
    }

    #[test]
    fn daily_symptom_limit_parses_or_defaults() {
        assert_eq!(
            daily_symptom_limit_from_env_value(None).unwrap(),
            DEFAULT_DAILY_SYMPTOM_LIMIT
        );
        assert_eq!(
            daily_symptom_limit_from_env_value(Some("8".into())).unwrap(),
            8
        );
        assert!(matches!(
            daily_symptom_limit_from_env_value(Some("many".into())),
            Err(JournalError::InvalidInput(_))
        ));
    }
}

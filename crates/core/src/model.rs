//! Journal domain model.
//!
//! A [`Journal`] belongs to one patient and holds an append-only sequence of [`Entry`] values in
//! the order they were logged. Entries are not kept sorted by date: a back-dated entry lands at
//! the end like any other. Sorting is the report's job.
//!
//! Construction goes through validating constructors, so an out-of-range severity or an empty
//! symptom name can never reach a journal. Names are kept exactly as given.

use crate::{JournalError, JournalResult};
use journal_types::{JournalDate, NonEmptyText, Severity};

/// A named symptom and its severity within one entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymptomObservation {
    name: NonEmptyText,
    severity: Severity,
}

impl SymptomObservation {
    /// Validates and builds an observation from raw input.
    ///
    /// # Errors
    ///
    /// - [`JournalError::InvalidInput`] if `name` is empty
    /// - [`JournalError::InvalidSeverity`] if `severity` is outside `0..=10`
    pub fn new(name: &str, severity: i64) -> JournalResult<Self> {
        let name = NonEmptyText::new(name)
            .map_err(|_| JournalError::InvalidInput("symptom name cannot be empty".into()))?;
        let severity = Severity::new(severity)?;
        Ok(Self { name, severity })
    }

    /// Builds an observation from already-validated parts.
    pub fn from_parts(name: NonEmptyText, severity: Severity) -> Self {
        Self { name, severity }
    }

    pub fn name(&self) -> &NonEmptyText {
        &self.name
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// One logging session's observations for a single date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    date: JournalDate,
    symptoms: Vec<SymptomObservation>,
    notes: Option<String>,
}

impl Entry {
    /// Builds an entry.
    ///
    /// `notes` of `Some("")` is kept as-is and is distinct from `None`.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::InvalidInput`] if `notes` spans more than one line.
    pub fn new(
        date: JournalDate,
        symptoms: Vec<SymptomObservation>,
        notes: Option<String>,
    ) -> JournalResult<Self> {
        if let Some(text) = notes.as_deref() {
            if text.contains(|c: char| c == '\n' || c == '\r') {
                return Err(JournalError::InvalidInput(
                    "notes must be a single line".into(),
                ));
            }
        }

        Ok(Self {
            date,
            symptoms,
            notes,
        })
    }

    pub fn date(&self) -> JournalDate {
        self.date
    }

    pub fn symptoms(&self) -> &[SymptomObservation] {
        &self.symptoms
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// A patient's symptom journal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Journal {
    patient: String,
    entries: Vec<Entry>,
}

impl Journal {
    /// Starts a new journal with no entries.
    ///
    /// A new journal needs a name; documents loaded from disk keep whatever patient string they
    /// hold, blank included.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::InvalidInput`] if `patient` is blank.
    pub fn create_empty(patient: &str) -> JournalResult<Self> {
        if patient.trim().is_empty() {
            return Err(JournalError::InvalidInput(
                "patient name cannot be empty".into(),
            ));
        }
        Ok(Self {
            patient: patient.to_owned(),
            entries: Vec::new(),
        })
    }

    pub(crate) fn from_parts(patient: String, entries: Vec<Entry>) -> Self {
        Self { patient, entries }
    }

    pub fn patient(&self) -> &str {
        &self.patient
    }

    /// Entries in append order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Consumes the journal and returns it with `entry` appended.
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> JournalDate {
        JournalDate::parse(s).unwrap()
    }

    #[test]
    fn observation_rejects_out_of_range_severity() {
        let err = SymptomObservation::new("headache", 11).unwrap_err();
        assert!(matches!(err, JournalError::InvalidSeverity(_)));

        let err = SymptomObservation::new("headache", -1).unwrap_err();
        assert!(matches!(err, JournalError::InvalidSeverity(_)));
    }

    #[test]
    fn observation_rejects_empty_name() {
        let err = SymptomObservation::new("", 3).unwrap_err();
        assert!(matches!(err, JournalError::InvalidInput(_)));

        let padded = SymptomObservation::new(" headache", 3).unwrap();
        assert_eq!(padded.name().as_str(), " headache");
    }

    #[test]
    fn entry_keeps_empty_notes_distinct_from_absent() {
        let with_empty = Entry::new(date("01-01-2020"), vec![], Some(String::new())).unwrap();
        let without = Entry::new(date("01-01-2020"), vec![], None).unwrap();

        assert_eq!(with_empty.notes(), Some(""));
        assert_eq!(without.notes(), None);
        assert_ne!(with_empty, without);
    }

    #[test]
    fn entry_rejects_multi_line_notes() {
        let err = Entry::new(date("01-01-2020"), vec![], Some("one\ntwo".into())).unwrap_err();
        assert!(matches!(err, JournalError::InvalidInput(_)));
    }

    #[test]
    fn create_empty_requires_patient_name() {
        assert!(matches!(
            Journal::create_empty(" "),
            Err(JournalError::InvalidInput(_))
        ));

        let journal = Journal::create_empty("Jane Doe").unwrap();
        assert_eq!(journal.patient(), "Jane Doe");
        assert_eq!(journal.entry_count(), 0);
    }

    #[test]
    fn with_entry_appends_without_reordering() {
        let later = Entry::new(date("03-01-2020"), vec![], None).unwrap();
        let earlier = Entry::new(date("01-01-2020"), vec![], None).unwrap();

        let journal = Journal::create_empty("Jane Doe")
            .unwrap()
            .with_entry(later.clone())
            .with_entry(earlier.clone());

        assert_eq!(journal.entries(), &[later, earlier]);
    }
}

//! On-disk journal document.
//!
//! The journal is stored as a single JSON document:
//!
//! ```text
//! {
//!     "journal": [
//!         {
//!             "date": "01-05-2020",
//!             "notes": "felt worse",
//!             "symptoms": [
//!                 { "name": "headache", "value": 5 }
//!             ]
//!         }
//!     ],
//!     "patient": "Jane Doe"
//! }
//! ```
//!
//! Responsibilities:
//! - Define the wire model exactly as it appears on disk
//! - Translate between the wire model and the validated domain model
//! - Render deterministically: keys in sorted order, four-space indentation
//!
//! Notes:
//! - Field names and the `MM-DD-YYYY` date layout are a compatibility surface with existing files
//! - A missing `notes` key loads as absent and stays absent on write
//! - Strings are loaded verbatim: a blank patient or a padded symptom name is written back as-is

use crate::model::{Entry, Journal, SymptomObservation};
use crate::{JournalError, JournalResult};
use journal_types::{JournalDate, NonEmptyText, Severity};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Journal document operations.
///
/// Zero-sized namespace for parsing and rendering; all methods are associated functions.
pub struct JournalDocument;

impl JournalDocument {
    /// Parse a journal document from JSON bytes.
    ///
    /// Uses `serde_path_to_error` so a schema mismatch names the failing field
    /// (e.g. `journal[2].symptoms[0].value`).
    ///
    /// # Arguments
    ///
    /// * `json` - UTF-8 JSON expected to represent a journal document.
    /// * `source` - Where the text came from; only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::MalformedJournal`] if:
    /// - the bytes are not UTF-8 JSON or a field is missing or has the wrong type,
    /// - a symptom name is empty,
    /// - a date is not `MM-DD-YYYY`,
    /// - a severity is outside `0..=10`,
    /// - notes span more than one line.
    pub fn parse(json: impl AsRef<[u8]>, source: &Path) -> JournalResult<Journal> {
        let mut deserializer = serde_json::Deserializer::from_slice(json.as_ref());

        let wire = match serde_path_to_error::deserialize::<_, JournalWire>(&mut deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let inner = err.into_inner();
                return Err(schema_mismatch(source, &path, inner));
            }
        };
        deserializer
            .end()
            .map_err(|e| schema_mismatch(source, "", e))?;

        wire_to_domain(wire, source)
    }

    /// Render a journal as JSON bytes.
    ///
    /// Output is deterministic for a given journal.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Serialisation`] if serialisation fails.
    pub fn render(journal: &Journal) -> JournalResult<Vec<u8>> {
        let wire = domain_to_wire(journal);

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        wire.serialize(&mut serializer)
            .map_err(JournalError::Serialisation)?;

        Ok(buf)
    }
}

fn schema_mismatch(source: &Path, field: &str, reason: impl std::fmt::Display) -> JournalError {
    let field = if field.is_empty() || field == "." {
        "<root>"
    } else {
        field
    };
    JournalError::MalformedJournal {
        path: source.to_path_buf(),
        reason: format!("schema mismatch at {field}: {reason}"),
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

// Field order is the on-disk key order: keep each struct's fields sorted by wire name.

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
struct JournalWire {
    journal: Vec<EntryWire>,
    patient: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
struct EntryWire {
    date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,

    symptoms: Vec<SymptomWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
struct SymptomWire {
    name: String,
    value: i64,
}

// ============================================================================
// Translation
// ============================================================================

fn wire_to_domain(wire: JournalWire, source: &Path) -> JournalResult<Journal> {
    let mut entries = Vec::with_capacity(wire.journal.len());
    for (i, entry) in wire.journal.into_iter().enumerate() {
        let date = JournalDate::parse(&entry.date)
            .map_err(|e| schema_mismatch(source, &format!("journal[{i}].date"), e))?;

        let mut symptoms = Vec::with_capacity(entry.symptoms.len());
        for (j, symptom) in entry.symptoms.into_iter().enumerate() {
            let name = NonEmptyText::new(&symptom.name).map_err(|e| {
                schema_mismatch(source, &format!("journal[{i}].symptoms[{j}].name"), e)
            })?;
            let severity = Severity::new(symptom.value).map_err(|e| {
                schema_mismatch(source, &format!("journal[{i}].symptoms[{j}].value"), e)
            })?;
            symptoms.push(SymptomObservation::from_parts(name, severity));
        }

        let entry = Entry::new(date, symptoms, entry.notes)
            .map_err(|e| schema_mismatch(source, &format!("journal[{i}].notes"), e))?;
        entries.push(entry);
    }

    Ok(Journal::from_parts(wire.patient, entries))
}

fn domain_to_wire(journal: &Journal) -> JournalWire {
    JournalWire {
        journal: journal
            .entries()
            .iter()
            .map(|entry| EntryWire {
                date: entry.date().to_string(),
                notes: entry.notes().map(str::to_owned),
                symptoms: entry
                    .symptoms()
                    .iter()
                    .map(|symptom| SymptomWire {
                        name: symptom.name().to_string(),
                        value: i64::from(symptom.severity().value()),
                    })
                    .collect(),
            })
            .collect(),
        patient: journal.patient().to_owned(),
    }
}

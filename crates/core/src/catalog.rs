//! Symptom catalog derived from journal history.

use crate::model::Journal;
use journal_types::NonEmptyText;
use std::collections::HashSet;

/// Returns every symptom name in `journal`, each once, in first-seen order.
///
/// Entries are scanned in append order and each entry's symptoms in logged order. Names are
/// compared case-sensitively.
pub fn distinct_symptoms(journal: &Journal) -> Vec<NonEmptyText> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut names = Vec::new();

    for entry in journal.entries() {
        for symptom in entry.symptoms() {
            if seen.insert(symptom.name().as_str()) {
                names.push(symptom.name().clone());
            }
        }
    }

    names
}

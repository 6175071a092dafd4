//! Interactive logging session.
//!
//! One session appends exactly one entry: it loads (or starts) the journal, asks for a date, up
//! to the configured number of symptoms with their severities, and optional notes, then persists
//! the journal with an archive copy.
//!
//! Nothing is written unless the whole session completes.

use crate::prompt::Prompter;
use anyhow::Context;
use journal_core::{
    distinct_symptoms, Entry, Journal, JournalDate, JournalStore, NonEmptyText, Severity,
    SymptomObservation,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Result of a completed session.
#[derive(Debug)]
pub struct LoggedEntry {
    /// 1-based position of the new entry in the journal.
    pub entry_number: usize,
    pub archive_path: PathBuf,
}

/// An answer to the symptom menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymptomChoice {
    /// Index into the remaining catalog options.
    Existing(usize),
    New,
    Done,
}

/// Menu numbering: `1..=n` are existing names, then "new", then "done".
fn parse_choice(answer: &str, existing: usize) -> Result<SymptomChoice, String> {
    let option: usize = answer
        .trim()
        .parse()
        .map_err(|_| "Invalid option!".to_string())?;

    match option {
        n if n >= 1 && n <= existing => Ok(SymptomChoice::Existing(n - 1)),
        n if n == existing + 1 => Ok(SymptomChoice::New),
        n if n == existing + 2 => Ok(SymptomChoice::Done),
        _ => Err("Invalid option!".to_string()),
    }
}

fn parse_severity(answer: &str) -> Result<Severity, String> {
    let value: i64 = answer
        .trim()
        .parse()
        .map_err(|_| "Invalid symptom severity!".to_string())?;
    Severity::new(value).map_err(|_| "Invalid symptom severity!".to_string())
}

fn parse_date(answer: &str, today: JournalDate) -> Result<JournalDate, String> {
    if answer.trim().is_empty() {
        return Ok(today);
    }
    JournalDate::parse(answer).map_err(|e| format!("{e}."))
}

/// Runs one logging session against `store`.
///
/// `limit` caps the number of symptoms asked for; `today` is the default entry date.
pub fn run_log_session<R: BufRead, W: Write>(
    store: &JournalStore,
    limit: usize,
    today: JournalDate,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<LoggedEntry> {
    let journal = match store.load().context("failed to read journal")? {
        Some(journal) => journal,
        None => {
            prompter.say("\n--- No journal found, let's start a new one.")?;
            prompter.ask("What's your full name?", |answer| {
                Journal::create_empty(answer).map_err(|_| "A name is required.".to_string())
            })?
        }
    };

    prompter.say(format_args!("\n--- Oh hi, {}.", journal.patient()))?;

    let mut options = distinct_symptoms(&journal);

    prompter.say("")?;
    let date = prompter.ask(
        format_args!("What date is this log for? (leave blank for today [{today}])"),
        |answer| parse_date(answer, today),
    )?;

    let mut symptoms = Vec::new();
    while symptoms.len() < limit {
        prompter.say(format_args!(
            "\n--- Logging symptom {} of {limit}",
            symptoms.len() + 1
        ))?;
        for (i, name) in options.iter().enumerate() {
            prompter.say(format_args!("{}: {name}", i + 1))?;
        }
        prompter.say(format_args!("{}: Log new symptom", options.len() + 1))?;
        prompter.say(format_args!("{}: Done adding symptoms", options.len() + 2))?;

        let existing = options.len();
        let choice = prompter.ask("Choose a symptom option from the above list", |answer| {
            parse_choice(answer, existing)
        })?;

        let name = match choice {
            SymptomChoice::Done => break,
            SymptomChoice::Existing(i) => options.remove(i),
            SymptomChoice::New => {
                let name = prompter
                    .ask("What's the name of the symptom you'd like to log?", |answer| {
                        NonEmptyText::new(answer).map_err(|_| "A symptom name is required.".to_string())
                    })?;
                // Once logged, a name is no longer offered for this entry.
                options.retain(|option| option != &name);
                name
            }
        };

        let severity = prompter.ask(
            "On a scale of 0 to 10, how severe is the symptom?",
            parse_severity,
        )?;
        symptoms.push(SymptomObservation::from_parts(name, severity));
    }

    prompter.say("\n> Log notes for today's entry (optional). Single line only.")?;
    let notes = prompter.read_line()?;

    let entry = Entry::new(date, symptoms, Some(notes))?;
    let journal = JournalStore::append(journal, entry);
    let archive_path = store
        .persist(&journal)
        .context("failed to write journal")?;

    let entry_number = journal.entry_count();
    prompter.say(format_args!(
        "\n=== Successfully wrote journal entry #{entry_number}!"
    ))?;

    Ok(LoggedEntry {
        entry_number,
        archive_path,
    })
}

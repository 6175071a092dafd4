//! Validated primitives shared by the journal crates.
//!
//! Every type here enforces its invariant at construction time, so code holding one of these
//! values never needs to re-check it:
//!
//! - [`NonEmptyText`]: text with at least one character, kept exactly as given
//! - [`Severity`]: a symptom severity score in `0..=10`
//! - [`JournalDate`]: a calendar date rendered as `MM-DD-YYYY`

use chrono::{Days, Local, NaiveDate};
use std::fmt;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// The text is stored verbatim: surrounding whitespace is part of the value, so a name read from
/// disk is written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// Returns [`TextError::Empty`] for the empty string.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let text = input.as_ref();
        if text.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(text.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// SEVERITY
// ============================================================================

/// Errors raised when a severity score falls outside the accepted scale.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeverityError {
    #[error("severity {0} is outside the range {min}..={max}", min = Severity::MIN, max = Severity::MAX)]
    OutOfRange(i64),
}

/// A symptom severity score on the closed scale `0..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Severity(u8);

impl Severity {
    /// Lowest accepted score.
    pub const MIN: u8 = 0;
    /// Highest accepted score.
    pub const MAX: u8 = 10;

    /// Validates `value` against the severity scale.
    pub fn new(value: i64) -> Result<Self, SeverityError> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(SeverityError::OutOfRange(value));
        }
        // Range checked above, so the narrowing cannot truncate.
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Severity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Severity::new(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// JOURNAL DATE
// ============================================================================

/// Errors raised when a date string does not follow [`JournalDate::FORMAT`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateError {
    #[error("not a valid date: '{0}' (expected MM-DD-YYYY)")]
    Invalid(String),
}

/// A calendar date with day granularity.
///
/// Journal dates carry no time of day and no timezone, so range comparisons at the start and end
/// of a report can never drift by a day. The textual form is always `MM-DD-YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JournalDate(NaiveDate);

impl JournalDate {
    /// `strftime`-style pattern used for every textual journal date.
    pub const FORMAT: &'static str = "%m-%d-%Y";

    /// Parses a `MM-DD-YYYY` string, ignoring surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let trimmed = input.trim();
        NaiveDate::parse_from_str(trimmed, Self::FORMAT)
            .map(Self)
            .map_err(|_| DateError::Invalid(trimmed.to_owned()))
    }

    /// Today's date in the local timezone.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// The date `days` days earlier, saturating at the earliest representable date.
    pub fn days_before(self, days: u64) -> Self {
        Self(self.0.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN))
    }
}

impl fmt::Display for JournalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl std::str::FromStr for JournalDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for JournalDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for JournalDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        JournalDate::parse(&s).map_err(serde::de::Error::custom)
    }
}

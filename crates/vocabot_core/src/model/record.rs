//! Learned-word record model.
//!
//! # Responsibility
//! - Define the canonical record shape stored in the archive file.
//! - Stamp lookup results with the calendar date they were learned.
//!
//! # Invariants
//! - `word` is never empty.
//! - `date` is an ISO 8601 calendar date (`YYYY-MM-DD`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage and display format for `ArchiveRecord::date`.
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Dictionary result for one word, before it is dated and archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    /// Canonical base form reported by the dictionary.
    pub word: String,
    /// Kana reading, empty when the dictionary has none.
    pub reading: String,
    /// Comma-joined English definitions of the first sense.
    pub meaning: String,
}

/// One learned word as persisted in the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveRecord {
    /// Unique key within the archive.
    pub word: String,
    #[serde(default)]
    pub reading: String,
    #[serde(default)]
    pub meaning: String,
    /// Day the word was learned, `YYYY-MM-DD`.
    pub date: String,
}

/// Validation failures for archive records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    EmptyWord,
    InvalidDate(String),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyWord => write!(f, "record word must not be empty"),
            Self::InvalidDate(value) => {
                write!(f, "record date `{value}` is not a YYYY-MM-DD calendar date")
            }
        }
    }
}

impl Error for RecordValidationError {}

impl ArchiveRecord {
    /// Dates a lookup result for archiving.
    pub fn new(entry: WordEntry, date: NaiveDate) -> Self {
        Self {
            word: entry.word,
            reading: entry.reading,
            meaning: entry.meaning,
            date: date.format(RECORD_DATE_FORMAT).to_string(),
        }
    }

    /// Checks record invariants before the record enters the archive.
    ///
    /// # Errors
    /// - `EmptyWord` when `word` is empty or whitespace only.
    /// - `InvalidDate` unless `date` is exactly a zero-padded `YYYY-MM-DD`.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.word.trim().is_empty() {
            return Err(RecordValidationError::EmptyWord);
        }
        // chrono accepts unpadded fields, so require the canonical spelling.
        let canonical = NaiveDate::parse_from_str(&self.date, RECORD_DATE_FORMAT)
            .ok()
            .map(|date| date.format(RECORD_DATE_FORMAT).to_string());
        if canonical.as_deref() != Some(self.date.as_str()) {
            return Err(RecordValidationError::InvalidDate(self.date.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ArchiveRecord, RecordValidationError, WordEntry};
    use chrono::NaiveDate;

    fn entry(word: &str) -> WordEntry {
        WordEntry {
            word: word.to_string(),
            reading: "いぬ".to_string(),
            meaning: "dog".to_string(),
        }
    }

    #[test]
    fn new_stamps_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let record = ArchiveRecord::new(entry("犬"), date);

        assert_eq!(record.word, "犬");
        assert_eq!(record.date, "2024-01-01");
        record.validate().expect("fresh record should validate");
    }

    #[test]
    fn validate_rejects_blank_word() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let record = ArchiveRecord::new(entry("  "), date);

        assert_eq!(
            record.validate().expect_err("blank word must fail"),
            RecordValidationError::EmptyWord
        );
    }

    #[test]
    fn validate_rejects_non_iso_date() {
        let mut record = ArchiveRecord::new(
            entry("犬"),
            NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        );
        record.date = "01/02/2024".to_string();

        assert_eq!(
            record.validate().expect_err("non-iso date must fail"),
            RecordValidationError::InvalidDate("01/02/2024".to_string())
        );
    }

    #[test]
    fn validate_rejects_unpadded_date() {
        let mut record = ArchiveRecord::new(
            entry("犬"),
            NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        );
        record.date = "2024-1-1".to_string();

        assert_eq!(
            record.validate().expect_err("unpadded date must fail"),
            RecordValidationError::InvalidDate("2024-1-1".to_string())
        );
    }

    #[test]
    fn missing_reading_and_meaning_deserialize_as_empty() {
        let record: ArchiveRecord =
            serde_json::from_str(r#"{"word":"猫","date":"2024-02-03"}"#).expect("decode");

        assert_eq!(record.reading, "");
        assert_eq!(record.meaning, "");
    }
}

//! Append-only archive of learned words.
//!
//! # Responsibility
//! - Hold learned records in insertion order.
//! - Guard against inserting a word that is already archived.
//!
//! # Invariants
//! - `append` never produces two records with the same `word`.
//! - Serializes transparently as a JSON array of records.

use crate::model::record::ArchiveRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Result of `Archive::append`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Record was added at the end.
    Appended,
    /// A record with the same word already existed; archive unchanged.
    AlreadyArchived,
}

/// Insertion-ordered learned-word archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Archive {
    records: Vec<ArchiveRecord>,
}

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ArchiveRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ArchiveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact, case-sensitive membership check on `word`.
    pub fn contains_word(&self, word: &str) -> bool {
        self.records.iter().any(|record| record.word == word)
    }

    /// Set of archived words.
    pub fn words(&self) -> HashSet<&str> {
        self.records
            .iter()
            .map(|record| record.word.as_str())
            .collect()
    }

    /// Appends `record` unless its word is already archived.
    pub fn append(&mut self, record: ArchiveRecord) -> AppendOutcome {
        if self.contains_word(&record.word) {
            return AppendOutcome::AlreadyArchived;
        }
        self.records.push(record);
        AppendOutcome::Appended
    }
}

#[cfg(test)]
mod tests {
    use super::{AppendOutcome, Archive};
    use crate::model::record::ArchiveRecord;

    fn record(word: &str) -> ArchiveRecord {
        ArchiveRecord {
            word: word.to_string(),
            reading: String::new(),
            meaning: String::new(),
            date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut archive = Archive::new();
        assert_eq!(archive.append(record("猫")), AppendOutcome::Appended);
        assert_eq!(archive.append(record("犬")), AppendOutcome::Appended);

        let words: Vec<&str> = archive.records().iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["猫", "犬"]);
    }

    #[test]
    fn append_duplicate_leaves_archive_unchanged() {
        let mut archive = Archive::from_records(vec![record("猫")]);
        let before = archive.clone();

        assert_eq!(archive.append(record("猫")), AppendOutcome::AlreadyArchived);
        assert_eq!(archive.len(), 1);
        assert_eq!(archive, before);
    }

    #[test]
    fn contains_word_is_case_sensitive() {
        let archive = Archive::from_records(vec![record("Cat")]);
        assert!(archive.contains_word("Cat"));
        assert!(!archive.contains_word("cat"));
    }

    #[test]
    fn serializes_as_plain_array() {
        let archive = Archive::from_records(vec![record("猫")]);
        let json = serde_json::to_value(&archive).expect("encode");
        assert!(json.is_array());
        assert_eq!(json[0]["word"], "猫");
    }
}

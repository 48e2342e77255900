//! Run configuration.
//!
//! # Responsibility
//! - Name the on-disk artifacts and lookup settings for one run.
//! - Provide defaults matching the conventional repository layout.

use crate::document::DEFAULT_STATUS_LINE;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SEED_PATH: &str = "words_seed.txt";
pub const DEFAULT_ARCHIVE_PATH: &str = "vocabulary_archive.json";
pub const DEFAULT_DOCUMENT_PATH: &str = "README.md";
pub const DEFAULT_LOOKUP_ENDPOINT: &str = "https://jisho.org/api/v1/search/words";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Dictionary client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    pub endpoint: String,
    /// Upper bound for the whole request, connect through body.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_LOOKUP_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
            user_agent: format!("vocabot/{} (+reqwest)", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Paths and presentation settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed_path: PathBuf,
    pub archive_path: PathBuf,
    pub document_path: PathBuf,
    /// Free text shown on the status line of the rendered section.
    pub status_line: String,
    pub lookup: LookupConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed_path: PathBuf::from(DEFAULT_SEED_PATH),
            archive_path: PathBuf::from(DEFAULT_ARCHIVE_PATH),
            document_path: PathBuf::from(DEFAULT_DOCUMENT_PATH),
            status_line: DEFAULT_STATUS_LINE.to_string(),
            lookup: LookupConfig::default(),
        }
    }
}

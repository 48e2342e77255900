//! Core domain logic for vocabot.
//! This crate is the single source of truth for archive and document invariants.

pub mod config;
pub mod document;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{LookupConfig, RunConfig};
pub use document::{splice_section, update_document, MalformedDocument, StatusSection};
pub use logging::{default_log_level, init_logging, parse_level, LogTarget, LoggingError};
pub use lookup::{DictionaryLookup, JishoClient, LookupError, LookupResult};
pub use model::archive::{AppendOutcome, Archive};
pub use model::record::{ArchiveRecord, RecordValidationError, WordEntry};
pub use repo::archive_store::{ArchiveLoad, ArchiveStore};
pub use repo::document_store::DocumentStore;
pub use repo::seed_source::{SeedError, SeedVocabulary};
pub use repo::{RepoError, RepoResult};
pub use service::daily_run::{DailyWordService, Progress, RunError, RunOutcome};
pub use service::selector::{available_words, select_next};


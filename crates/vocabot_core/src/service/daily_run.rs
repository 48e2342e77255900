//! One scheduled learning run.
//!
//! # Responsibility
//! - Load state, pick a word, look it up, and record it.
//! - Rewrite the status document section for the newly learned word.
//! - Report exactly one outcome or error per run.
//!
//! # Invariants
//! - Nothing is written unless selection, lookup, duplicate guard and
//!   document splicing all succeeded.
//! - Archive and document are both staged before either is committed.
//! - An unreadable archive is copied aside only once both writes are staged;
//!   an aborted run leaves it in place for the next run to report again.
//! - No cross-process lock is taken; the duplicate guard is the only
//!   protection against overlapping runs.

use crate::config::RunConfig;
use crate::document::{update_document, MalformedDocument};
use crate::lookup::{DictionaryLookup, LookupError};
use crate::model::archive::{AppendOutcome, Archive};
use crate::model::record::{ArchiveRecord, RecordValidationError};
use crate::repo::archive_store::ArchiveStore;
use crate::repo::document_store::DocumentStore;
use crate::repo::seed_source::{SeedError, SeedVocabulary};
use crate::repo::RepoError;
use crate::service::selector::{available_words, select_next};
use chrono::NaiveDate;
use log::{error, info, warn};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Instant;

/// Terminal state of a run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A new word was archived and the document rewritten.
    Learned {
        record: ArchiveRecord,
        total: usize,
        /// Set when an unreadable archive was copied aside and replaced.
        corrupt_backup: Option<PathBuf>,
    },
    /// Every seed word is already archived.
    SeedExhausted {
        archived: usize,
        /// Stored archive was unreadable and left untouched.
        archive_corrupt: bool,
    },
    /// The looked-up word was already archived; nothing was written.
    AlreadyArchived { word: String, archive_corrupt: bool },
}

impl Display for RunOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Learned {
                record,
                total,
                corrupt_backup,
            } => {
                write!(f, "Success! Added {} ({total} words archived)", record.word)?;
                if let Some(backup) = corrupt_backup {
                    write!(f, "; unreadable archive copied to {}", backup.display())?;
                }
                Ok(())
            }
            Self::SeedExhausted {
                archived,
                archive_corrupt,
            } => {
                write!(f, "All seed words learned! ({archived} words archived)")?;
                write_corrupt_note(f, *archive_corrupt)
            }
            Self::AlreadyArchived {
                word,
                archive_corrupt,
            } => {
                write!(f, "Word {word} already in archive, skipped")?;
                write_corrupt_note(f, *archive_corrupt)
            }
        }
    }
}

fn write_corrupt_note(f: &mut Formatter<'_>, archive_corrupt: bool) -> std::fmt::Result {
    if archive_corrupt {
        write!(f, "; archive unreadable, left in place")?;
    }
    Ok(())
}

/// Failure that aborted a run before anything was committed.
#[derive(Debug)]
pub enum RunError {
    SeedMissing(PathBuf),
    Seed(SeedError),
    LookupNotFound(String),
    LookupFailed { word: String, source: LookupError },
    InvalidRecord(RecordValidationError),
    MalformedDocument { path: PathBuf, reason: MalformedDocument },
    Storage(RepoError),
}

impl Display for RunError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SeedMissing(path) => write!(f, "Seed file `{}` not found", path.display()),
            Self::Seed(err) => write!(f, "{err}"),
            Self::LookupNotFound(word) => write!(f, "No dictionary entry found for {word}"),
            Self::LookupFailed { word, source } => {
                write!(f, "Failed to fetch data for {word}: {source}")
            }
            Self::InvalidRecord(err) => write!(f, "Refusing to archive entry: {err}"),
            Self::MalformedDocument { path, reason } => {
                write!(f, "Status document `{}` is malformed: {reason}", path.display())
            }
            Self::Storage(err) => write!(f, "Storage error: {err}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Seed(err) => Some(err),
            Self::LookupFailed { source, .. } => Some(source),
            Self::InvalidRecord(err) => Some(err),
            Self::MalformedDocument { reason, .. } => Some(reason),
            Self::Storage(err) => Some(err),
            Self::SeedMissing(_) | Self::LookupNotFound(_) => None,
        }
    }
}

impl From<SeedError> for RunError {
    fn from(value: SeedError) -> Self {
        match value {
            SeedError::Missing(path) => Self::SeedMissing(path),
            other => Self::Seed(other),
        }
    }
}

impl From<RepoError> for RunError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

impl From<RecordValidationError> for RunError {
    fn from(value: RecordValidationError) -> Self {
        Self::InvalidRecord(value)
    }
}

/// Read-only learning progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub seed_words: usize,
    pub archived: usize,
    pub remaining: usize,
    /// Stored archive is unreadable and would be reset by the next run.
    pub archive_corrupt: bool,
}

impl Display for Progress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} archived, {} of {} seed words remaining",
            self.archived, self.remaining, self.seed_words
        )?;
        if self.archive_corrupt {
            write!(f, " (archive unreadable)")?;
        }
        Ok(())
    }
}

/// Orchestrates the daily word run over file stores and a lookup.
pub struct DailyWordService<L: DictionaryLookup> {
    seed_path: PathBuf,
    status_line: String,
    archive_store: ArchiveStore,
    document_store: DocumentStore,
    lookup: L,
}

impl<L: DictionaryLookup> DailyWordService<L> {
    pub fn new(config: &RunConfig, lookup: L) -> Self {
        Self {
            seed_path: config.seed_path.clone(),
            status_line: config.status_line.clone(),
            archive_store: ArchiveStore::new(config.archive_path.clone()),
            document_store: DocumentStore::new(config.document_path.clone()),
            lookup,
        }
    }

    /// Runs one learning step dated `today`, drawing from `rng`.
    ///
    /// # Contract
    /// - Exhausted seed and duplicate words are outcomes, not errors.
    /// - On any `Err`, archive and document are left as they were.
    pub fn run<R>(&self, rng: &mut R, today: NaiveDate) -> Result<RunOutcome, RunError>
    where
        R: Rng + ?Sized,
    {
        let started_at = Instant::now();
        info!("event=daily_run module=service status=start date={today}");

        let result = self
            .archive_store
            .load()
            .map_err(RunError::from)
            .and_then(|loaded| {
                let archive_corrupt = loaded.corrupt;
                let result = self.run_inner(loaded.archive, archive_corrupt, rng, today);
                if archive_corrupt && result.is_err() {
                    warn!(
                        "event=daily_run module=service status=error error_code=archive_corrupt action=left_in_place path={}",
                        self.archive_store.path().display()
                    );
                }
                result
            });
        match &result {
            Ok(outcome) => info!(
                "event=daily_run module=service status=ok outcome={} duration_ms={}",
                outcome_code(outcome),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=daily_run module=service status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    /// Reports seed and archive counts without writing anything.
    pub fn progress(&self) -> Result<Progress, RunError> {
        let loaded = self.archive_store.load()?;
        let seed = SeedVocabulary::load(&self.seed_path)?;
        Ok(Progress {
            seed_words: seed.len(),
            archived: loaded.archive.len(),
            remaining: available_words(&seed, &loaded.archive).len(),
            archive_corrupt: loaded.corrupt,
        })
    }

    fn run_inner<R>(
        &self,
        mut archive: Archive,
        archive_corrupt: bool,
        rng: &mut R,
        today: NaiveDate,
    ) -> Result<RunOutcome, RunError>
    where
        R: Rng + ?Sized,
    {
        let seed = SeedVocabulary::load(&self.seed_path)?;

        let Some(word) = select_next(&seed, &archive, rng) else {
            info!(
                "event=word_selected module=service status=skip reason=seed_exhausted archived={}",
                archive.len()
            );
            return Ok(RunOutcome::SeedExhausted {
                archived: archive.len(),
                archive_corrupt,
            });
        };
        info!("event=word_selected module=service status=ok word={word}");

        let entry = match self.lookup.lookup(word) {
            Ok(Some(entry)) => entry,
            Ok(None) => return Err(RunError::LookupNotFound(word.to_string())),
            Err(source) => {
                return Err(RunError::LookupFailed {
                    word: word.to_string(),
                    source,
                })
            }
        };

        let record = ArchiveRecord::new(entry, today);
        record.validate()?;

        if archive.append(record.clone()) == AppendOutcome::AlreadyArchived {
            warn!(
                "event=archive_append module=service status=skip reason=already_archived word={}",
                record.word
            );
            return Ok(RunOutcome::AlreadyArchived {
                word: record.word,
                archive_corrupt,
            });
        }
        let total = archive.len();

        let existing = self.document_store.read()?;
        let document = update_document(existing.as_deref(), &record, total, &self.status_line)
            .map_err(|reason| RunError::MalformedDocument {
                path: self.document_store.path().to_path_buf(),
                reason,
            })?;

        let staged_archive = self.archive_store.stage(&archive)?;
        let staged_document = self.document_store.stage(&document)?;
        let corrupt_backup = if archive_corrupt {
            Some(self.archive_store.back_up_corrupt()?)
        } else {
            None
        };
        staged_archive.commit()?;
        info!(
            "event=archive_append module=service status=ok word={} total={}",
            record.word, total
        );
        staged_document.commit()?;
        info!(
            "event=document_update module=service status=ok created={} path={}",
            existing.is_none(),
            self.document_store.path().display()
        );

        Ok(RunOutcome::Learned {
            record,
            total,
            corrupt_backup,
        })
    }
}

fn outcome_code(outcome: &RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Learned { .. } => "learned",
        RunOutcome::SeedExhausted { .. } => "seed_exhausted",
        RunOutcome::AlreadyArchived { .. } => "already_archived",
    }
}

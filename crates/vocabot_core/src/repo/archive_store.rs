//! JSON archive store.
//!
//! # Responsibility
//! - Load the learned-word archive from its JSON file.
//! - Stage a full rewrite of the archive for atomic commit.
//!
//! # Invariants
//! - Missing or whitespace-only storage loads as an empty archive.
//! - Unparseable storage loads as an empty archive. Loading never writes;
//!   the unreadable file is copied aside only by `back_up_corrupt`, which the
//!   caller invokes right before committing a replacement.
//! - Serialized form is pretty JSON with non-ASCII text written verbatim.

use super::staged::StagedWrite;
use super::{RepoError, RepoResult};
use crate::model::archive::Archive;
use chrono::Local;
use log::{error, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const CORRUPT_SUFFIX: &str = "corrupt";

/// Archive plus whether an empty one was substituted for unreadable storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLoad {
    pub archive: Archive,
    /// Stored content was unparseable and an empty archive was substituted.
    pub corrupt: bool,
}

impl ArchiveLoad {
    fn clean(archive: Archive) -> Self {
        Self {
            archive,
            corrupt: false,
        }
    }
}

enum StoredArchive {
    Missing,
    Blank,
    Parsed(Archive),
    Corrupt(serde_json::Error),
}

/// File-backed archive store.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    path: PathBuf,
}

impl ArchiveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the archive, degrading to empty on missing or corrupt storage.
    ///
    /// Never modifies the file; see `back_up_corrupt`.
    ///
    /// # Errors
    /// - `RepoError::Io` when the file exists but cannot be read.
    pub fn load(&self) -> RepoResult<ArchiveLoad> {
        let (archive, reason) = match self.read_stored()? {
            StoredArchive::Corrupt(err) => {
                warn!(
                    "event=archive_load module=repo status=recovered error_code=archive_corrupt path={} error={}",
                    self.path.display(),
                    err
                );
                return Ok(ArchiveLoad {
                    archive: Archive::new(),
                    corrupt: true,
                });
            }
            StoredArchive::Missing => (Archive::new(), "missing"),
            StoredArchive::Blank => (Archive::new(), "blank"),
            StoredArchive::Parsed(archive) => (archive, "stored"),
        };

        info!(
            "event=archive_load module=repo status=ok records={} reason={} path={}",
            archive.len(),
            reason,
            self.path.display()
        );
        Ok(ArchiveLoad::clean(archive))
    }

    fn read_stored(&self) -> RepoResult<StoredArchive> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(StoredArchive::Missing);
            }
            Err(err) => {
                error!(
                    "event=archive_load module=repo status=error error_code=archive_read_failed path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(RepoError::io(&self.path, err));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(StoredArchive::Blank);
        }

        Ok(match serde_json::from_slice::<Archive>(&bytes) {
            Ok(archive) => StoredArchive::Parsed(archive),
            Err(err) => StoredArchive::Corrupt(err),
        })
    }

    /// Serializes `archive` into a temp file ready to replace the store.
    pub fn stage(&self, archive: &Archive) -> RepoResult<StagedWrite> {
        let json = serde_json::to_string_pretty(archive)?;
        StagedWrite::stage(&self.path, json.as_bytes())
    }

    /// Copies the current store file to `<name>.corrupt-<YYYYMMDDHHMMSS>`.
    ///
    /// The store file itself stays in place until a staged write replaces it.
    ///
    /// # Errors
    /// - `RepoError::Io` when the copy fails.
    pub fn back_up_corrupt(&self) -> RepoResult<PathBuf> {
        let backup = self.corrupt_backup_path();
        match fs::copy(&self.path, &backup) {
            Ok(_) => {
                warn!(
                    "event=archive_backup module=repo status=ok path={}",
                    backup.display()
                );
                Ok(backup)
            }
            Err(err) => {
                error!(
                    "event=archive_backup module=repo status=error error_code=archive_backup_failed path={} error={}",
                    backup.display(),
                    err
                );
                Err(RepoError::io(&backup, err))
            }
        }
    }

    fn corrupt_backup_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "archive".to_string());
        let stamp = Local::now().format("%Y%m%d%H%M%S");
        self.path
            .with_file_name(format!("{file_name}.{CORRUPT_SUFFIX}-{stamp}"))
    }
}

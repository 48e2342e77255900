//! Status document file access.

use super::staged::StagedWrite;
use super::{RepoError, RepoResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File-backed status document.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the document text, or `None` when the file does not exist.
    pub fn read(&self) -> RepoResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(RepoError::io(&self.path, err)),
        }
    }

    pub fn stage(&self, text: &str) -> RepoResult<StagedWrite> {
        StagedWrite::stage(&self.path, text.as_bytes())
    }
}

//! Persistence boundary for on-disk artifacts.
//!
//! # Responsibility
//! - Read the seed vocabulary, the archive store and the status document.
//! - Stage full-file rewrites and commit them by atomic rename.
//!
//! # Invariants
//! - Writers never truncate a target in place; readers see old or new bytes.
//! - A missing archive or document is an empty state, not an error.
//! - A missing seed file is an error distinct from an exhausted seed.

pub mod archive_store;
pub mod document_store;
pub mod seed_source;
pub mod staged;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage error for archive and document persistence.
#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: io::Error },
    Serialize(serde_json::Error),
}

impl RepoError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Serialize(err) => write!(f, "failed to serialize archive: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

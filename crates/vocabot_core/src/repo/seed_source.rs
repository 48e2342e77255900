//! Seed vocabulary source.
//!
//! # Responsibility
//! - Load the fixed candidate word list from a plain text file.
//!
//! # Invariants
//! - One word per line; lines are trimmed and blank lines ignored.
//! - Words are distinct; later duplicates are dropped, first order kept.
//! - A missing file is reported as `SeedError::Missing`, never as empty.

use log::{error, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Seed loading errors.
#[derive(Debug)]
pub enum SeedError {
    Missing(PathBuf),
    Io { path: PathBuf, source: io::Error },
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(path) => write!(f, "seed file `{}` not found", path.display()),
            Self::Io { path, source } => {
                write!(f, "failed to read seed file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Missing(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Ordered, distinct candidate words for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedVocabulary {
    words: Vec<String>,
}

impl SeedVocabulary {
    /// Reads the seed file at `path`.
    ///
    /// # Errors
    /// - `Missing` when the file does not exist.
    /// - `Io` for any other read failure, including invalid UTF-8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                error!(
                    "event=seed_load module=repo status=error error_code=seed_missing path={}",
                    path.display()
                );
                return Err(SeedError::Missing(path.to_path_buf()));
            }
            Err(err) => {
                error!(
                    "event=seed_load module=repo status=error error_code=seed_read_failed path={} error={}",
                    path.display(),
                    err
                );
                return Err(SeedError::Io {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        let seed = Self::from_words(content.lines());
        info!(
            "event=seed_load module=repo status=ok words={} path={}",
            seed.len(),
            path.display()
        );
        Ok(seed)
    }

    /// Builds a vocabulary from raw lines using the same trimming rules as `load`.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            if seen.insert(word.to_string()) {
                unique.push(word.to_string());
            }
        }
        Self { words: unique }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::SeedVocabulary;

    #[test]
    fn from_words_trims_skips_blank_and_dedupes() {
        let seed = SeedVocabulary::from_words(["  猫 ", "", "犬", "\t", "猫", "未知"]);
        assert_eq!(seed.words(), ["猫", "犬", "未知"]);
    }

    #[test]
    fn from_words_handles_crlf_lines() {
        let seed = SeedVocabulary::from_words("猫\r\n犬\r\n".lines());
        assert_eq!(seed.words(), ["猫", "犬"]);
    }
}

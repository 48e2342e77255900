//! Dictionary lookup boundary.
//!
//! # Responsibility
//! - Define the contract for resolving a word's reading and meaning.
//! - Keep transport details behind the `DictionaryLookup` trait.
//!
//! # Invariants
//! - `Ok(None)` means the dictionary has no entry; it is not a failure.
//! - Lookup failures are reported to the caller, never panicked on.

pub mod jisho;

use crate::model::record::WordEntry;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use jisho::{parse_search_response, JishoClient};

pub type LookupResult<T> = Result<T, LookupError>;

/// Failure while querying the dictionary.
#[derive(Debug)]
pub enum LookupError {
    /// Client setup, connection, or timeout failure.
    Transport(reqwest::Error),
    /// Server answered with a non-success status.
    Status { status: u16, url: String },
    /// Body did not match the expected response shape.
    Decode(serde_json::Error),
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "dictionary request failed: {err}"),
            Self::Status { status, url } => write!(f, "HTTP error {status} from {url}"),
            Self::Decode(err) => write!(f, "unexpected dictionary response: {err}"),
        }
    }
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Status { .. } => None,
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// Resolves a seed word to its dictionary entry.
pub trait DictionaryLookup {
    fn lookup(&self, word: &str) -> LookupResult<Option<WordEntry>>;
}

impl<T: DictionaryLookup + ?Sized> DictionaryLookup for &T {
    fn lookup(&self, word: &str) -> LookupResult<Option<WordEntry>> {
        (**self).lookup(word)
    }
}

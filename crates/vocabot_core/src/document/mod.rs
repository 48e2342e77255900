//! Status document rendering and marker-region splicing.
//!
//! # Responsibility
//! - Render the machine-owned vocabulary section.
//! - Replace the marker region of a user-owned document without touching
//!   anything outside it.
//!
//! # Invariants
//! - Text outside the marker pair is preserved byte-for-byte.
//! - Output always contains exactly one start marker and one end marker.
//! - Ambiguous marker layouts are rejected, never guessed at.

pub mod section;

pub use section::{
    splice_section, update_document, MalformedDocument, StatusSection, DEFAULT_STATUS_LINE,
    END_MARKER, START_MARKER,
};

//! Vocabulary domain model.
//!
//! # Responsibility
//! - Define the learned-word record persisted across runs.
//! - Keep the archive's uniqueness rule in one place.
//!
//! # Invariants
//! - Within one archive, `word` values are unique (case-sensitive exact match).
//! - The archive is append-only and keeps insertion order.

pub mod archive;
pub mod record;

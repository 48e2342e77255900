//! Use-case services.
//!
//! # Responsibility
//! - Choose the next word to learn.
//! - Orchestrate one load-select-lookup-write run over the repo layer.
//!
//! # Invariants
//! - A run either commits both the archive and the document, or neither.

pub mod daily_run;
pub mod selector;

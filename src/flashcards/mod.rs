//! Flashcard decks for Sword
//!
//! This module provides:
//! - The deck file encoding (header plus `label=transcript` records)
//! - Deck storage: create, delete, load, save and list
//! - In-memory decks with three memorization buckets
//! - Exam sessions that move cards between buckets

pub mod codec;
pub mod exam;
pub mod models;
pub mod storage;

pub use codec::CodecError;
pub use exam::{run_exam, ExamContext, ExamReport, Judge, Judgment};
pub use models::*;
pub use storage::{RepositoryError, RepositoryStore};

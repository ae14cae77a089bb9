//! Sword: flashcard decks with three memorization buckets.
//!
//! Decks are stored one file per deck (see [`flashcards::codec`]) and are
//! drilled with exam sessions that move cards between the Hard, Normal and
//! Good buckets.

pub mod config;
pub mod flashcards;

pub use config::Config;
pub use flashcards::{
    run_exam, Cursor, ExamContext, ExamReport, Flashcard, Judge, Judgment, MemoryLevel, Repository,
    RepositoryError, RepositoryStore,
};

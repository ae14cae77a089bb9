//! Exam sessions
//!
//! An exam walks the buckets from the repository's cursor, Hard first, and
//! asks a [`Judge`] how well each card was recalled. A card judged at its own
//! level stays where it is; any other level moves it to the end of that
//! bucket. Quitting stores the position of the current card in the cursor so
//! the next session starts there. Finishing the Good bucket resets the cursor.
//!
//! Each bucket is walked over its length at the moment the session reaches
//! it, so a card moved into a later bucket is judged again there. An
//! interrupted session that is resumed makes the same visits, in the same
//! order, as one that runs through.

use serde::Serialize;

use super::models::{CardEntry, Cursor, Flashcard, MemoryLevel, Repository};

/// Outcome of presenting one card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgment {
    /// The card belongs in this bucket
    Level(MemoryLevel),
    /// Stop the session at this card
    Quit,
}

impl From<MemoryLevel> for Judgment {
    fn from(level: MemoryLevel) -> Self {
        Self::Level(level)
    }
}

/// Progress information handed to the judge with each card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamContext {
    /// Bucket the card currently sits in
    pub level: MemoryLevel,
    /// Cards still scheduled in this session, the current one included.
    /// Grows when a card is moved into a bucket the session has not reached.
    pub remaining: usize,
    /// Cards already judged in this session
    pub repeats: usize,
}

/// Source of recall judgments, usually an interactive presenter
pub trait Judge {
    fn judge(&mut self, card: Flashcard<'_>, context: ExamContext) -> Judgment;
}

impl<F> Judge for F
where
    F: FnMut(Flashcard<'_>, ExamContext) -> Judgment,
{
    fn judge(&mut self, card: Flashcard<'_>, context: ExamContext) -> Judgment {
        self(card, context)
    }
}

/// Summary of one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamReport {
    /// Judgments made (the card a session quits on is not counted)
    pub visited: usize,
    /// Cards that stayed in their bucket
    pub kept: usize,
    /// Cards moved to another bucket
    pub moved: usize,
    /// False if the session ended with a quit
    pub completed: bool,
}

/// Run one exam session over `repo`, updating its buckets and cursor.
///
/// Nothing is persisted; the caller saves the repository afterwards.
pub fn run_exam<J>(repo: &mut Repository, judge: &mut J) -> ExamReport
where
    J: Judge + ?Sized,
{
    let start = repo.cursor();
    let first_index = start.index.min(repo.level_len(start.level));

    log::debug!(
        "Starting exam on '{}' at {:?}, {} cards in the deck",
        repo.name(),
        start,
        repo.len()
    );

    let mut report = ExamReport::default();

    for level in MemoryLevel::ALL.into_iter().filter(|&level| level >= start.level) {
        let from = if level == start.level { first_index } else { 0 };
        // Moves never target the bucket being walked, so its length is final here
        let bucket = std::mem::take(&mut repo.buckets[level.index()]);

        let mut kept: Vec<CardEntry> = Vec::with_capacity(bucket.len());
        kept.extend_from_slice(&bucket[..from]);
        let mut quit_at = None;

        for (index, entry) in bucket.iter().enumerate().skip(from) {
            let later: usize = MemoryLevel::ALL
                .into_iter()
                .filter(|&other| other > level)
                .map(|other| repo.level_len(other))
                .sum();
            let context = ExamContext {
                level,
                remaining: bucket.len() - index + later,
                repeats: report.visited,
            };

            match judge.judge(repo.view(entry), context) {
                Judgment::Quit => {
                    quit_at = Some(index);
                    break;
                }
                Judgment::Level(target) if target == level => {
                    kept.push(entry.clone());
                    report.kept += 1;
                }
                Judgment::Level(target) => {
                    repo.buckets[target.index()].push(entry.clone());
                    report.moved += 1;
                }
            }

            report.visited += 1;
        }

        // The quit card lands right after the cards kept before it
        let resume_index = kept.len();
        if let Some(index) = quit_at {
            kept.extend_from_slice(&bucket[index..]);
        }
        repo.buckets[level.index()] = kept;

        if quit_at.is_some() {
            repo.cursor = Cursor::new(level, resume_index);
            log::info!(
                "Exam on '{}' stopped at {} #{} after {} cards",
                repo.name(),
                level,
                resume_index,
                report.visited
            );
            return report;
        }
    }

    repo.cursor = Cursor::default();
    report.completed = true;
    log::info!(
        "Exam on '{}' complete: {} kept, {} moved",
        repo.name(),
        report.kept,
        report.moved
    );
    report
}

//! Data models for the flashcard system

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::codec::{self, FieldKind};
use super::storage::{RepositoryError, Result};

/// Memorization strength of a card. Every card lives in exactly one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryLevel {
    /// Not recalled, or recalled with serious difficulty
    #[default]
    Hard,
    /// Recalled after hesitation
    Normal,
    /// Recalled without hesitation
    Good,
}

impl MemoryLevel {
    /// All levels in bucket order
    pub const ALL: [MemoryLevel; 3] = [MemoryLevel::Hard, MemoryLevel::Normal, MemoryLevel::Good];

    /// Position of the level in bucket order, also its on-disk code
    pub fn index(self) -> usize {
        match self {
            Self::Hard => 0,
            Self::Normal => 1,
            Self::Good => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hard => "hard",
            Self::Normal => "normal",
            Self::Good => "good",
        }
    }
}

impl fmt::Display for MemoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemoryLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hard" | "h" | "1" => Ok(Self::Hard),
            "normal" | "n" | "2" => Ok(Self::Normal),
            "good" | "g" | "3" => Ok(Self::Good),
            other => Err(format!("unknown memory level: {}", other)),
        }
    }
}

/// Position where the next exam session starts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub level: MemoryLevel,
    pub index: usize,
}

impl Cursor {
    pub fn new(level: MemoryLevel, index: usize) -> Self {
        Self { level, index }
    }

    /// True for the `(Hard, 0)` position a completed pass leaves behind
    pub fn is_reset(&self) -> bool {
        *self == Self::default()
    }
}

/// A flashcard borrowed from its repository's text arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Flashcard<'a> {
    pub label: &'a str,
    pub transcript: &'a str,
}

/// Location of one card's label and transcript inside the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CardEntry {
    label: Range<usize>,
    transcript: Range<usize>,
}

impl CardEntry {
    fn text_len(&self) -> usize {
        self.label.len() + self.transcript.len()
    }
}

/// A deck of flashcards split into three memorization buckets.
///
/// The repository owns a single text arena; every card is a pair of ranges
/// into it. Deleting a card leaves its bytes behind as garbage, which is
/// dropped on the next save/load cycle since only live cards are written.
#[derive(Debug, Clone)]
pub struct Repository {
    name: String,
    pub(crate) cursor: Cursor,
    pub(crate) buckets: [Vec<CardEntry>; 3],
    text: String,
    textbuf_size: usize,
}

impl Repository {
    /// An empty deck with a reset cursor
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, 0, [0; 3])
    }

    pub(crate) fn with_capacity(name: impl Into<String>, text_capacity: usize, counts: [usize; 3]) -> Self {
        Self {
            name: name.into(),
            cursor: Cursor::default(),
            buckets: counts.map(Vec::with_capacity),
            text: String::with_capacity(text_capacity),
            textbuf_size: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Total bytes of label and transcript text across all live cards
    pub fn textbuf_size(&self) -> usize {
        self.textbuf_size
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    pub fn level_len(&self, level: MemoryLevel) -> usize {
        self.buckets[level.index()].len()
    }

    /// Card counts per level, in bucket order
    pub fn counts(&self) -> [usize; 3] {
        [
            self.buckets[0].len(),
            self.buckets[1].len(),
            self.buckets[2].len(),
        ]
    }

    /// Cards of one bucket in stored order
    pub fn cards(&self, level: MemoryLevel) -> impl Iterator<Item = Flashcard<'_>> + '_ {
        self.buckets[level.index()].iter().map(move |entry| self.view(entry))
    }

    pub fn card(&self, level: MemoryLevel, index: usize) -> Option<Flashcard<'_>> {
        self.buckets[level.index()].get(index).map(|entry| self.view(entry))
    }

    /// Locate a card by label, scanning buckets in level order
    pub fn find(&self, label: &str) -> Option<(MemoryLevel, usize)> {
        MemoryLevel::ALL.into_iter().find_map(|level| {
            self.buckets[level.index()]
                .iter()
                .position(|entry| &self.text[entry.label.clone()] == label)
                .map(|index| (level, index))
        })
    }

    pub(crate) fn view(&self, entry: &CardEntry) -> Flashcard<'_> {
        Flashcard {
            label: &self.text[entry.label.clone()],
            transcript: &self.text[entry.transcript.clone()],
        }
    }

    /// Append a card to the Hard bucket.
    ///
    /// Fails with `CardExists` if any bucket already holds the label; the
    /// repository is left untouched on every error.
    pub fn add_card(&mut self, label: &str, transcript: &str) -> Result<()> {
        codec::validate_field(FieldKind::Label, label)
            .and_then(|()| codec::validate_field(FieldKind::Transcript, transcript))
            .map_err(|reason| RepositoryError::InvalidCard {
                deck: self.name.clone(),
                reason,
            })?;

        if self.find(label).is_some() {
            return Err(RepositoryError::CardExists {
                deck: self.name.clone(),
                label: label.to_string(),
            });
        }

        self.push(MemoryLevel::Hard, label, transcript);
        log::debug!("Added card '{}' to deck '{}'", label, self.name);
        Ok(())
    }

    /// Remove the first card matching `label` and return the bucket it was in.
    ///
    /// The last card of that bucket takes the removed card's slot.
    pub fn delete_card(&mut self, label: &str) -> Result<MemoryLevel> {
        let (level, index) = self.find(label).ok_or_else(|| RepositoryError::CardNotFound {
            deck: self.name.clone(),
            label: label.to_string(),
        })?;

        let entry = self.buckets[level.index()].swap_remove(index);
        self.textbuf_size -= entry.text_len();
        log::debug!("Deleted card '{}' from {} bucket of deck '{}'", label, level, self.name);
        Ok(level)
    }

    /// Copy a card into the arena and append it to `level`, no checks
    pub(crate) fn push(&mut self, level: MemoryLevel, label: &str, transcript: &str) {
        let label = self.intern(label);
        let transcript = self.intern(transcript);
        let entry = CardEntry { label, transcript };
        self.textbuf_size += entry.text_len();
        self.buckets[level.index()].push(entry);
    }

    fn intern(&mut self, s: &str) -> Range<usize> {
        let start = self.text.len();
        self.text.push_str(s);
        start..self.text.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(repo: &Repository, level: MemoryLevel) -> Vec<&str> {
        repo.cards(level).map(|c| c.label).collect()
    }

    fn live_text_len(repo: &Repository) -> usize {
        MemoryLevel::ALL
            .into_iter()
            .flat_map(|level| repo.cards(level))
            .map(|c| c.label.len() + c.transcript.len())
            .sum()
    }

    #[test]
    fn test_new_repository_is_empty() {
        let repo = Repository::new("fr");
        assert!(repo.is_empty());
        assert_eq!(repo.len(), 0);
        assert_eq!(repo.textbuf_size(), 0);
        assert!(repo.cursor().is_reset());
    }

    #[test]
    fn test_add_card_goes_to_hard() {
        let mut repo = Repository::new("fr");
        repo.add_card("chat", "cat").unwrap();
        repo.add_card("chien", "dog").unwrap();

        assert_eq!(labels(&repo, MemoryLevel::Hard), vec!["chat", "chien"]);
        assert_eq!(repo.level_len(MemoryLevel::Normal), 0);
        assert_eq!(repo.textbuf_size(), 15);
        assert_eq!(
            repo.card(MemoryLevel::Hard, 1),
            Some(Flashcard { label: "chien", transcript: "dog" })
        );
    }

    #[test]
    fn test_add_duplicate_label_fails_and_leaves_repo_unchanged() {
        let mut repo = Repository::new("fr");
        repo.add_card("chat", "cat").unwrap();
        repo.push(MemoryLevel::Good, "chien", "dog");

        let err = repo.add_card("chien", "hound").unwrap_err();
        assert!(matches!(err, RepositoryError::CardExists { ref label, .. } if label == "chien"));
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.textbuf_size(), 15);
        assert_eq!(labels(&repo, MemoryLevel::Hard), vec!["chat"]);
    }

    #[test]
    fn test_add_card_rejects_delimiters() {
        let mut repo = Repository::new("fr");
        for (label, transcript) in [("a=b", "x"), ("a", "x\ny"), ("a\n", "x"), ("a", "x=y"), ("", "x")] {
            let err = repo.add_card(label, transcript).unwrap_err();
            assert!(matches!(err, RepositoryError::InvalidCard { .. }), "{:?}", (label, transcript));
        }
        assert!(repo.is_empty());
        assert_eq!(repo.textbuf_size(), 0);
    }

    #[test]
    fn test_delete_card_swaps_last_into_slot() {
        let mut repo = Repository::new("fr");
        for label in ["a", "b", "c", "d"] {
            repo.add_card(label, "x").unwrap();
        }

        assert_eq!(repo.delete_card("b").unwrap(), MemoryLevel::Hard);
        assert_eq!(labels(&repo, MemoryLevel::Hard), vec!["a", "d", "c"]);
    }

    #[test]
    fn test_delete_card_searches_all_buckets() {
        let mut repo = Repository::new("fr");
        repo.push(MemoryLevel::Normal, "maison", "house");
        repo.push(MemoryLevel::Good, "pain", "bread");

        assert_eq!(repo.delete_card("pain").unwrap(), MemoryLevel::Good);
        assert!(matches!(
            repo.delete_card("pain"),
            Err(RepositoryError::CardNotFound { .. })
        ));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_textbuf_size_tracks_add_and_delete() {
        let mut repo = Repository::new("de");
        let ops: &[(&str, Option<&str>)] = &[
            ("Hund", Some("dog")),
            ("Katze", Some("cat")),
            ("Hund", None),
            ("Brot", Some("bread")),
            ("Haus", Some("house")),
            ("Katze", None),
            ("Hund", Some("dog")),
        ];

        for (label, transcript) in ops {
            match transcript {
                Some(t) => repo.add_card(label, t).unwrap(),
                None => {
                    repo.delete_card(label).unwrap();
                }
            }
            assert_eq!(repo.textbuf_size(), live_text_len(&repo));
        }
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn test_fr_scenario() {
        let mut repo = Repository::new("fr");
        repo.add_card("chat", "cat").unwrap();
        repo.add_card("chien", "dog").unwrap();
        repo.delete_card("chat").unwrap();

        assert_eq!(labels(&repo, MemoryLevel::Hard), vec!["chien"]);
        assert_eq!(repo.textbuf_size(), 8);
    }

    #[test]
    fn test_memory_level_order_and_parse() {
        assert!(MemoryLevel::Hard < MemoryLevel::Normal);
        assert!(MemoryLevel::Normal < MemoryLevel::Good);
        assert_eq!(MemoryLevel::default(), MemoryLevel::Hard);
        assert_eq!(Cursor::default(), Cursor::new(MemoryLevel::Hard, 0));
        assert_eq!(MemoryLevel::from_index(2), Some(MemoryLevel::Good));
        assert_eq!(MemoryLevel::from_index(3), None);
        assert_eq!("G".parse::<MemoryLevel>(), Ok(MemoryLevel::Good));
        assert_eq!("normal".parse::<MemoryLevel>(), Ok(MemoryLevel::Normal));
        assert!("easy".parse::<MemoryLevel>().is_err());
    }
}

//! Storage operations for flashcard decks
//!
//! Directory structure:
//! ```text
//! repos.d/
//! ├── fr            # One text file per deck, see `codec`
//! ├── de
//! └── .fr.tmp       # Transient, only while `fr` is being saved
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::codec::{self, CodecError, RecordReader, RepoHeader};
use super::models::{MemoryLevel, Repository};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Deck not found: {0}")]
    DeckNotFound(String),

    #[error("Deck already exists: {0}")]
    DeckExists(String),

    #[error("Invalid deck name {0:?}")]
    InvalidDeckName(String),

    #[error("Card '{label}' not found in deck '{deck}'")]
    CardNotFound { deck: String, label: String },

    #[error("Card '{label}' already exists in deck '{deck}'")]
    CardExists { deck: String, label: String },

    #[error("Invalid card for deck '{deck}': {reason}")]
    InvalidCard { deck: String, reason: String },

    #[error("Deck '{deck}' is malformed: {source}")]
    Malformed {
        deck: String,
        #[source]
        source: CodecError,
    },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Storage manager for the deck files of one repositories directory
#[derive(Debug, Clone)]
pub struct RepositoryStore {
    repos_dir: PathBuf,
}

impl RepositoryStore {
    pub fn new(repos_dir: PathBuf) -> Self {
        Self { repos_dir }
    }

    pub fn repos_dir(&self) -> &Path {
        &self.repos_dir
    }

    /// Create the repositories directory if needed
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.repos_dir)?;
        Ok(())
    }

    /// Get the file path for a deck
    pub fn deck_path(&self, name: &str) -> Result<PathBuf> {
        validate_deck_name(name)?;
        Ok(self.repos_dir.join(name))
    }

    /// Hidden sibling used while a deck is rewritten
    fn temp_path(&self, name: &str) -> PathBuf {
        self.repos_dir.join(format!(".{}.tmp", name))
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.deck_path(name)?.is_file())
    }

    /// List deck names, sorted, skipping dotfiles and directories
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.repos_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.repos_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                log::warn!("Skipping deck file with non UTF-8 name: {:?}", entry.path());
                continue;
            };
            if !name.starts_with('.') {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    /// Create an empty deck. Fails if a deck with this name exists.
    ///
    /// The header is written to the temp file first and hard-linked into
    /// place, so the deck name only appears once its file is complete.
    pub fn create(&self, name: &str) -> Result<Repository> {
        let path = self.deck_path(name)?;
        self.init()?;

        let repo = Repository::new(name);
        let tmp_path = self.write_temp(name, &encode(&repo)?)?;

        let linked = fs::hard_link(&tmp_path, &path);
        let _ = fs::remove_file(&tmp_path);
        match linked {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(RepositoryError::DeckExists(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        log::info!("Created deck '{}' at {:?}", name, path);
        Ok(repo)
    }

    /// Delete a deck file
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.deck_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Deleted deck '{}'", name);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(RepositoryError::DeckNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read and decode a whole deck
    pub fn load(&self, name: &str) -> Result<Repository> {
        let path = self.deck_path(name)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RepositoryError::DeckNotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let repo = decode(name, &bytes).map_err(|source| RepositoryError::Malformed {
            deck: name.to_string(),
            source,
        })?;

        log::debug!(
            "Loaded deck '{}': {} cards, {} bytes of text, cursor {:?}",
            name,
            repo.len(),
            repo.textbuf_size(),
            repo.cursor()
        );
        Ok(repo)
    }

    /// Rewrite a deck from scratch.
    ///
    /// The new contents go to a temp file in the same directory which is
    /// synced and renamed over the deck, so readers see the old deck or the
    /// new one, never a partial write.
    pub fn save(&self, repo: &Repository) -> Result<()> {
        let path = self.deck_path(repo.name())?;
        let bytes = encode(repo)?;

        let tmp_path = self.write_temp(repo.name(), &bytes)?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        log::debug!("Saved deck '{}' ({} bytes)", repo.name(), bytes.len());
        Ok(())
    }

    /// Write `bytes` to the deck's temp file and sync it. The temp file is
    /// removed again if any step fails.
    fn write_temp(&self, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let tmp_path = self.temp_path(name);
        let result = (|| -> io::Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(bytes)?;
            file.sync_all()
        })();

        match result {
            Ok(()) => Ok(tmp_path),
            Err(e) => {
                let _ = fs::remove_file(&tmp_path);
                Err(e)
            }
        }
    }
}

fn validate_deck_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(RepositoryError::InvalidDeckName(name.to_string()));
    }
    Ok(())
}

fn encode(repo: &Repository) -> io::Result<Vec<u8>> {
    let header = RepoHeader {
        cursor: repo.cursor(),
        textbuf_size: repo.textbuf_size(),
        counts: repo.counts(),
    };

    let mut out = Vec::with_capacity(64 + repo.textbuf_size() + 2 * repo.len());
    codec::write_header(&mut out, &header)?;
    for level in MemoryLevel::ALL {
        for card in repo.cards(level) {
            codec::write_card(&mut out, card.label, card.transcript)?;
        }
    }
    Ok(out)
}

fn decode(name: &str, bytes: &[u8]) -> std::result::Result<Repository, CodecError> {
    let mut reader = RecordReader::new(bytes);
    let header = reader.read_header()?;

    // Declared sizes are only capacity hints, never trust them past the file
    // length. A record takes at least two bytes.
    let capacity = header.textbuf_size.min(bytes.len());
    let mut record_budget = bytes.len() / 2;
    let counts = header.counts.map(|count| {
        let count = count.min(record_budget);
        record_budget -= count;
        count
    });
    let mut repo = Repository::with_capacity(name, capacity, counts);

    for level in MemoryLevel::ALL {
        for _ in 0..header.counts[level.index()] {
            let (label, transcript) = reader.read_card()?;
            repo.push(level, label, transcript);
        }
    }
    reader.finish()?;

    if repo.textbuf_size() != header.textbuf_size {
        return Err(CodecError::SizeMismatch {
            declared: header.textbuf_size,
            actual: repo.textbuf_size(),
        });
    }

    repo.cursor = header.cursor;
    Ok(repo)
}

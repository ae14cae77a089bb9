use std::path::Path;

use anyhow::{Context, Result};

use sword_lib::config::Config;
use sword_lib::flashcards::{Repository, RepositoryStore};

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub store: RepositoryStore,
}

impl App {
    /// Load configuration and point the store at the repositories directory
    pub fn new(repos_dir: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load(path)?,
            None => match Config::default_path() {
                Some(path) => Config::load(&path)?,
                None => Config::default(),
            },
        };

        let repos_dir = config
            .resolve_repos_dir(repos_dir)
            .context("Failed to locate the repositories directory")?;
        log::debug!("Using repositories directory {:?}", repos_dir);

        Ok(Self {
            config,
            store: RepositoryStore::new(repos_dir),
        })
    }

    /// Load a deck
    pub fn load_deck(&self, name: &str) -> Result<Repository> {
        self.store
            .load(name)
            .with_context(|| format!("Failed to load deck '{}'", name))
    }

    /// Write a deck back
    pub fn save_deck(&self, repo: &Repository) -> Result<()> {
        self.store
            .save(repo)
            .with_context(|| format!("Failed to save deck '{}'", repo.name()))
    }

    /// Load a deck, apply `f` and save it if `f` succeeds
    pub fn update_deck<T>(
        &self,
        name: &str,
        f: impl FnOnce(&mut Repository) -> Result<T>,
    ) -> Result<T> {
        let mut repo = self.load_deck(name)?;
        let value = f(&mut repo)?;
        self.save_deck(&repo)?;
        Ok(value)
    }
}

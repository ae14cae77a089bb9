//! User configuration
//!
//! Read from `<config dir>/sword/config.toml`. Every key is optional:
//!
//! ```toml
//! # Where deck files live
//! repos_dir = "/home/me/decks"
//! # Use the full-screen presenter for exams by default
//! interactive = true
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding `repos_dir`
pub const REPOS_DIR_ENV: &str = "SWORD_REPOS_DIR";

const APP_DIR: &str = "sword";
const CONFIG_FILE: &str = "config.toml";
const REPOS_DIR: &str = "repos.d";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Data directory not found")]
    DataDirNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding one file per deck
    pub repos_dir: Option<PathBuf>,
    /// Run exams in the full-screen presenter unless told otherwise
    pub interactive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repos_dir: None,
            interactive: false,
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No config file at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::parse(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolve the repositories directory.
    ///
    /// Precedence, highest first: `cli_override`, `SWORD_REPOS_DIR`, the
    /// config file, `<data dir>/sword/repos.d`.
    pub fn resolve_repos_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let env = std::env::var_os(REPOS_DIR_ENV).filter(|v| !v.is_empty()).map(PathBuf::from);
        resolve_repos_dir(cli_override, env, self.repos_dir.as_deref())
    }
}

fn resolve_repos_dir(
    cli_override: Option<&Path>,
    env: Option<PathBuf>,
    configured: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = cli_override {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env {
        return Ok(dir);
    }
    if let Some(dir) = configured {
        return Ok(dir.to_path_buf());
    }
    default_repos_dir()
}

/// `<data dir>/sword/repos.d`
pub fn default_repos_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_local_dir()
        .map(|p| p.join(APP_DIR).join(REPOS_DIR))
        .ok_or(ConfigError::DataDirNotFound)
}

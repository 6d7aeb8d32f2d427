//! Application configuration
//!
//! Resolution order, later wins:
//! 1. Built-in defaults
//! 2. `config.toml` (default `<config dir>/belajar-seru/config.toml`)
//! 3. `BELAJAR_CONTENT_DIR` / `BELAJAR_DATA_DIR` environment variables
//!
//! Command-line flags are applied on top by the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::FileStorage;

pub const CONTENT_DIR_ENV: &str = "BELAJAR_CONTENT_DIR";
pub const DATA_DIR_ENV: &str = "BELAJAR_DATA_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Where content is read from and progress is written to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root of the `<grade>/<subject>/<topic>` content tree
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    /// Directory holding the progress store
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            data_dir: None,
        }
    }
}

impl AppConfig {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("belajar-seru").join("config.toml"))
    }

    /// Load from `path`, or the default location when `None`
    ///
    /// A missing file yields defaults; an unreadable or malformed one is an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_path(),
        };

        let mut config = match path {
            Some(ref p) if p.exists() => {
                let content = fs::read_to_string(p).map_err(|source| ConfigError::Io {
                    path: p.clone(),
                    source,
                })?;
                log::debug!("Loaded config from {:?}", p);
                Self::from_toml(&content)?
            }
            _ => Self::default(),
        };

        config.apply_env();
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env(&mut self) {
        if let Some(dir) = std::env::var_os(CONTENT_DIR_ENV) {
            self.content_dir = PathBuf::from(dir);
        }
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// The configured data directory, or the platform default
    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileStorage::default_data_dir().map_err(|_| ConfigError::DataDirNotFound),
        }
    }
}

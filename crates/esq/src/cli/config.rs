//! `.esq.toml` discovery and parsing.
//!
//! The config file is looked up in the working directory only. All fields
//! are optional; commands fall back to flags and built-in defaults.

use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILENAME: &str = ".esq.toml";

/// Parsed `.esq.toml` contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset section.
    pub dataset: Option<Dataset>,
    /// Default paging values applied to states that do not set their own.
    pub defaults: Option<Defaults>,
}

/// The `[dataset]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    /// Base URL of the dataset, e.g. `http://localhost:9200/notes/note`.
    pub url: String,
}

/// The `[defaults]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Default page size.
    pub size: Option<u64>,
    /// Default page offset.
    pub from: Option<u64>,
}

/// Errors from loading `.esq.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {CONFIG_FILENAME}: {0}")]
    Read(#[from] io::Error),
    /// The file is not valid TOML for the expected schema.
    #[error("failed to parse {CONFIG_FILENAME}: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Loads `.esq.toml` from the given directory. A missing file yields
    /// the default (empty) config.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// The configured dataset base URL, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.dataset.as_ref().map(|d| d.url.as_str())
    }
}

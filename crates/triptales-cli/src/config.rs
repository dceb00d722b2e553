//! Configuration management for the CLI.
//!
//! The CLI reads the same TOML file as the server. Only the `[store]`,
//! `[review]` and `[janitor]` tables matter here; the optional `[cli]`
//! table holds display settings. Everything else is ignored.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use triptales_domain::review::MAX_REVIEW_NOTE_CHARS;
use triptales_domain::ReviewPolicy;
use triptales_janitor::JanitorConfig;
use triptales_store::StoreConfig;

/// CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store location and capacity
    pub store: StoreConfig,

    /// Moderation rules
    pub review: ReviewSettings,

    /// Sweep settings
    pub janitor: JanitorConfig,

    /// Display settings
    pub cli: Settings,
}

/// Moderation rules shared with the server.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ReviewSettings {
    /// Allow moving decided itineraries to another status
    pub allow_re_review: bool,

    /// Characters kept from a moderator note
    pub max_note_chars: usize,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolve the store directories against `root`.
    ///
    /// Absolute directories in the file are kept as they are.
    pub fn with_root(mut self, root: &Path) -> Self {
        self.store.data_dir = root.join(&self.store.data_dir);
        self.store.proof_dir = root.join(&self.store.proof_dir);
        self
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        self.store.validate().map_err(CliError::Config)?;
        self.janitor.validate().map_err(CliError::Config)?;
        Ok(())
    }
}

impl ReviewSettings {
    /// Transition policy derived from these settings
    pub fn policy(&self) -> ReviewPolicy {
        ReviewPolicy {
            allow_re_review: self.allow_re_review,
        }
    }
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            allow_re_review: true,
            max_note_chars: MAX_REVIEW_NOTE_CHARS,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

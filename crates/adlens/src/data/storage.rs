//! Data directory storage
//!
//! Directory structure:
//! ~/.adlens/
//!   config.yaml          # Last opened file, chart preferences
//!   adlens.log           # Application log

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::util::io::atomic_write;

pub const DEFAULT_BAR_WIDTH: u16 = 9;
pub const DEFAULT_BAR_GAP: u16 = 1;

/// Settings stored in config.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// File reopened on start when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_file: Option<PathBuf>,
    pub bar_width: u16,
    pub bar_gap: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_file: None,
            bar_width: DEFAULT_BAR_WIDTH,
            bar_gap: DEFAULT_BAR_GAP,
        }
    }
}

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {msg}"),
            StorageError::Parse(msg) => write!(f, "Parse error: {msg}"),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Manages the application data directory
#[derive(Debug, Clone)]
pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn config_path(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    /// Create the data directory if it does not exist yet
    pub fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::Io(format!("Failed to create data directory: {e}")))
    }

    /// Load settings, falling back to defaults when no config file exists
    pub fn load_settings(&self) -> Result<Settings, StorageError> {
        let config_path = self.config_path();
        if !config_path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| StorageError::Io(format!("Failed to read config: {e}")))?;

        serde_saphyr::from_str(&content)
            .map_err(|e| StorageError::Parse(format!("Failed to parse config: {e}")))
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        self.init()?;

        let yaml = serde_saphyr::to_string(settings)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize config: {e}")))?;

        atomic_write(&self.config_path(), &yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write config: {e}")))
    }
}

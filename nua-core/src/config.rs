//! Global nua configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;

use crate::cycle::CycleLength;
use crate::error::{CycleError, CycleResult};
use crate::event_store::DEFAULT_UPCOMING_LIMIT;
use crate::persistence::FileStore;

static DEFAULT_DATA_PATH: &str = "~/.nua";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_upcoming_limit() -> usize {
    DEFAULT_UPCOMING_LIMIT
}

fn default_cycle_length() -> u32 {
    CycleLength::DEFAULT.days()
}

/// Configuration at ~/.config/nua/config.toml
#[derive(Debug, Deserialize, Clone)]
pub struct CycleConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// How many events `nua event list` shows by default
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,

    /// Suggested cycle length when configuring interactively
    #[serde(default = "default_cycle_length")]
    pub default_cycle_length: u32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        CycleConfig {
            data_dir: default_data_dir(),
            upcoming_limit: default_upcoming_limit(),
            default_cycle_length: default_cycle_length(),
        }
    }
}

impl CycleConfig {
    pub fn config_path() -> CycleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CycleError::Config("Could not determine config directory".into()))?
            .join("nua");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, creating a commented default file on first run.
    pub fn load() -> CycleResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CycleResult<Self> {
        let config: CycleConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| CycleError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CycleError::Config(e.to_string()))?;

        CycleLength::new(config.default_cycle_length)
            .map_err(|e| CycleError::Config(format!("default_cycle_length: {e}")))?;

        Ok(config)
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Data directory in display-friendly form, keeping `~`.
    pub fn display_path(&self) -> PathBuf {
        self.data_dir.clone()
    }

    pub fn file_store(&self) -> FileStore {
        FileStore::new(self.data_path())
    }

    pub fn default_cycle_length(&self) -> CycleLength {
        CycleLength::new(self.default_cycle_length).unwrap_or_default()
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CycleResult<()> {
        let contents = format!(
            "\
# nua configuration

# Where your cycle data lives:
# data_dir = \"{}\"

# Number of upcoming events to list:
# upcoming_limit = {}

# Cycle length suggested when configuring (21-35):
# default_cycle_length = {}
",
            DEFAULT_DATA_PATH,
            DEFAULT_UPCOMING_LIMIT,
            CycleLength::DEFAULT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CycleError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CycleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

//! Configuration management for the task list.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The binary loads a `.env` file first (via `dotenvy`) and lets command-line
//! flags override whatever the environment says.

use crate::storage::DEFAULT_STORAGE_KEY;
use std::env;
use std::path::PathBuf;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "tasks=warn,tasklist_runtime=warn";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the durable slot files (`TASKS_DATA_DIR`)
    pub data_dir: PathBuf,
    /// Name of the slot holding the collection (`TASKS_STORAGE_KEY`)
    pub storage_key: String,
    /// Tracing filter directives (`RUST_LOG`)
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// Blank values count as unset.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            data_dir: var("TASKS_DATA_DIR")
                .map_or_else(default_data_dir, PathBuf::from),
            storage_key: var("TASKS_STORAGE_KEY")
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            log_filter: var("RUST_LOG")
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Override the data directory
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Override the storage key
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Platform data directory for the app, or `./.tasks` when there is none
#[must_use]
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "tasks")
        .map_or_else(|| PathBuf::from(".tasks"), |dirs| dirs.data_dir().to_path_buf())
}

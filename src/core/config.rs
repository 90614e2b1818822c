//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default Kafka client id sent with every request
pub const DEFAULT_CLIENT_ID: &str = "kshell";

/// Default number of prompt history entries kept in memory
pub const DEFAULT_HISTORY_SIZE: usize = 500;

/// kshell configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bootstrap server address(es), comma separated
    pub server: Option<String>,

    /// Kafka client id
    pub client_id: Option<String>,

    /// Prompt history size
    pub history_size: Option<usize>,

    /// Default output format (table, tsv, json)
    pub format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/kshell/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Environment variables
        config.merge(Self::from_env());

        config
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "kshell")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Parse a config file, skipping it if it is missing or malformed
    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read config file");
                return None;
            }
        };
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config file");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    fn from_env() -> Config {
        Config {
            server: non_empty_env("KSHELL_SERVER"),
            client_id: non_empty_env("KSHELL_CLIENT_ID"),
            ..Config::default()
        }
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.server.is_some() {
            self.server = other.server;
        }
        if other.client_id.is_some() {
            self.client_id = other.client_id;
        }
        if other.history_size.is_some() {
            self.history_size = other.history_size;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
    }

    /// Get the client id, falling back to the built-in default
    pub fn client_id(&self) -> &str {
        self.client_id.as_deref().unwrap_or(DEFAULT_CLIENT_ID)
    }

    pub fn history_size(&self) -> usize {
        self.history_size.unwrap_or(DEFAULT_HISTORY_SIZE)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

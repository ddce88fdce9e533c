use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ragchat_engine::BackendSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cli::CliArgs;
use super::logging::{LogDestination, LogLevel};

pub const DEFAULT_CONFIG_FILENAME: &str = "ragchat.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub backend_url: String,
    pub connect_timeout_secs: u64,
    pub ask_timeout_secs: u64,
    pub upload_timeout_secs: u64,
    pub max_visible_turns: usize,
    pub log_destination: LogDestination,
    pub log_level: LogLevel,
    pub log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let backend = BackendSettings::default();
        Self {
            backend_url: backend.base_url,
            connect_timeout_secs: backend.connect_timeout.as_secs(),
            ask_timeout_secs: backend.ask_timeout.as_secs(),
            upload_timeout_secs: backend.upload_timeout.as_secs(),
            max_visible_turns: 20,
            log_destination: LogDestination::default(),
            log_level: LogLevel::default(),
            log_file: PathBuf::from("ragchat.log"),
        }
    }
}

impl ClientConfig {
    pub fn apply_cli(mut self, args: &CliArgs) -> Self {
        if let Some(url) = &args.backend_url {
            self.backend_url = url.clone();
        }
        if let Some(destination) = args.log {
            self.log_destination = destination;
        }
        if args.verbose {
            self.log_level = LogLevel::Debug;
        }
        self
    }

    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            base_url: self.backend_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            ask_timeout: Duration::from_secs(self.ask_timeout_secs),
            upload_timeout: Duration::from_secs(self.upload_timeout_secs),
        }
    }
}

/// Loads the config file.
///
/// An explicit path must exist. Without one, `./ragchat.ron` is used when
/// present and defaults otherwise. Returns the file that was read, if any.
pub fn load(explicit: Option<&Path>) -> Result<(ClientConfig, Option<PathBuf>), ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILENAME);
            if !default_path.exists() {
                return Ok((ClientConfig::default(), None));
            }
            default_path
        }
    };

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    Ok((config, Some(path)))
}

//! Host configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "unbeatable.toml";

/// Settings for the terminal host and batch commands.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Whether the engine opens new games as X.
    engine_first: bool,

    /// Seed for engine fallback orders; random when absent.
    seed: Option<u64>,

    /// `tracing` filter used when `RUST_LOG` is unset.
    log_filter: String,

    /// Log destination while the terminal UI owns the screen.
    log_file: PathBuf,

    /// Games played by `selfplay` when `--games` is not given.
    selfplay_games: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine_first: false,
            seed: None,
            log_filter: "info".to_string(),
            log_file: PathBuf::from("unbeatable.log"),
            selfplay_games: 100,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.selfplay_games == 0 {
            return Err(ConfigError::new("selfplay_games must be at least 1".to_string()));
        }

        info!(engine_first = config.engine_first, seed = ?config.seed, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `explicit` if given, else [`DEFAULT_CONFIG_PATH`] when it exists.
    ///
    /// A missing explicit path is an error; a missing default path yields
    /// defaults.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Returns a copy with command-line overrides applied.
    pub fn with_overrides(mut self, engine_first: bool, seed: Option<u64>) -> Self {
        self.engine_first |= engine_first;
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

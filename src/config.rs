//! Game configuration loaded from TOML.

use crate::games::word_hunt::{Difficulty, GAME_DURATION};
use crate::store::{DEFAULT_POLL_INTERVAL, DEFAULT_RETENTION};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "word_hunt.toml";

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "WORD_HUNT_CONFIG";

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Word hunt configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Directory of the file-backed result store.
    store_dir: PathBuf,

    /// Length of a game in seconds.
    game_duration_secs: u64,

    /// Period between opponent checks in milliseconds.
    poll_interval_ms: u64,

    /// Days a stored game is kept.
    retention_days: u64,

    /// Board size tier used when none is given.
    difficulty: Difficulty,

    /// Newline-separated word list.
    #[setters(strip_option)]
    word_list: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(".word_hunt"),
            game_duration_secs: GAME_DURATION.as_secs(),
            poll_interval_ms: u64::try_from(DEFAULT_POLL_INTERVAL.as_millis()).unwrap_or(3000),
            retention_days: DEFAULT_RETENTION.as_secs() / SECONDS_PER_DAY,
            difficulty: Difficulty::default(),
            word_list: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(store_dir = %config.store_dir.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the configuration to use.
    ///
    /// An explicit path must be readable. Without one, the file named by
    /// [`CONFIG_ENV_VAR`] is used, then [`DEFAULT_CONFIG_PATH`] if it exists,
    /// then the defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            return Self::from_file(default_path);
        }
        debug!("No config file, using defaults");
        Ok(Self::default())
    }

    /// Length of a game.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.game_duration_secs)
    }

    /// Period between opponent checks.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Retention window of the result store.
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_days.saturating_mul(SECONDS_PER_DAY))
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
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

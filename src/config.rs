//! Application configuration management
//!
//! Server settings are read from environment variables. The competition itself
//! (questions, start time, submit interval, team table) lives in a TOML game file
//! whose path is one of those settings. Everything is loaded and validated at
//! startup, before the server binds.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{
    DEFAULT_GAME_CONFIG_PATH, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SNAPSHOT_PATH,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub ranking: RankingConfig,
    pub game: GameConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Ranking persistence configuration
#[derive(Debug, Clone)]
pub struct RankingConfig {
    /// Snapshot file, overwritten on every board change
    pub snapshot_path: PathBuf,
    /// Rebuild the board from the snapshot file at startup
    pub restore: bool,
}

/// Competition definition loaded from the game file
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GameConfig {
    #[validate(nested)]
    pub game: GameSettings,

    #[validate(length(min = 1), nested)]
    pub questions: Vec<QuestionConfig>,

    #[serde(default)]
    #[validate(nested)]
    pub teams: Vec<TeamConfig>,
}

/// Timing settings of the competition
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GameSettings {
    /// Competition start; question open offsets count from here
    pub start: DateTime<Utc>,

    /// Minimum seconds between two submissions of the same team
    #[validate(range(min = 0.0))]
    pub interval: f64,
}

/// One hidden image
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuestionConfig {
    /// Answer rows separated by single spaces
    #[validate(length(min = 1))]
    pub map: String,

    /// Reward token released to accurate submissions
    #[validate(length(min = 1))]
    pub flag: String,

    /// Seconds after the start before the question accepts submissions
    #[serde(default)]
    pub open: u32,
}

/// Address prefix owned by a team
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TeamConfig {
    #[validate(length(min = 1))]
    pub prefix: String,

    #[validate(length(min = 1))]
    pub name: String,
}

impl Config {
    /// Load configuration from environment variables and the game file they point to
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let game_path =
            env::var("GAME_CONFIG").unwrap_or_else(|_| DEFAULT_GAME_CONFIG_PATH.to_string());

        Ok(Self {
            server: ServerConfig::from_env()?,
            ranking: RankingConfig::from_env()?,
            game: GameConfig::from_file(game_path)?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl RankingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            snapshot_path: PathBuf::from(
                env::var("RANKING_SNAPSHOT_PATH")
                    .unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string()),
            ),
            restore: env::var("RANKING_RESTORE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RANKING_RESTORE".to_string()))?,
        })
    }
}

impl GameConfig {
    /// Read and validate a game file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        raw.parse()
    }

    /// Minimum time between two submissions of one team
    pub fn submit_interval(&self) -> Result<chrono::Duration, ConfigError> {
        let interval = std::time::Duration::try_from_secs_f64(self.game.interval)
            .map_err(|_| ConfigError::InvalidValue("game.interval".to_string()))?;
        chrono::Duration::from_std(interval)
            .map_err(|_| ConfigError::InvalidValue("game.interval".to_string()))
    }
}

impl std::str::FromStr for GameConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: GameConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),

    #[error("Cannot read game file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed game file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid game file: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

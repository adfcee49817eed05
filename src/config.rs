//! Configuration management for Votechain

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::mempool::DEFAULT_BATCH_SIZE;
use crate::miner::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Longest accepted `ledger.mining_timeout_secs` (one week).
pub const MAX_MINING_TIMEOUT_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_difficulty")]
    pub difficulty: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub mining_timeout_secs: Option<u64>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            batch_size: default_batch_size(),
            mining_timeout_secs: None,
        }
    }
}

impl LedgerConfig {
    pub fn mining_timeout(&self) -> Option<Duration> {
        self.mining_timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Check critical values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.difficulty == 0 || self.ledger.difficulty > MAX_DIFFICULTY {
            return Err(ConfigError::Invalid(format!(
                "ledger.difficulty must be between 1 and {}, got {}",
                MAX_DIFFICULTY, self.ledger.difficulty
            )));
        }

        if self.ledger.batch_size == 0 {
            return Err(ConfigError::Invalid("ledger.batch_size must be at least 1".to_string()));
        }

        if let Some(secs) = self.ledger.mining_timeout_secs {
            if secs == 0 || secs > MAX_MINING_TIMEOUT_SECS {
                return Err(ConfigError::Invalid(format!(
                    "ledger.mining_timeout_secs must be between 1 and {}, got {}",
                    MAX_MINING_TIMEOUT_SECS, secs
                )));
            }
        }

        if self.server.host.is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".to_string()));
        }

        Ok(())
    }

    /// `PORT` from the environment overrides `server.port` when it parses.
    pub fn apply_env_overrides(&mut self) {
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from `path`, falling back to defaults when the file does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_difficulty() -> usize {
    DEFAULT_DIFFICULTY
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

//! Configuration management for squonk-bot

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable carrying the bot token
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";

/// Complete bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramBotConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub limits: LimitConfig,
    #[serde(default)]
    pub health: HealthConfig,
}

/// Telegram bot specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramBotConfig {
    /// Bot token from BotFather
    #[serde(default = "default_bot_token")]
    pub bot_token: String,
    /// Skip updates that queued up while the bot was offline
    #[serde(default = "default_true")]
    pub drop_pending_updates: bool,
    /// Long polling parameters
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Long polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Timeout in seconds for long polling
    #[serde(default = "default_polling_timeout")]
    pub timeout: u32,
    /// Maximum number of updates to fetch at once
    #[serde(default = "default_polling_limit")]
    pub limit: u8,
}

/// Where the registry file lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

/// Upload limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    /// Max audio file size in MB (the Bot API serves downloads up to 20 MB)
    #[serde(default = "default_media_max_mb")]
    pub media_max_mb: u64,
}

/// Health check server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_health_port")]
    pub port: u16,
}

/// Source of environment variables, so `from_env` can be tested without
/// touching the process environment.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the process environment
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(&SystemEnv)
    }

    /// Load configuration from environment variables
    pub fn from_env_with(env: &impl ReadEnv) -> Result<Self> {
        let bot_token = env
            .var(BOT_TOKEN_VAR)
            .context("BOT_TOKEN not set")?;

        let data_file = env
            .var("SQUONK_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_file);

        let media_max_mb = env
            .var("SQUONK_MEDIA_MAX_MB")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_media_max_mb);

        let port = env
            .var("HEALTH_CHECK_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_health_port);

        Ok(Config {
            telegram: TelegramBotConfig {
                bot_token,
                drop_pending_updates: default_true(),
                polling: PollingConfig::default(),
            },
            storage: StorageConfig { data_file },
            limits: LimitConfig { media_max_mb },
            health: HealthConfig {
                port,
                ..HealthConfig::default()
            },
        })
    }

    /// Reject configurations the bot cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            bail!("Telegram bot token is empty; set BOT_TOKEN or telegram.bot_token");
        }
        if self.storage.data_file.as_os_str().is_empty() {
            bail!("storage.data_file must not be empty");
        }
        Ok(())
    }
}

impl LimitConfig {
    /// Largest accepted upload in bytes
    pub fn max_bytes(&self) -> u64 {
        self.media_max_mb.saturating_mul(1024 * 1024)
    }
}

fn default_bot_token() -> String {
    std::env::var(BOT_TOKEN_VAR).unwrap_or_default()
}

fn default_true() -> bool {
    true
}

fn default_polling_timeout() -> u32 {
    30
}

fn default_polling_limit() -> u8 {
    100
}

fn default_data_file() -> PathBuf {
    PathBuf::from("songs.json")
}

fn default_media_max_mb() -> u64 {
    20
}

fn default_health_port() -> u16 {
    3000
}

impl Default for TelegramBotConfig {
    fn default() -> Self {
        Self {
            bot_token: default_bot_token(),
            drop_pending_updates: true,
            polling: PollingConfig::default(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            timeout: default_polling_timeout(),
            limit: default_polling_limit(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            media_max_mb: default_media_max_mb(),
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_health_port(),
        }
    }
}

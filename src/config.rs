use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "pixe.la";

pub const API_BASE_ENV: &str = "PIXELA_API_BASE";
pub const USER_TOKEN_ENV: &str = "PIXELA_USER_TOKEN";
pub const USER_NAME_ENV: &str = "PIXELA_USER_NAME";

/// Values persisted in `~/.pi/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default)]
    pub user_token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pi")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    pub fn load_file() -> Config {
        let path = Self::config_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path).unwrap_or_default();
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            Config::default()
        }
    }

    pub fn save_file(&self) -> Result<()> {
        let dir = Self::config_dir();
        std::fs::create_dir_all(&dir)?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::config_path(), content)?;
        Ok(())
    }

    /// Resolve config with priority: CLI flags > env vars > config file > defaults
    pub fn resolve(flag_api_base: Option<&str>, flag_user_token: Option<&str>) -> ResolvedConfig {
        Self::load_file().overlay(flag_api_base, flag_user_token)
    }

    fn overlay(self, flag_api_base: Option<&str>, flag_user_token: Option<&str>) -> ResolvedConfig {
        let api_base = non_empty(flag_api_base.map(str::to_string))
            .or_else(|| env_value(API_BASE_ENV))
            .or_else(|| non_empty(self.api_base))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let token = non_empty(flag_user_token.map(str::to_string))
            .or_else(|| env_value(USER_TOKEN_ENV))
            .or_else(|| non_empty(self.user_token));

        let username = env_value(USER_NAME_ENV).or_else(|| non_empty(self.username));

        ResolvedConfig {
            api_base,
            token,
            username,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn env_value(key: &str) -> Option<String> {
    non_empty(std::env::var(key).ok())
}

/// Configuration handed to request builders and the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub api_base: String,
    pub token: Option<String>,
    pub username: Option<String>,
}

impl ResolvedConfig {
    /// Explicit flag value first, then the configured default username.
    pub fn resolve_username(&self, explicit: Option<&str>) -> Result<String> {
        explicit
            .filter(|u| !u.is_empty())
            .or(self.username.as_deref().filter(|u| !u.is_empty()))
            .map(str::to_string)
            .ok_or(CliError::MissingUsername)
    }

    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(CliError::MissingToken)
    }

    pub fn url(&self, path: &str) -> String {
        format!("https://{}/{}", self.api_base, path)
    }
}

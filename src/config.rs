//! Configuration loading and management for gistr.
//!
//! Loads settings from `gistr.toml` with environment variable overrides for
//! sensitive data. The file is optional; every section falls back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::agent::Provider;

/// Desktop browser identifier sent with page requests. Some sites refuse
/// anything that does not look like a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_5_1) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing required API key for provider: {0}")]
    MissingApiKey(String),
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "AgentConfigFile")]
pub struct AgentConfig {
    /// LLM provider: "groq" or "gemini"
    pub provider: Provider,
    /// Model identifier (e.g., "llama3-8b-8192")
    pub model: String,
    /// Override for the provider's API base URL
    pub base_url: Option<String>,
}

/// `[agent]` as written in the file; a missing model follows the provider
#[derive(Deserialize, Default)]
#[serde(default)]
struct AgentConfigFile {
    provider: Provider,
    model: Option<String>,
    base_url: Option<String>,
}

impl From<AgentConfigFile> for AgentConfig {
    fn from(file: AgentConfigFile) -> Self {
        Self {
            model: file
                .model
                .unwrap_or_else(|| file.provider.default_model().to_string()),
            provider: file.provider,
            base_url: file.base_url,
        }
    }
}

/// API keys configuration (loaded from file or environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub groq_key: Option<String>,
    #[serde(default)]
    pub gemini_key: Option<String>,
}

/// Content retrieval settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Skip TLS certificate verification for web pages.
    pub accept_invalid_certs: bool,
    /// Preferred transcript languages, most preferred first
    pub transcript_languages: Vec<String>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file. The TUI only logs when this is set.
    pub file: Option<PathBuf>,
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from the default location (gistr.toml in cwd or home)
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::parse_file(&path)?,
            None => Config::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::parse_file(path)?;
        config.apply_env();
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Override API keys from environment variables
    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            self.api.groq_key = Some(key);
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.api.gemini_key = Some(key);
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from("gistr.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        let home = dirs::home_dir()?;
        let home_config = home.join(".config").join("gistr").join("gistr.toml");
        home_config.exists().then_some(home_config)
    }

    /// Get the API key for the configured provider
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        let key = match self.agent.provider {
            Provider::Groq => self.api.groq_key.as_deref(),
            Provider::Gemini => self.api.gemini_key.as_deref(),
        };
        key.filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(self.agent.provider.to_string()))
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        let provider = Provider::default();
        Self {
            model: provider.default_model().to_string(),
            provider,
            base_url: None,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout_secs: 30,
            accept_invalid_certs: false,
            transcript_languages: vec!["en".to_string()],
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

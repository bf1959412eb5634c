use anyhow::{anyhow, Result};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub deepseek_api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub use_mock: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deepseek_api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            use_mock: false,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables, or use defaults
    pub fn load() -> Result<Self> {
        Ok(Self::load_with(Self::get_config_path(), |key| std::env::var(key).ok()))
    }

    /// Resolves the config from an already looked-up path and an environment.
    ///
    /// Any failure to find or read the file falls back to defaults; the
    /// environment is applied either way.
    pub fn load_with<F>(path: Result<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = path
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_else(|err| {
                info!("Using default configuration: {}", err);
                Self::default()
            });
        config.apply_env(lookup);
        config
    }

    /// Reads a config file. Missing or malformed files are errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow!("Config file not found: {}", path.display()));
        }
        let content = fs::read_to_string(path).map_err(|err| {
            warn!("Ignoring unreadable config {}: {}", path.display(), err);
            anyhow!("Unreadable config file {}: {}", path.display(), err)
        })?;
        let config: Config = toml::from_str(&content).map_err(|err| {
            warn!("Ignoring malformed config {}: {}", path.display(), err);
            anyhow!("Malformed config file {}: {}", path.display(), err)
        })?;
        info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Environment variables override values from the config file
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup("DEEPSEEK_API_KEY").filter(|k| !k.is_empty()) {
            self.deepseek_api_key = Some(api_key);
        }
        if let Some(model) = lookup("DEEPSEEK_MODEL").filter(|m| !m.is_empty()) {
            self.model = model;
        }
        if let Some(endpoint) = lookup("DEEPSEEK_ENDPOINT").filter(|e| !e.is_empty()) {
            self.endpoint = endpoint;
        }
        if lookup("COMMANDER_USE_MOCK").is_some() {
            self.use_mock = true;
        }
    }

    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }

    pub fn get_config_dir() -> Result<PathBuf> {
        let home = home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
        Ok(home.join(".commander"))
    }

    pub fn get_api_key(&self) -> Option<&str> {
        self.deepseek_api_key.as_deref()
    }

    pub fn is_mock_mode(&self) -> bool {
        self.use_mock
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

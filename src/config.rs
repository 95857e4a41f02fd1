use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default Answer Service endpoint, matching the backend's dev address.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Answer Service
    pub answer_service_url: String,

    /// DataMind home directory (config + diagnostics logs)
    #[serde(skip)]
    pub home_dir: PathBuf,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Animation/poll tick interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { tick_rate_ms: 300 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            answer_service_url: DEFAULT_SERVICE_URL.to_string(),
            home_dir: default_home_dir(),
            ui: UiConfig::default(),
        }
    }
}

fn default_home_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".datamind")
}

impl Config {
    /// Load configuration from `~/.datamind/config.toml`, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&default_home_dir())
    }

    /// Load configuration rooted at an explicit home directory.
    pub fn load_from(home_dir: &Path) -> Result<Self> {
        let config_path = home_dir.join("config.toml");

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            toml::from_str(&content)
                .context("Failed to parse config file")?
        } else {
            Config::default()
        };

        config.home_dir = home_dir.to_path_buf();
        Ok(config)
    }

    /// Save configuration to `<home>/config.toml`.
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.home_dir)
            .context("Failed to create .datamind directory")?;

        let config_path = self.home_dir.join("config.toml");
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(&config_path, content)
            .context("Failed to write config file")?;
        Ok(())
    }

    /// Directory for diagnostics logs.
    pub fn log_dir(&self) -> PathBuf {
        self.home_dir.join("logs")
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Editor settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where `/load`, `/save` and `/upload-image` are served
    pub backend_url: String,
    /// Quiet period after the last edit before autosaving
    pub autosave_delay_ms: u64,
    pub max_upload_bytes: u64,
    /// Shown in empty text blocks
    pub placeholder: String,
    pub save_notice_ms: u64,
    pub error_notice_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            autosave_delay_ms: 1000,
            max_upload_bytes: 5 * 1024 * 1024,
            placeholder: "Write here...".to_string(),
            save_notice_ms: 3000,
            error_notice_ms: 5000,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Allow "$VAR" references in the backend URL
        config.backend_url = Self::expand_env(&config.backend_url).unwrap_or(config.backend_url);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Load the config file. On first run, write the defaults out so there
    /// is a file to edit.
    pub fn load_or_create() -> Result<Self, ConfigError> {
        Self::load_or_create_at(Self::config_path())
    }

    pub fn load_or_create_at<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        if let Some(config) = Self::load_from_path(config_path)? {
            return Ok(config);
        }

        let config = Self::default();
        match config.save_to_path(config_path) {
            Ok(()) => log::info!("Created default config file at {}", config_path.display()),
            Err(e) => log::warn!("Failed to create default config file: {e}"),
        }
        Ok(config)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/article-editor");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    pub fn save_notice(&self) -> Duration {
        Duration::from_millis(self.save_notice_ms)
    }

    pub fn error_notice(&self) -> Duration {
        Duration::from_millis(self.error_notice_ms)
    }

    fn expand_env(value: &str) -> Option<String> {
        match shellexpand::env(value) {
            Ok(expanded) => Some(expanded.into_owned()),
            Err(_) => None,
        }
    }
}

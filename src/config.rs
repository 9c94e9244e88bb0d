use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub const BASE_URL_ENV: &str = "FORMFLOW_BASE_URL";

const APP_DIR: &str = "formflow";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Catalog service the publish wizard posts to.
    pub base_url: String,
    /// Per-request timeout for catalog calls, in seconds.
    pub request_timeout_secs: u64,
    /// Tracing filter used when RUST_LOG is unset.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 10,
            log_filter: "formflow=info".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from the platform config directory, writing defaults
    /// on first run. `FORMFLOW_BASE_URL` overrides the stored base URL.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        let mut settings = Self::load_from(&path)?;
        settings.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|err| ConfigError::LoadFailed {
                path: path.display().to_string(),
                source: Box::new(err),
            })?;
            serde_json::from_str(&content).map_err(|err| ConfigError::LoadFailed {
                path: path.display().to_string(),
                source: Box::new(err),
            })
        } else {
            let settings = Settings::default();
            settings.save_to(path)?;
            info!(path = %path.display(), "created default settings");
            Ok(settings)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| ConfigError::SaveFailed {
                path: path.display().to_string(),
                source: Box::new(err),
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(err),
        })?;
        fs::write(path, json).map_err(|err| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(err),
        })
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn apply_base_url_override(&mut self, value: Option<String>) {
        if let Some(base_url) = value
            && !base_url.is_empty()
        {
            self.base_url = base_url;
        }
    }
}

//! # Shell Configuration
//!
//! ## Load Order (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`bazaar.toml` in the platform config directory)
//! 3. Environment variables (`BAZAAR_*`)
//!
//! ## Example `bazaar.toml`
//! ```toml
//! backend_url = "http://localhost:3000"
//! alert_dismiss_ms = 2000
//! local_storage_path = "/tmp/bazaar/local-storage.json"
//!
//! [layouts]
//! default = "default"
//!
//! [layouts.overrides]
//! "chat/[roomId]" = "fullscreen"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use bazaar_core::router::Layouts;
use bazaar_core::{ALERT_DISMISS_DELAY_MS, DEFAULT_BACKEND_URL};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ShellError, ShellResult};

/// Runtime configuration of the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Base URL handed to HTTP-calling collaborators.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// How long an alert stays open after `show_alert`.
    #[serde(default = "default_alert_dismiss_ms")]
    pub alert_dismiss_ms: u64,

    /// Where local storage is persisted. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_storage_path: Option<PathBuf>,

    /// Path prefix the app is served under.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Layout selection for generated routes.
    #[serde(default)]
    pub layouts: Layouts,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_alert_dismiss_ms() -> u64 {
    ALERT_DISMISS_DELAY_MS
}

fn default_base_path() -> String {
    "/".to_string()
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            backend_url: default_backend_url(),
            alert_dismiss_ms: default_alert_dismiss_ms(),
            local_storage_path: None,
            base_path: default_base_path(),
            layouts: Layouts::default(),
        }
    }
}

impl ShellConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> ShellResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading shell config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load shell config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ShellResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ShellError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Shell config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ShellResult<()> {
        let url = Url::parse(&self.backend_url).map_err(|e| ShellError::InvalidBackendUrl {
            url: self.backend_url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ShellError::InvalidBackendUrl {
                url: self.backend_url.clone(),
                reason: "scheme must be http or https".into(),
            });
        }

        if self.alert_dismiss_ms == 0 {
            return Err(ShellError::InvalidConfig(
                "alert_dismiss_ms must be greater than 0".into(),
            ));
        }

        if !self.base_path.starts_with('/') {
            return Err(ShellError::InvalidConfig(format!(
                "base_path must start with '/', got: {}",
                self.base_path
            )));
        }

        Ok(())
    }

    /// Applies `BAZAAR_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("BAZAAR_BACKEND_URL") {
            debug!(url = %url, "Overriding backend URL from environment");
            self.backend_url = url;
        }

        if let Some(ms) = lookup("BAZAAR_ALERT_DISMISS_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.alert_dismiss_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring non-numeric BAZAAR_ALERT_DISMISS_MS"),
            }
        }

        if let Some(path) = lookup("BAZAAR_LOCAL_STORAGE_PATH") {
            self.local_storage_path = Some(PathBuf::from(path));
        }

        if let Some(base) = lookup("BAZAAR_BASE_PATH") {
            self.base_path = base;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bazaar", "shell")
            .map(|dirs| dirs.config_dir().join("bazaar.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.alert_dismiss_ms)
    }

    /// Resolved local-storage file: the configured path, else
    /// `local-storage.json` in the platform data directory.
    pub fn local_storage_file(&self) -> Option<PathBuf> {
        self.local_storage_path.clone().or_else(|| {
            directories::ProjectDirs::from("com", "bazaar", "shell")
                .map(|dirs| dirs.data_dir().join("local-storage.json"))
        })
    }
}

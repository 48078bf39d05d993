use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Environment variable that takes precedence over `tmdb.api_key`.
pub const API_KEY_ENV: &str = "MARQUEE_TMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub tmdb: TmdbConfig,
    pub discover: DiscoverConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverConfig {
    /// TMDB person whose movies the list screen shows.
    pub person_id: u64,
}

impl AppConfig {
    /// Load from the platform config path, falling back to defaults.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::config_path())
    }

    /// Save to the platform config path.
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::config_path())
    }

    /// Load config: the user file at `path` (if it exists) merged over
    /// built-in defaults.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let mut merged: toml::Value =
            toml::from_str(DEFAULT_CONFIG).map_err(|e| CoreError::Config(e.to_string()))?;

        if path.exists() {
            let user_str = std::fs::read_to_string(path)?;
            let user: toml::Value = toml::from_str(&user_str)
                .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
            merge(&mut merged, user);
            tracing::debug!(path = %path.display(), "loaded user config");
        }

        merged
            .try_into()
            .map_err(|e: toml::de::Error| CoreError::Config(e.to_string()))
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "marquee")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// API key from the environment, falling back to the config file.
    /// `None` when neither is set.
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_api_key(std::env::var(API_KEY_ENV).ok(), &self.tmdb.api_key)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.tmdb.timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

fn resolve_api_key(env: Option<String>, file: &str) -> Option<String> {
    env.filter(|k| !k.trim().is_empty())
        .or_else(|| Some(file.to_string()).filter(|k| !k.trim().is_empty()))
        .map(|k| k.trim().to_string())
}

/// Recursively overlay `overlay` onto `base`; tables merge, everything else replaces.
fn merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

//! Application configuration persisted as TOML under the `.tastecast` root.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, de::Error as SerdeDeError};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default base URL of the prediction service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// App settings loaded from the TOML config file.
///
/// The theme preference deliberately does not live here: it is transient view
/// state that resets on every launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub feature_flags: FeatureFlags,
}

/// Settings for reaching the prediction service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Base URL the prediction and health endpoints are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Probe the service's health endpoint once at startup.
    #[serde(default = "default_true")]
    pub check_health_on_startup: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            check_health_on_startup: true,
        }
    }
}

/// Toggleable features that can be persisted and evolve without breaking old configs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Remember the last submitted recipe and refill the form on launch.
    #[serde(default = "default_true")]
    pub remember_last_recipe: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            remember_last_recipe: true,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceSettings::default(),
            feature_flags: FeatureFlags::default(),
        }
    }
}

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    load_from(&path)
}

/// Persist configuration to disk, overwriting any previous contents.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_path()?;
    save_to_path(config, &path)
}

/// Save configuration to a specific path, creating parent directories as needed.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source: SerdeDeError::custom(source),
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_true() -> bool {
    true
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_dirs::ConfigBaseGuard;
    use tempfile::tempdir;

    #[test]
    fn defaults_point_at_local_service() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.service.base_url, "http://127.0.0.1:8000");
        assert!(cfg.service.check_health_on_startup);
        assert!(cfg.feature_flags.remember_last_recipe);
    }

    #[test]
    fn load_or_default_without_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let _guard = ConfigBaseGuard::set(dir.path().to_path_buf());
        let cfg = load_or_default().unwrap();
        assert_eq!(cfg.service.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        let cfg = AppConfig {
            service: ServiceSettings {
                base_url: "http://10.0.0.5:9000".to_string(),
                check_health_on_startup: false,
            },
            feature_flags: FeatureFlags {
                remember_last_recipe: false,
            },
        };
        save_to_path(&cfg, &path).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.service.base_url, "http://10.0.0.5:9000");
        assert!(!loaded.service.check_health_on_startup);
        assert!(!loaded.feature_flags.remember_last_recipe);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        std::fs::write(&path, "[service]\nbase_url = \"http://host:8000\"\n").unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.service.base_url, "http://host:8000");
        assert!(loaded.service.check_health_on_startup);
        assert!(loaded.feature_flags.remember_last_recipe);
    }

    #[test]
    fn malformed_toml_reports_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        std::fs::write(&path, "[service\nbase_url = 3").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }
}

//! Configuration manager for loading and saving application configuration
//!
//! Configuration lives in %APPDATA%\VcpTune\config.json and is read once at
//! startup. A missing, corrupt, or invariant-violating file falls back to
//! the built-in defaults with a logged warning; the program never refuses
//! to start over configuration.

use crate::config::models::AppConfig;
use crate::error::{Result, StringError, VcpTuneError};
use std::path::PathBuf;
use tracing::{info, warn};

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Get the path to the configuration file
    ///
    /// Returns: %APPDATA%\VcpTune\config.json
    pub fn get_config_path() -> PathBuf {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join("VcpTune").join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_path = Self::get_config_path();
        let config_dir = config_path
            .parent()
            .ok_or_else(|| VcpTuneError::ConfigError(StringError::new("Invalid config path")))?;

        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, fails to parse, or violates
    /// a registry invariant, returns the built-in defaults.
    pub fn load() -> Result<AppConfig> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(AppConfig::default());
        }

        let json = std::fs::read_to_string(&config_path)?;

        let config: AppConfig = match serde_json::from_str(&json) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                return Ok(AppConfig::default());
            }
        };

        if let Err(e) = config.validate() {
            warn!("Configuration rejected, using defaults: {}", e);
            return Ok(AppConfig::default());
        }

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Save configuration to disk with atomic write
    ///
    /// Uses a temporary file and rename to ensure atomic write operation.
    /// Mainly useful for writing a template of the defaults to edit.
    pub fn save(config: &AppConfig) -> Result<()> {
        let config_path = Self::get_config_path();
        let config_dir = Self::ensure_config_dir()?;

        // Atomic write: write to temp file, then rename
        let temp_path = config_dir.join("config.json.tmp");
        let json = serde_json::to_string_pretty(config)?;
        std::fs::write(&temp_path, json)?;
        std::fs::rename(temp_path, config_path)?;

        info!("Configuration saved successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{AppdataGuard, create_test_dir};

    #[test]
    fn test_config_path() {
        let path = ConfigManager::get_config_path();
        assert!(path.to_string_lossy().contains("VcpTune"));
        assert!(path.to_string_lossy().ends_with("config.json"));
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let temp_dir = create_test_dir();
        let _guard = AppdataGuard::new(&temp_dir);

        let config = ConfigManager::load().unwrap();
        assert_eq!(config.monitors.len(), AppConfig::default().monitors.len());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = create_test_dir();
        let _guard = AppdataGuard::new(&temp_dir);

        let mut config = AppConfig::default();
        config.tool_path = PathBuf::from("C:\\tools\\ControlMyMonitor.exe");
        ConfigManager::save(&config).unwrap();

        let loaded = ConfigManager::load().unwrap();
        assert_eq!(loaded.tool_path, config.tool_path);
    }

    #[test]
    fn test_corrupt_config_falls_back_to_defaults() {
        let temp_dir = create_test_dir();
        let _guard = AppdataGuard::new(&temp_dir);

        ConfigManager::ensure_config_dir().unwrap();
        std::fs::write(ConfigManager::get_config_path(), "{not json").unwrap();

        let config = ConfigManager::load().unwrap();
        assert_eq!(config.tool_path, AppConfig::default().tool_path);
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let temp_dir = create_test_dir();
        let _guard = AppdataGuard::new(&temp_dir);

        // Structurally valid JSON that violates the min <= max invariant
        let mut config = AppConfig::default();
        config.features[0].min = 100;
        config.features[0].max = 0;
        ConfigManager::ensure_config_dir().unwrap();
        std::fs::write(
            ConfigManager::get_config_path(),
            serde_json::to_string(&config).unwrap(),
        )
        .unwrap();

        let loaded = ConfigManager::load().unwrap();
        assert_eq!(loaded.features[0].min, AppConfig::default().features[0].min);
    }
}

//! Configuration management for MediaFS.
//!
//! This module provides TOML-based configuration file loading and saving.
//! The default configuration path is `~/.config/mediafs/config.toml`.
//!
//! Everything here is read once at startup: a [`FileSystem`](crate::FileSystem)
//! built from a config never observes later changes to it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use paths::InvalidCharPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("temp_dir must be an absolute path, got {0}")]
    InvalidTempDir(PathBuf),

    #[error("log_level must be one of: trace, debug, info, warn, error; got {0}")]
    InvalidLogLevel(String),
}

/// Valid log level values for tracing configuration.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main configuration structure for MediaFS.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// Filesystem capability configuration.
    pub filesystem: FileSystemConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Filesystem capability configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileSystemConfig {
    /// Whether the host supports asynchronous file handles.
    pub enable_async_io: bool,

    /// Invalid filename character policy ("native" or "strict").
    pub invalid_chars: InvalidCharPolicy,

    /// Directory for temporary files created by swaps.
    pub temp_dir: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for FileSystemConfig {
    fn default() -> Self {
        Self {
            enable_async_io: true,
            invalid_chars: InvalidCharPolicy::Native,
            temp_dir: default_temp_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Returns the default configuration file path.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mediafs")
        .join("config.toml")
}

/// Returns the default directory for temporary files.
pub fn default_temp_dir() -> PathBuf {
    std::env::temp_dir().join("mediafs")
}

/// Parse a boolean environment value.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Apply environment variable overrides to the configuration.
    ///
    /// Environment variables take precedence over config file values.
    /// Supported variables:
    /// - MEDIAFS_ASYNC_IO: Override async file handle support (true/false)
    /// - MEDIAFS_INVALID_CHARS: Override invalid character policy (native/strict)
    /// - MEDIAFS_TEMP_DIR: Override temporary directory
    /// - MEDIAFS_LOG_LEVEL: Override log level (trace, debug, info, warn, error)
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("MEDIAFS_ASYNC_IO") {
            match parse_bool(&value) {
                Some(enabled) => {
                    tracing::info!("Overriding enable_async_io from environment: {}", enabled);
                    self.filesystem.enable_async_io = enabled;
                }
                None => tracing::warn!("Ignoring invalid MEDIAFS_ASYNC_IO value: {}", value),
            }
        }

        if let Ok(value) = std::env::var("MEDIAFS_INVALID_CHARS") {
            match value.parse::<InvalidCharPolicy>() {
                Ok(policy) => {
                    tracing::info!("Overriding invalid_chars from environment: {}", policy);
                    self.filesystem.invalid_chars = policy;
                }
                Err(e) => tracing::warn!("Ignoring MEDIAFS_INVALID_CHARS: {}", e),
            }
        }

        if let Ok(dir) = std::env::var("MEDIAFS_TEMP_DIR") {
            if !dir.is_empty() {
                tracing::info!("Overriding temp_dir from environment: {}", dir);
                self.filesystem.temp_dir = PathBuf::from(dir);
            }
        }

        if let Ok(level) = std::env::var("MEDIAFS_LOG_LEVEL") {
            if !level.is_empty() {
                tracing::info!("Overriding log_level from environment: {}", level);
                self.logging.log_level = level;
            }
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.filesystem.temp_dir.is_absolute() {
            return Err(ConfigError::InvalidTempDir(self.filesystem.temp_dir.clone()));
        }

        let level = self.logging.log_level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.logging.log_level.clone()));
        }

        Ok(())
    }

    /// Load configuration from a file.
    ///
    /// If the file does not exist, returns the default configuration.
    /// If the file exists but is invalid TOML, returns an error with
    /// a helpful message.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self> {
        Self::load(default_config_path())
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| anyhow::anyhow!("Invalid TOML configuration: {}", format_toml_error(&e)))
    }

    /// Save configuration to a file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = self.to_toml()?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::debug!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }
}

/// Format a TOML deserialization error for user-friendly display.
fn format_toml_error(error: &toml::de::Error) -> String {
    let mut msg = error.message().to_string();

    if let Some(span) = error.span() {
        msg.push_str(&format!(" (at position {}..{})", span.start, span.end));
    }

    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    const ENV_VARS: &[&str] = &[
        "MEDIAFS_ASYNC_IO",
        "MEDIAFS_INVALID_CHARS",
        "MEDIAFS_TEMP_DIR",
        "MEDIAFS_LOG_LEVEL",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.filesystem.enable_async_io);
        assert_eq!(config.filesystem.invalid_chars, InvalidCharPolicy::Native);
        assert!(config.filesystem.temp_dir.ends_with("mediafs"));
        assert_eq!(config.logging.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_empty() {
        // Empty TOML should use all defaults
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_toml_partial() {
        let toml = r#"
[filesystem]
invalid_chars = "strict"
"#;
        let config = Config::from_toml(toml).unwrap();

        assert_eq!(config.filesystem.invalid_chars, InvalidCharPolicy::Strict);
        assert!(config.filesystem.enable_async_io);
        assert_eq!(config.logging.log_level, "info");
    }

    #[test]
    fn test_from_toml_full() {
        let toml = r#"
[filesystem]
enable_async_io = false
invalid_chars = "native"
temp_dir = "/var/tmp/mediafs"

[logging]
log_level = "trace"
"#;
        let config = Config::from_toml(toml).unwrap();

        assert!(!config.filesystem.enable_async_io);
        assert_eq!(config.filesystem.invalid_chars, InvalidCharPolicy::Native);
        assert_eq!(config.filesystem.temp_dir, PathBuf::from("/var/tmp/mediafs"));
        assert_eq!(config.logging.log_level, "trace");
    }

    #[test]
    fn test_from_toml_unknown_policy() {
        let toml = r#"
[filesystem]
invalid_chars = "lenient"
"#;
        assert!(Config::from_toml(toml).is_err());
    }

    #[test]
    fn test_from_toml_invalid_syntax() {
        let toml = r#"
[filesystem
enable_async_io = true
"#;
        let result = Config::from_toml(toml);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Invalid TOML"));
    }

    #[test]
    fn test_roundtrip_custom() {
        let mut original = Config::default();
        original.filesystem.enable_async_io = false;
        original.filesystem.invalid_chars = InvalidCharPolicy::Strict;
        original.logging.log_level = "warn".to_string();

        let toml = original.to_toml().unwrap();
        assert!(toml.contains("[filesystem]"));
        assert!(toml.contains("[logging]"));
        assert!(toml.contains("invalid_chars = \"strict\""));

        let loaded = Config::from_toml(&toml).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_validate_relative_temp_dir() {
        let mut config = Config::default();
        config.filesystem.temp_dir = PathBuf::from("relative/tmp");
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidTempDir(PathBuf::from("relative/tmp")))
        );
    }

    #[test]
    fn test_validate_log_level() {
        let mut config = Config::default();
        config.logging.log_level = "DEBUG".to_string();
        assert!(config.validate().is_ok());

        config.logging.log_level = "verbose".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel("verbose".to_string()))
        );
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.filesystem.invalid_chars = InvalidCharPolicy::Strict;
        config.save(&path).unwrap();

        assert!(path.exists());
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_default_config_path() {
        let path = default_config_path();
        assert!(path.ends_with("mediafs/config.toml"));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("MEDIAFS_ASYNC_IO", "false");
        std::env::set_var("MEDIAFS_INVALID_CHARS", "strict");
        std::env::set_var("MEDIAFS_TEMP_DIR", "/srv/tmp");
        std::env::set_var("MEDIAFS_LOG_LEVEL", "debug");

        let mut config = Config::default();
        config.apply_env_overrides();
        clear_env();

        assert!(!config.filesystem.enable_async_io);
        assert_eq!(config.filesystem.invalid_chars, InvalidCharPolicy::Strict);
        assert_eq!(config.filesystem.temp_dir, PathBuf::from("/srv/tmp"));
        assert_eq!(config.logging.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_env_overrides_ignore_invalid_values() {
        clear_env();
        std::env::set_var("MEDIAFS_ASYNC_IO", "maybe");
        std::env::set_var("MEDIAFS_INVALID_CHARS", "lenient");
        std::env::set_var("MEDIAFS_LOG_LEVEL", "");

        let mut config = Config::default();
        config.apply_env_overrides();
        clear_env();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("nope"), None);
    }
}

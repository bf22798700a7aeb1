//! Configuration module for scour
//!
//! Manages persisted defaults: quiet mode, case folding, and the revert
//! policy applied to live buffers that went stale against disk.
//! Configuration is stored in the user's config directory.

use std::fs;
use std::path::PathBuf;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::engine::RevertMode;
use crate::matcher::CaseMode;

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ScourConfig {
    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Default case-folding policy for patterns
    #[serde(default)]
    pub case: CaseMode,

    /// How stale in-memory content is refreshed from disk
    #[serde(default)]
    pub revert_mode: RevertMode,

    /// Glob patterns of files the silent revert mode may reload
    #[serde(default)]
    pub revertible: Vec<String>,
}

impl ScourConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        let scour_config_dir = config_dir.join("scour");
        Ok(scour_config_dir.join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(config_path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Apply a `key=value` setting, returning the normalized value
    ///
    /// Known keys: `quiet`, `case`, `revert-mode`, `revertible`
    /// (comma-separated globs).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys or unparsable values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<String, ConfigError> {
        match key {
            "quiet" => {
                self.quiet = value.parse::<bool>().map_err(|_| {
                    ConfigError::Message(format!(
                        "Invalid value for quiet: '{value}'. Use 'true' or 'false'"
                    ))
                })?;
                Ok(self.quiet.to_string())
            }
            "case" => {
                self.case = match value {
                    "smart" => CaseMode::Smart,
                    "sensitive" => CaseMode::Sensitive,
                    "insensitive" => CaseMode::Insensitive,
                    _ => {
                        return Err(ConfigError::Message(format!(
                            "Invalid value for case: '{value}'. Use smart, sensitive or insensitive"
                        )));
                    }
                };
                Ok(value.to_string())
            }
            "revert-mode" => {
                self.revert_mode = match value {
                    "silent" => RevertMode::Silent,
                    "ask" => RevertMode::AlwaysAsk,
                    "never" => RevertMode::Never,
                    _ => {
                        return Err(ConfigError::Message(format!(
                            "Invalid value for revert-mode: '{value}'. Use silent, ask or never"
                        )));
                    }
                };
                Ok(value.to_string())
            }
            "revertible" => {
                self.revertible = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
                Ok(self.revertible.join(", "))
            }
            _ => Err(ConfigError::Message(format!(
                "Unknown configuration key: '{key}'. Available keys: quiet, case, revert-mode, revertible"
            ))),
        }
    }

    /// Read a setting by key
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "quiet" => Ok(self.quiet.to_string()),
            "case" => Ok(match self.case {
                CaseMode::Smart => "smart",
                CaseMode::Sensitive => "sensitive",
                CaseMode::Insensitive => "insensitive",
            }
            .to_string()),
            "revert-mode" => Ok(match self.revert_mode {
                RevertMode::Silent => "silent",
                RevertMode::AlwaysAsk => "ask",
                RevertMode::Never => "never",
            }
            .to_string()),
            "revertible" => Ok(self.revertible.join(", ")),
            _ => Err(ConfigError::Message(format!(
                "Unknown configuration key: '{key}'. Available keys: quiet, case, revert-mode, revertible"
            ))),
        }
    }
}

//! Configuration management for anytray.
//!
//! Handles loading and saving the TOML configuration file from the
//! platform config directory, validation, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{IndicatorConfig, ListenerConfig},
};

use std::{
    collections::HashSet,
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// UDP listener settings.
    #[serde(default)]
    pub listener: ListenerConfig,
    /// Indicator states and their appearance.
    #[serde(default)]
    pub indicator: IndicatorConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config found, creating default");
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load and parse a configuration file.
    #[track_caller]
    #[instrument]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config = Self::parse(&contents)?;

        info!(config_path = ?path, "Configuration loaded");

        Ok(config)
    }

    /// Parse configuration from TOML text. Missing fields take defaults.
    #[track_caller]
    pub fn parse(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Check the configuration is usable before anything is bound or shown.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn validate(&self) -> AppResult<()> {
        let fail = |reason: String| AppError::ConfigError {
            reason,
            location: ErrorLocation::from(Location::caller()),
        };

        if self.listener.range().is_empty() {
            return Err(fail(format!(
                "Port range starting at {} with size {} contains no usable port",
                self.listener.range_start, self.listener.range_size
            )));
        }

        if self.indicator.states.is_empty() {
            return Err(fail("At least one indicator state must be configured".to_string()));
        }

        let mut seen = HashSet::new();
        for style in &self.indicator.states {
            if !seen.insert(style.name.as_str()) {
                return Err(fail(format!("Duplicate indicator state: {:?}", style.name)));
            }
            if style.rgb().is_none() {
                return Err(fail(format!(
                    "Indicator state {:?} has invalid color {:?}, expected #rrggbb",
                    style.name, style.color
                )));
            }
        }

        if self.indicator.style(&self.indicator.initial_state).is_none() {
            return Err(fail(format!(
                "Initial state {:?} is not a configured indicator state",
                self.indicator.initial_state
            )));
        }

        debug!(states = self.indicator.states.len(), "Configuration valid");

        Ok(())
    }

    /// Save configuration using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Platform project directories for config and logs.
    #[track_caller]
    pub fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "anytray", "AnyTray").ok_or_else(|| AppError::ConfigError {
            reason: "Failed to get project directories".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }
}

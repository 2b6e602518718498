//! JSON Configuration Management
//!
//! Handles reading and writing the application configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_dir};

/// Configuration service for managing app settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: AppConfig,
}

impl ConfigService {
    /// Open ~/.shift-desk/config.json, creating it with defaults if missing
    pub fn new() -> AppResult<Self> {
        Self::open(config_path()?)
    }

    /// Open a config file at an explicit path, creating it with defaults if missing
    pub fn open(config_path: impl Into<PathBuf>) -> AppResult<Self> {
        let service = Self::open_with(config_path.into(), false)?;
        service.config.validate().map_err(AppError::validation)?;
        Ok(service)
    }

    /// Like [`ConfigService::new`], but accepts a stored config that fails
    /// validation so it can be repaired.
    pub fn new_unvalidated() -> AppResult<Self> {
        Self::open_unvalidated(config_path()?)
    }

    /// Open a config file for repair: stored values are kept even when they
    /// fail validation, and a file that does not parse is replaced by
    /// defaults in memory. Nothing is written until an update or reset.
    pub fn open_unvalidated(config_path: impl Into<PathBuf>) -> AppResult<Self> {
        Self::open_with(config_path.into(), true)
    }

    fn open_with(config_path: PathBuf, repair: bool) -> AppResult<Self> {
        if let Some(parent) = config_path.parent() {
            ensure_dir(parent)?;
        }

        let config = if config_path.exists() {
            match Self::read_from_file(&config_path) {
                Ok(config) => config,
                Err(AppError::Serialization(e)) if repair => {
                    tracing::warn!(
                        "[Config] Unreadable config at {}, starting from defaults: {}",
                        config_path.display(),
                        e
                    );
                    AppConfig::default()
                }
                Err(e) => return Err(e),
            }
        } else {
            let default_config = AppConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            tracing::info!(
                "[Config] Created default config at {}",
                config_path.display()
            );
            default_config
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    fn read_from_file(path: &Path) -> AppResult<AppConfig> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load and validate configuration from a file
    fn load_from_file(path: &Path) -> AppResult<AppConfig> {
        let config = Self::read_from_file(path)?;
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &Path, config: &AppConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get the stored configuration
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// The configuration to run with: stored values plus environment overrides.
    pub fn effective_config(&self) -> AppResult<AppConfig> {
        let mut config = self.config.clone();
        config.apply_env_override();
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    /// Update the configuration with a partial update
    ///
    /// The update is validated before anything is written; a rejected update
    /// leaves both memory and disk untouched.
    pub fn update_config(&mut self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let mut next = self.config.clone();
        next.apply_update(update);
        Self::save_to_file(&self.config_path, &next)?;
        self.config = next;
        Ok(self.config.clone())
    }

    /// Save the current configuration to disk
    pub fn save(&self) -> AppResult<()> {
        Self::save_to_file(&self.config_path, &self.config)
    }

    /// Reload configuration from disk
    pub fn reload(&mut self) -> AppResult<()> {
        self.config = Self::load_from_file(&self.config_path)?;
        Ok(())
    }

    /// Reset configuration to defaults
    pub fn reset(&mut self) -> AppResult<()> {
        self.config = AppConfig::default();
        self.save()
    }
}

//! Cross-Platform Path Utilities
//!
//! Resolves the Shift Desk directory (~/.shift-desk/) and files inside it.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Shift Desk directory (~/.shift-desk/)
pub fn shift_desk_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".shift-desk"))
}

/// Get the config file path (~/.shift-desk/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(shift_desk_dir()?.join("config.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

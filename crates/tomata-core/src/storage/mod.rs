mod config;
mod store;

pub use config::{AppConfig, NotificationsConfig, PlayerConfig, TimerConfig};
pub use store::{DataStore, Document, DEBOUNCE};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/tomata[-dev]/` based on TOMATA_ENV.
///
/// Set TOMATA_ENV=dev to use the development data directory.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TOMATA_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tomata-dev")
    } else {
        base_dir.join("tomata")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

mod config;
pub mod database;
mod snapshot;

pub use config::Config;
pub use database::{ArchivedSession, Database};
pub use snapshot::{PersistedSnapshot, PersistenceGateway, SNAPSHOT_KEY};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/flowdoro[-dev]/` based on FLOWDORO_ENV.
///
/// Set FLOWDORO_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FLOWDORO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("flowdoro-dev")
    } else {
        base_dir.join("flowdoro")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}

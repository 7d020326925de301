mod config;
pub mod database;
pub mod kv;
pub mod state;

pub use config::{Config, CountdownConfig, StatsConfig, TagsConfig};
pub use database::SqliteStore;
pub use kv::{KvStore, MemoryStore};

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns the data directory, creating it if needed.
///
/// `FOCUSLOG_DATA_DIR` wins when set. Otherwise `~/.config/focuslog`, or
/// `~/.config/focuslog-dev` when `FOCUSLOG_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = match std::env::var_os("FOCUSLOG_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSLOG_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focuslog-dev")
            } else {
                base_dir.join("focuslog")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StoreError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

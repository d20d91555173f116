mod config;
pub mod database;
pub mod store;

pub use config::{Config, NotificationsConfig, PomodoroConfig};
pub use database::Database;
pub use store::RecordStore;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/timetrack[-dev]/` based on TIMETRACK_ENV, creating it
/// if necessary. TIMETRACK_DATA_DIR overrides the whole path (used by tests
/// to isolate state).
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TIMETRACK_DATA_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TIMETRACK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timetrack-dev")
    } else {
        base_dir.join("timetrack")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

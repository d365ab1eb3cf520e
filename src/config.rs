//! Database location resolution for the CLI.

use std::path::{Path, PathBuf};

/// Environment variable overriding the default database path.
pub const DB_PATH_ENV: &str = "FOCUSBOARD_DB";

/// Resolve the database path: CLI flag first, then `FOCUSBOARD_DB`, then the
/// platform data directory, then `./focusboard.db` as a last resort.
pub fn resolve_db_path(cli_path: Option<&str>) -> PathBuf {
    if let Some(path) = cli_path {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    match dirs::data_dir() {
        Some(dir) => dir.join("focusboard").join("focusboard.db"),
        None => PathBuf::from("focusboard.db"),
    }
}

/// Create the parent directory for the database file if needed.
pub fn ensure_db_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

//! Data directory layout.

use std::path::{Path, PathBuf};

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `FOLIO_DATA_DIR` environment variable
/// 2. `~/.folio` in the user's home directory
/// 3. `.folio` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FOLIO_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".folio");
    }

    PathBuf::from(".folio")
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

pub fn profile_path(data_dir: &Path) -> PathBuf {
    data_dir.join("profile.toml")
}

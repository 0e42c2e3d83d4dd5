//! Site configuration loader for Folio.
//!
//! Reads `config.toml` from the data directory (`~/.folio/` in production)
//! and deserializes it into [`SiteConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use serde::de::DeserializeOwned;

use folio_types::config::SiteConfig;
use folio_types::error::ConfigError;

use crate::filesystem::config_path;

/// Read and parse a TOML file.
///
/// Returns `Ok(None)` when the file does not exist.
pub async fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    };

    toml::from_str(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
}

/// Load site configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`SiteConfig::default()`].
/// - If the file cannot be read or parsed, logs a warning and returns the default.
pub async fn load_site_config(data_dir: &Path) -> SiteConfig {
    let path = config_path(data_dir);

    match read_toml::<SiteConfig>(&path).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            SiteConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            SiteConfig::default()
        }
    }
}

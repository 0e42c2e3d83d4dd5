//! Profile content loader.
//!
//! Reads `profile.toml` from the data directory. When it is absent or
//! malformed the built-in profile compiled into the binary is used instead.

use std::path::Path;

use folio_types::error::ConfigError;
use folio_types::profile::Profile;

use crate::config::read_toml;
use crate::filesystem::profile_path;

const BUILTIN_PROFILE: &str = include_str!("../assets/profile.toml");

/// The profile shipped with the binary.
pub fn builtin_profile() -> Result<Profile, ConfigError> {
    toml::from_str(BUILTIN_PROFILE).map_err(|err| ConfigError::Parse {
        path: "<builtin profile>".to_string(),
        message: err.to_string(),
    })
}

/// Load `{data_dir}/profile.toml`, falling back to [`builtin_profile`].
pub async fn load_profile(data_dir: &Path) -> Result<Profile, ConfigError> {
    let path = profile_path(data_dir);

    match read_toml::<Profile>(&path).await {
        Ok(Some(profile)) => {
            tracing::debug!(name = %profile.name, "loaded profile from {}", path.display());
            Ok(profile)
        }
        Ok(None) => builtin_profile(),
        Err(err) => {
            tracing::warn!("{err}, using built-in profile");
            builtin_profile()
        }
    }
}

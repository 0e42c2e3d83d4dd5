//! Application state shared by the CLI commands.
//!
//! Configuration and profile are loaded once, adjusted by command-line
//! overrides, then frozen behind `Arc`s and handed to each component.

use std::sync::Arc;

use anyhow::Context;

use folio_infra::config::load_site_config;
use folio_infra::filesystem::resolve_data_dir;
use folio_infra::http::HttpChatApi;
use folio_infra::profile::load_profile;
use folio_types::chat::Language;
use folio_types::config::SiteConfig;
use folio_types::profile::Profile;

/// Command-line values that take precedence over `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub language: Option<Language>,
    pub resume_url: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut SiteConfig) {
        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(language) = self.language {
            config.language = language;
        }
        if let Some(resume) = &self.resume_url {
            config.resume_path = resume.clone();
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub profile: Arc<Profile>,
    pub api: HttpChatApi,
}

impl AppState {
    pub async fn init(overrides: &ConfigOverrides) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        let mut config = load_site_config(&data_dir).await;
        overrides.apply(&mut config);

        let profile = load_profile(&data_dir)
            .await
            .context("failed to load profile")?;

        let api = HttpChatApi::from_config(&config).context("failed to create chat client")?;

        tracing::debug!(
            data_dir = %data_dir.display(),
            api = %config.api_base_url,
            language = %config.language,
            "application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            profile: Arc::new(profile),
            api,
        })
    }
}

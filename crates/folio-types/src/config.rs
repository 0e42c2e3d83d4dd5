//! Site configuration types for Folio.
//!
//! `SiteConfig` represents `config.toml`: where the chat API lives, where the
//! resume document is, and the limits shown to the user. It is built once at
//! startup and handed to each component; nothing reads ambient process state
//! after that.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chat::Language;

/// Top-level configuration. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the chat API (`{api_base_url}/api/chat`).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Public site root, used to resolve a relative `resume_path`.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Resume document: absolute URL, or a path relative to `site_url`.
    #[serde(default = "default_resume_path")]
    pub resume_path: String,

    /// Optional booking link shown by `contact`.
    #[serde(default)]
    pub calendar_url: Option<String>,

    #[serde(default)]
    pub language: Language,

    /// Budget shown before the server reports one, and the display denominator.
    #[serde(default = "default_token_limit")]
    pub token_limit: i64,

    /// Delay before the resume document is opened.
    #[serde(default = "default_resume_delay_ms")]
    pub resume_delay_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_site_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_resume_path() -> String {
    "/resume.pdf".to_string()
}

fn default_token_limit() -> i64 {
    50
}

fn default_resume_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            site_url: default_site_url(),
            resume_path: default_resume_path(),
            calendar_url: None,
            language: Language::default(),
            token_limit: default_token_limit(),
            resume_delay_ms: default_resume_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl SiteConfig {
    /// The resume location as an openable URL.
    pub fn resume_url(&self) -> String {
        let path = self.resume_path.trim();
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.site_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    pub fn resume_delay(&self) -> Duration {
        Duration::from_millis(self.resume_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

//! Chat message and wire types for Folio.
//!
//! These types model a conversation with the remote assistant: the local
//! append-only message log, and the JSON shapes exchanged with
//! `POST /api/chat` and `GET /api/chat/usage`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// Interface language for requests and localized notices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pt,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "pt" => Ok(Language::Pt),
            other => Err(format!("unsupported language: '{other}' (expected 'en' or 'pt')")),
        }
    }
}

/// A single message in the local conversation log.
///
/// Created once (at send time for the user, at arrival time for the
/// assistant) and never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: Option<String>,
    pub language: Language,
}

/// Successful body of `POST /api/chat`.
///
/// The reply text is accepted under either `message` or `response`.
/// Identity and budget are optional so a server that omits them leaves the
/// local values untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(alias = "response")]
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub tokens_remaining: Option<i64>,
    #[serde(default = "default_on_topic")]
    pub is_on_topic: bool,
    #[serde(default)]
    pub tokens_used: Option<i64>,
    #[serde(default)]
    pub agent_used: Option<String>,
}

fn default_on_topic() -> bool {
    true
}

/// Body of `GET /api/chat/usage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    pub tokens_remaining: i64,
}

/// Optional structured error body on non-2xx responses.
///
/// `error` is the documented field; `detail` is what framework-raised HTTP
/// exceptions carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The user-facing message, if the body carried one.
    pub fn message(&self) -> Option<String> {
        if let Some(error) = self.error.as_ref().filter(|e| !e.trim().is_empty()) {
            return Some(error.clone());
        }
        match &self.detail {
            Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => {
                Some(detail.clone())
            }
            _ => None,
        }
    }
}

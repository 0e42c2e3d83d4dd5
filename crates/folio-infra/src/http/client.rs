//! HttpChatApi -- concrete [`ChatApi`] implementation over the portfolio
//! backend's JSON API.
//!
//! `POST {base}/api/chat` sends a message, `GET {base}/api/chat/usage`
//! reports the remaining daily budget.

use std::time::Duration;

use reqwest::StatusCode;

use folio_core::chat::api::ChatApi;
use folio_types::chat::{ChatReply, ChatRequest, ErrorBody, UsageReport};
use folio_types::config::SiteConfig;
use folio_types::error::ChatError;

/// Chat backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Transport(format!("failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &SiteConfig) -> Result<Self, ChatError> {
        Self::new(config.api_base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map a non-success response onto the chat error taxonomy.
async fn classify_failure(response: reqwest::Response) -> ChatError {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ChatError::RateLimited;
    }

    let body = response.text().await.unwrap_or_default();
    let structured = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message());

    match structured {
        Some(message) => ChatError::Server {
            status: status.as_u16(),
            message,
        },
        None => ChatError::Transport(format!("HTTP {status}")),
    }
}

impl ChatApi for HttpChatApi {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Transport(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let err = classify_failure(response).await;
            tracing::debug!(error = %err, "chat endpoint returned an error");
            return Err(err);
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| ChatError::Transport(format!("failed to parse response: {e}")))?;

        tracing::debug!(
            tokens_used = ?reply.tokens_used,
            agent_used = ?reply.agent_used,
            "chat reply decoded"
        );
        Ok(reply)
    }

    async fn fetch_usage(&self) -> Result<UsageReport, ChatError> {
        let response = self
            .client
            .get(self.url("/api/chat/usage"))
            .send()
            .await
            .map_err(|e| ChatError::Transport(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(classify_failure(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ChatError::Transport(format!("failed to parse usage: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use folio_types::chat::Language;
    use serde_json::{Value, json};

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn api(base: &str) -> HttpChatApi {
        HttpChatApi::new(base, Duration::from_secs(5)).unwrap()
    }

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            conversation_id: None,
            language: Language::En,
        }
    }

    #[tokio::test]
    async fn test_send_message_success() {
        let router = Router::new().route(
            "/api/chat",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["language"], "en");
                assert!(body["conversation_id"].is_null());
                Json(json!({
                    "message": format!("echo: {}", body["message"].as_str().unwrap_or_default()),
                    "conversation_id": "abc",
                    "tokens_remaining": 49,
                    "is_on_topic": true,
                    "tokens_used": 120,
                    "agent_used": "profile"
                }))
            }),
        );
        let base = spawn_server(router).await;

        let reply = api(&base).send_message(&request("hello")).await.unwrap();

        assert_eq!(reply.message, "echo: hello");
        assert_eq!(reply.conversation_id.as_deref(), Some("abc"));
        assert_eq!(reply.tokens_remaining, Some(49));
        assert!(reply.is_on_topic);
        assert_eq!(reply.agent_used.as_deref(), Some("profile"));
    }

    #[tokio::test]
    async fn test_send_message_accepts_response_alias() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async {
                Json(json!({
                    "response": "Hi",
                    "conversation_id": "abc",
                    "tokens_remaining": 10,
                    "is_on_topic": false
                }))
            }),
        );
        let base = spawn_server(router).await;

        let reply = api(&base).send_message(&request("x")).await.unwrap();

        assert_eq!(reply.message, "Hi");
        assert!(!reply.is_on_topic);
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async { (AxumStatus::TOO_MANY_REQUESTS, Json(json!({"error": "slow down"}))) }),
        );
        let base = spawn_server(router).await;

        let err = api(&base).send_message(&request("x")).await.unwrap_err();

        assert_eq!(err, ChatError::RateLimited);
    }

    #[tokio::test]
    async fn test_structured_error_field() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async {
                (
                    AxumStatus::BAD_REQUEST,
                    Json(json!({"error": "Message contains blocked content"})),
                )
            }),
        );
        let base = spawn_server(router).await;

        let err = api(&base).send_message(&request("x")).await.unwrap_err();

        assert_eq!(
            err,
            ChatError::Server {
                status: 400,
                message: "Message contains blocked content".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_structured_detail_field() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async {
                (
                    AxumStatus::SERVICE_UNAVAILABLE,
                    Json(json!({"detail": "Chat service temporarily unavailable"})),
                )
            }),
        );
        let base = spawn_server(router).await;

        let err = api(&base).send_message(&request("x")).await.unwrap_err();

        assert_eq!(
            err,
            ChatError::Server {
                status: 503,
                message: "Chat service temporarily unavailable".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_error_without_body_is_transport() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async { AxumStatus::INTERNAL_SERVER_ERROR }),
        );
        let base = spawn_server(router).await;

        let err = api(&base).send_message(&request("x")).await.unwrap_err();

        assert!(matches!(err, ChatError::Transport(ref m) if m.contains("500")));
    }

    #[tokio::test]
    async fn test_malformed_reply_is_transport() {
        let router = Router::new().route("/api/chat", post(|| async { "not json" }));
        let base = spawn_server(router).await;

        let err = api(&base).send_message(&request("x")).await.unwrap_err();

        assert!(matches!(err, ChatError::Transport(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = api(&format!("http://{addr}"))
            .send_message(&request("x"))
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::Transport(_)));
        assert!(!err.is_remote());
    }

    #[tokio::test]
    async fn test_fetch_usage() {
        let router = Router::new().route(
            "/api/chat/usage",
            get(|| async { Json(json!({"tokens_remaining": 42, "tokens_used": 8})) }),
        );
        let base = spawn_server(router).await;

        let usage = api(&base).fetch_usage().await.unwrap();

        assert_eq!(usage.tokens_remaining, 42);
    }

    #[tokio::test]
    async fn test_fetch_usage_rate_limited() {
        let router = Router::new().route(
            "/api/chat/usage",
            get(|| async { AxumStatus::TOO_MANY_REQUESTS }),
        );
        let base = spawn_server(router).await;

        let err = api(&base).fetch_usage().await.unwrap_err();

        assert_eq!(err, ChatError::RateLimited);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpChatApi::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.url("/api/chat"), "http://localhost:8000/api/chat");
    }
}

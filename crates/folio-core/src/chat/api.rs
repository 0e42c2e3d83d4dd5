//! ChatApi trait definition.
//!
//! The port between the chat session and whatever carries requests to the
//! assistant. Uses native async fn in traits (RPITIT, Rust 2024 edition).
//!
//! Implementations live in folio-infra (e.g., `HttpChatApi`).

use std::future::Future;

use folio_types::chat::{ChatReply, ChatRequest, UsageReport};
use folio_types::error::ChatError;

/// Trait for remote assistant backends.
///
/// Implementations classify failures into [`ChatError`] variants; the
/// session decides how to present them.
pub trait ChatApi: Send + Sync {
    /// `POST /api/chat`.
    fn send_message(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, ChatError>> + Send;

    /// `GET /api/chat/usage`.
    fn fetch_usage(&self) -> impl Future<Output = Result<UsageReport, ChatError>> + Send;
}

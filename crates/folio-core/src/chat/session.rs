//! Chat session state machine.
//!
//! A session owns the message log, the server-assigned conversation id and
//! the server-authoritative token budget. At most one request is in flight
//! at a time: a send issued while another is pending is rejected, never
//! queued.
//!
//! Sending is split into [`ChatSession::begin_send`] and
//! [`ChatSession::complete_send`] so an event loop can keep handling input
//! while the request is outstanding. [`ChatSession::send`] and
//! [`ChatSession::send_with_cancel`] drive both halves for callers that just
//! want to await the exchange.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use folio_types::chat::{ChatMessage, ChatReply, ChatRequest, Language};
use folio_types::config::SiteConfig;
use folio_types::error::ChatError;
use folio_types::profile::Profile;
use tokio_util::sync::CancellationToken;

use super::api::ChatApi;
use super::notice;

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
}

/// Why a send was refused before anything was appended or transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendRejection {
    EmptyMessage,
    InFlight,
    BudgetExhausted,
    TooLong { len: usize, max: usize },
    Closed,
}

impl std::fmt::Display for SendRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "message is empty"),
            Self::InFlight => write!(f, "a request is already in flight"),
            Self::BudgetExhausted => write!(f, "token budget exhausted"),
            Self::TooLong { len, max } => {
                write!(f, "message is {len} characters, the limit is {max}")
            }
            Self::Closed => write!(f, "session is closed"),
        }
    }
}

impl std::error::Error for SendRejection {}

/// How an accepted send ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The assistant replied. `off_topic` mirrors the server's verdict.
    Delivered { off_topic: bool },
    /// The request failed; the classified message was appended to the log.
    Failed(ChatError),
    /// The request was abandoned and its result discarded.
    Cancelled,
}

/// Clears the in-flight flag when dropped.
#[derive(Debug)]
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// A request that has been accepted but not yet resolved.
///
/// Holding a `PendingSend` keeps the session in [`SessionState::Sending`];
/// dropping it (resolved or not) returns the session to `Idle`. Only the
/// issuing session applies its result; any other session discards it.
#[derive(Debug)]
pub struct PendingSend {
    request: ChatRequest,
    guard: InFlightGuard,
}

impl PendingSend {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    fn is_from(&self, session: &ChatSession) -> bool {
        Arc::ptr_eq(&self.guard.flag, &session.in_flight)
    }
}

/// One conversation with the remote assistant.
#[derive(Debug)]
pub struct ChatSession {
    language: Language,
    first_name: String,
    messages: Vec<ChatMessage>,
    conversation_id: Option<String>,
    tokens_remaining: i64,
    warning: Option<String>,
    in_flight: Arc<AtomicBool>,
    closed: bool,
}

impl ChatSession {
    pub fn new(profile: &Profile, config: &SiteConfig) -> Self {
        Self {
            language: config.language,
            first_name: profile.first_name().to_string(),
            messages: Vec::new(),
            conversation_id: None,
            tokens_remaining: config.token_limit,
            warning: None,
            in_flight: Arc::new(AtomicBool::new(false)),
            closed: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn tokens_remaining(&self) -> i64 {
        self.tokens_remaining
    }

    /// The current warning banner, if any.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn state(&self) -> SessionState {
        if self.in_flight.load(Ordering::Acquire) {
            SessionState::Sending
        } else {
            SessionState::Idle
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether a send would currently be accepted (ignoring message content).
    pub fn can_send(&self) -> bool {
        !self.closed && self.state() == SessionState::Idle && self.tokens_remaining > 0
    }

    /// Tear the session down. Later sends are rejected and late results are discarded.
    pub fn close(&mut self) {
        self.closed = true;
        tracing::debug!(conversation_id = ?self.conversation_id, "chat session closed");
    }

    /// Check whether `text` would be accepted right now, without sending it.
    pub fn check_send(&self, text: &str) -> Result<(), SendRejection> {
        if self.closed {
            return Err(SendRejection::Closed);
        }
        if text.trim().is_empty() {
            return Err(SendRejection::EmptyMessage);
        }
        if self.state() == SessionState::Sending {
            return Err(SendRejection::InFlight);
        }
        if self.tokens_remaining <= 0 {
            return Err(SendRejection::BudgetExhausted);
        }
        let len = text.chars().count();
        if len > notice::MAX_MESSAGE_CHARS {
            return Err(SendRejection::TooLong {
                len,
                max: notice::MAX_MESSAGE_CHARS,
            });
        }
        Ok(())
    }

    /// Validate `text`, append it as a user message and mark the session in flight.
    pub fn begin_send(&mut self, text: &str) -> Result<PendingSend, SendRejection> {
        self.check_send(text)?;

        self.in_flight.store(true, Ordering::Release);
        let guard = InFlightGuard {
            flag: Arc::clone(&self.in_flight),
        };

        self.messages.push(ChatMessage::user(text));
        self.warning = None;

        Ok(PendingSend {
            request: ChatRequest {
                message: text.to_string(),
                conversation_id: self.conversation_id.clone(),
                language: self.language,
            },
            guard,
        })
    }

    /// Apply the result of a pending request to the session.
    pub fn complete_send(
        &mut self,
        pending: PendingSend,
        result: Result<ChatReply, ChatError>,
    ) -> SendOutcome {
        if !pending.is_from(self) {
            tracing::warn!("discarding chat result issued by another session");
            return SendOutcome::Cancelled;
        }
        if self.closed {
            tracing::debug!("discarding chat result for closed session");
            drop(pending);
            return SendOutcome::Cancelled;
        }

        let outcome = match result {
            Ok(reply) => {
                self.messages.push(ChatMessage::assistant(reply.message));
                if let Some(id) = reply.conversation_id {
                    self.conversation_id = Some(id);
                }
                if let Some(remaining) = reply.tokens_remaining {
                    self.tokens_remaining = remaining;
                }
                let off_topic = !reply.is_on_topic;
                if off_topic {
                    self.warning = Some(notice::off_topic(self.language, &self.first_name));
                }
                tracing::debug!(
                    conversation_id = ?self.conversation_id,
                    tokens_remaining = self.tokens_remaining,
                    off_topic,
                    "chat reply received"
                );
                SendOutcome::Delivered { off_topic }
            }
            Err(err) => {
                tracing::warn!(error = %err, remote = err.is_remote(), "chat request failed");
                let message = notice::failure_message(&err, self.language);
                self.warning = Some(message.clone());
                self.messages.push(ChatMessage::assistant(message));
                SendOutcome::Failed(err)
            }
        };

        drop(pending);
        outcome
    }

    /// Give up on a pending request without touching the log.
    pub fn abandon_send(&mut self, pending: PendingSend) -> SendOutcome {
        if !pending.is_from(self) {
            tracing::warn!("ignoring abandon for a request issued by another session");
            return SendOutcome::Cancelled;
        }
        drop(pending);
        if !self.closed {
            self.warning = Some(notice::cancelled(self.language).to_string());
        }
        tracing::debug!("chat request abandoned");
        SendOutcome::Cancelled
    }

    /// Send `text` and wait for the exchange to finish.
    pub async fn send<A: ChatApi>(
        &mut self,
        api: &A,
        text: &str,
    ) -> Result<SendOutcome, SendRejection> {
        let pending = self.begin_send(text)?;
        let result = api.send_message(pending.request()).await;
        Ok(self.complete_send(pending, result))
    }

    /// Like [`send`](Self::send), but abandons the request once `cancel` fires.
    pub async fn send_with_cancel<A: ChatApi>(
        &mut self,
        api: &A,
        text: &str,
        cancel: CancellationToken,
    ) -> Result<SendOutcome, SendRejection> {
        let pending = self.begin_send(text)?;
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = api.send_message(pending.request()) => Some(result),
        };
        Ok(match result {
            Some(result) => self.complete_send(pending, result),
            None => self.abandon_send(pending),
        })
    }

    /// Refresh the budget from the server. Failures are logged and ignored.
    pub async fn fetch_usage<A: ChatApi>(&mut self, api: &A) {
        match api.fetch_usage().await {
            Ok(usage) => {
                self.tokens_remaining = usage.tokens_remaining;
                tracing::debug!(tokens_remaining = usage.tokens_remaining, "usage refreshed");
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch token usage");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use folio_types::chat::{MessageRole, UsageReport};

    use crate::terminal::output::tests::sample_profile;

    /// Replays a fixed script of results and counts calls.
    struct ScriptedApi {
        replies: Mutex<Vec<Result<ChatReply, ChatError>>>,
        usage: Result<UsageReport, ChatError>,
        calls: AtomicUsize,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedApi {
        fn new(replies: Vec<Result<ChatReply, ChatError>>) -> Self {
            let mut replies = replies;
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                usage: Err(ChatError::Transport("unreachable".to_string())),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn with_usage(mut self, usage: Result<UsageReport, ChatError>) -> Self {
            self.usage = usage;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ChatApi for ScriptedApi {
        fn send_message(
            &self,
            request: &ChatRequest,
        ) -> impl Future<Output = Result<ChatReply, ChatError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            let next = self
                .replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(ChatError::Transport("script exhausted".to_string())));
            async move { next }
        }

        fn fetch_usage(&self) -> impl Future<Output = Result<UsageReport, ChatError>> + Send {
            let usage = self.usage.clone();
            async move { usage }
        }
    }

    /// Never resolves.
    struct HangingApi;

    impl ChatApi for HangingApi {
        fn send_message(
            &self,
            _request: &ChatRequest,
        ) -> impl Future<Output = Result<ChatReply, ChatError>> + Send {
            std::future::pending()
        }

        fn fetch_usage(&self) -> impl Future<Output = Result<UsageReport, ChatError>> + Send {
            std::future::pending()
        }
    }

    fn reply(message: &str, id: &str, remaining: i64, on_topic: bool) -> ChatReply {
        ChatReply {
            message: message.to_string(),
            conversation_id: Some(id.to_string()),
            tokens_remaining: Some(remaining),
            is_on_topic: on_topic,
            tokens_used: None,
            agent_used: None,
        }
    }

    fn session() -> ChatSession {
        ChatSession::new(&sample_profile(), &SiteConfig::default())
    }

    #[test]
    fn test_new_session_defaults() {
        let s = session();
        assert_eq!(s.tokens_remaining(), 50);
        assert!(s.conversation_id().is_none());
        assert!(s.messages().is_empty());
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.can_send());
    }

    #[tokio::test]
    async fn test_successful_exchange() {
        let api = ScriptedApi::new(vec![Ok(reply("Hi", "abc", 49, true))]);
        let mut s = session();

        let outcome = s.send(&api, "hello").await.unwrap();

        assert_eq!(outcome, SendOutcome::Delivered { off_topic: false });
        assert_eq!(s.messages().len(), 2);
        assert_eq!(s.messages()[0].role, MessageRole::User);
        assert_eq!(s.messages()[0].content, "hello");
        assert_eq!(s.messages()[1].role, MessageRole::Assistant);
        assert_eq!(s.messages()[1].content, "Hi");
        assert_eq!(s.conversation_id(), Some("abc"));
        assert_eq!(s.tokens_remaining(), 49);
        assert!(s.warning().is_none());
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_conversation_id_carried_on_next_request() {
        let api = ScriptedApi::new(vec![
            Ok(reply("one", "abc", 49, true)),
            Ok(reply("two", "abc", 48, true)),
        ]);
        let mut s = session();

        s.send(&api, "first").await.unwrap();
        s.send(&api, "second").await.unwrap();

        let requests = api.requests.lock().unwrap();
        assert_eq!(requests[0].conversation_id, None);
        assert_eq!(requests[1].conversation_id.as_deref(), Some("abc"));
        assert_eq!(s.tokens_remaining(), 48);
    }

    #[tokio::test]
    async fn test_missing_reply_fields_keep_prior_values() {
        let api = ScriptedApi::new(vec![
            Ok(reply("one", "abc", 40, true)),
            Ok(ChatReply {
                message: "two".to_string(),
                conversation_id: None,
                tokens_remaining: None,
                is_on_topic: true,
                tokens_used: Some(12),
                agent_used: Some("profile".to_string()),
            }),
        ]);
        let mut s = session();

        s.send(&api, "a").await.unwrap();
        s.send(&api, "b").await.unwrap();

        assert_eq!(s.conversation_id(), Some("abc"));
        assert_eq!(s.tokens_remaining(), 40);
    }

    #[tokio::test]
    async fn test_rate_limited_appends_localized_message() {
        let api = ScriptedApi::new(vec![Err(ChatError::RateLimited)]);
        let mut s = session();

        let outcome = s.send(&api, "x").await.unwrap();

        assert_eq!(outcome, SendOutcome::Failed(ChatError::RateLimited));
        assert_eq!(s.messages().len(), 2);
        let last = s.messages().last().unwrap();
        assert_eq!(last.role, MessageRole::Assistant);
        assert_eq!(last.content, "Rate limit exceeded. Please try again later.");
        assert_eq!(s.warning(), Some(last.content.as_str()));
        assert_eq!(s.tokens_remaining(), 50);
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_rate_limited_portuguese() {
        let api = ScriptedApi::new(vec![Err(ChatError::RateLimited)]);
        let config = SiteConfig {
            language: Language::Pt,
            ..SiteConfig::default()
        };
        let mut s = ChatSession::new(&sample_profile(), &config);

        s.send(&api, "x").await.unwrap();

        assert_eq!(
            s.messages().last().unwrap().content,
            "Limite de taxa excedido. Tente novamente mais tarde."
        );
    }

    #[tokio::test]
    async fn test_server_error_shown_verbatim() {
        let api = ScriptedApi::new(vec![Err(ChatError::Server {
            status: 400,
            message: "Message contains blocked content".to_string(),
        })]);
        let mut s = session();

        s.send(&api, "x").await.unwrap();

        assert_eq!(
            s.messages().last().unwrap().content,
            "Message contains blocked content"
        );
        assert_eq!(s.warning(), Some("Message contains blocked content"));
    }

    #[tokio::test]
    async fn test_transport_error_is_generic() {
        let api = ScriptedApi::new(vec![Err(ChatError::Transport(
            "connection refused".to_string(),
        ))]);
        let mut s = session();

        s.send(&api, "x").await.unwrap();

        assert_eq!(
            s.messages().last().unwrap().content,
            "Failed to send message. Please try again."
        );
    }

    #[tokio::test]
    async fn test_off_topic_warns_but_keeps_reply() {
        let api = ScriptedApi::new(vec![Ok(reply("I only know about Ada.", "abc", 45, false))]);
        let mut s = session();

        let outcome = s.send(&api, "what's the weather?").await.unwrap();

        assert_eq!(outcome, SendOutcome::Delivered { off_topic: true });
        assert_eq!(s.messages().last().unwrap().content, "I only know about Ada.");
        assert_eq!(
            s.warning(),
            Some("Off-topic question - I can only answer about Ada")
        );
    }

    #[tokio::test]
    async fn test_warning_cleared_on_next_send() {
        let api = ScriptedApi::new(vec![
            Err(ChatError::RateLimited),
            Ok(reply("Hi", "abc", 49, true)),
        ]);
        let mut s = session();

        s.send(&api, "x").await.unwrap();
        assert!(s.warning().is_some());

        s.send(&api, "y").await.unwrap();
        assert!(s.warning().is_none());
    }

    #[tokio::test]
    async fn test_exhausted_budget_never_calls_api() {
        let api = ScriptedApi::new(vec![Ok(reply("Hi", "abc", 0, true))]);
        let config = SiteConfig {
            token_limit: 0,
            ..SiteConfig::default()
        };
        let mut s = ChatSession::new(&sample_profile(), &config);

        let result = s.send(&api, "hello").await;

        assert_eq!(result, Err(SendRejection::BudgetExhausted));
        assert!(s.messages().is_empty());
        assert_eq!(api.calls(), 0);
        assert!(!s.can_send());
    }

    #[tokio::test]
    async fn test_budget_reaching_zero_blocks_further_sends() {
        let api = ScriptedApi::new(vec![Ok(reply("Hi", "abc", 0, true))]);
        let mut s = session();

        s.send(&api, "hello").await.unwrap();
        let result = s.send(&api, "again").await;

        assert_eq!(result, Err(SendRejection::BudgetExhausted));
        assert_eq!(s.messages().len(), 2);
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let api = ScriptedApi::new(vec![]);
        let mut s = session();

        assert_eq!(s.send(&api, "").await, Err(SendRejection::EmptyMessage));
        assert_eq!(s.send(&api, "   \n").await, Err(SendRejection::EmptyMessage));
        assert!(s.messages().is_empty());
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn test_too_long_message_rejected() {
        let api = ScriptedApi::new(vec![]);
        let mut s = session();
        let text = "a".repeat(1001);

        let result = s.send(&api, &text).await;

        assert_eq!(result, Err(SendRejection::TooLong { len: 1001, max: 1000 }));
        assert!(s.messages().is_empty());

        // Exactly at the limit is fine.
        let api = ScriptedApi::new(vec![Ok(reply("ok", "abc", 49, true))]);
        assert!(s.send(&api, &"a".repeat(1000)).await.is_ok());
    }

    #[test]
    fn test_second_send_while_pending_is_rejected() {
        let mut s = session();

        let pending = s.begin_send("first").unwrap();
        assert_eq!(s.state(), SessionState::Sending);
        assert_eq!(pending.request().message, "first");

        assert_eq!(s.check_send("second"), Err(SendRejection::InFlight));
        let second = s.begin_send("second");
        assert!(matches!(second, Err(SendRejection::InFlight)));
        assert_eq!(s.messages().len(), 1);

        let outcome = s.complete_send(pending, Ok(reply("Hi", "abc", 49, true)));
        assert_eq!(outcome, SendOutcome::Delivered { off_topic: false });
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.begin_send("third").is_ok());
    }

    #[test]
    fn test_dropping_pending_returns_to_idle() {
        let mut s = session();

        let pending = s.begin_send("first").unwrap();
        assert!(!s.can_send());
        drop(pending);

        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.can_send());
    }

    #[tokio::test]
    async fn test_dropped_send_future_returns_to_idle() {
        let mut s = session();
        let api = HangingApi;

        {
            let fut = s.send(&api, "hello");
            let timed = tokio::time::timeout(std::time::Duration::from_millis(10), fut).await;
            assert!(timed.is_err());
        }

        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_send_discards_result() {
        let mut s = session();
        let api = HangingApi;
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();

        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let outcome = s.send_with_cancel(&api, "hello", cancel).await.unwrap();

        assert_eq!(outcome, SendOutcome::Cancelled);
        assert_eq!(s.messages().len(), 1);
        assert_eq!(s.messages()[0].role, MessageRole::User);
        assert_eq!(s.warning(), Some("Request cancelled."));
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.tokens_remaining(), 50);
    }

    #[tokio::test]
    async fn test_send_with_cancel_completes_when_not_cancelled() {
        let api = ScriptedApi::new(vec![Ok(reply("Hi", "abc", 49, true))]);
        let mut s = session();

        let outcome = s
            .send_with_cancel(&api, "hello", CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome, SendOutcome::Delivered { off_topic: false });
        assert_eq!(s.messages().len(), 2);
    }

    #[test]
    fn test_close_rejects_and_discards() {
        let mut s = session();
        let pending = s.begin_send("hello").unwrap();

        s.close();
        let outcome = s.complete_send(pending, Ok(reply("Hi", "abc", 49, true)));

        assert_eq!(outcome, SendOutcome::Cancelled);
        assert_eq!(s.messages().len(), 1);
        assert!(s.conversation_id().is_none());
        assert!(matches!(s.begin_send("again"), Err(SendRejection::Closed)));
        assert!(s.is_closed());
    }

    #[tokio::test]
    async fn test_fetch_usage_updates_budget() {
        let api = ScriptedApi::new(vec![]).with_usage(Ok(UsageReport { tokens_remaining: 37 }));
        let mut s = session();

        s.fetch_usage(&api).await;

        assert_eq!(s.tokens_remaining(), 37);
    }

    #[tokio::test]
    async fn test_fetch_usage_failure_keeps_default() {
        let api = ScriptedApi::new(vec![]);
        let mut s = session();

        s.fetch_usage(&api).await;

        assert_eq!(s.tokens_remaining(), 50);
        assert!(s.warning().is_none());
    }

    #[test]
    fn test_result_from_other_session_is_discarded() {
        let mut owner = session();
        let mut other = session();
        let pending = owner.begin_send("hello").unwrap();

        let outcome = other.complete_send(pending, Ok(reply("Hi", "abc", 49, true)));

        assert_eq!(outcome, SendOutcome::Cancelled);
        assert!(other.messages().is_empty());
        assert!(other.conversation_id().is_none());
        assert_eq!(other.tokens_remaining(), 50);
        assert_eq!(owner.state(), SessionState::Idle);
        assert_eq!(owner.messages().len(), 1);
    }

    #[test]
    fn test_abandon_from_other_session_leaves_warning_alone() {
        let mut owner = session();
        let mut other = session();
        let pending = owner.begin_send("hello").unwrap();

        assert_eq!(other.abandon_send(pending), SendOutcome::Cancelled);
        assert!(other.warning().is_none());
        assert_eq!(owner.state(), SessionState::Idle);
    }
}

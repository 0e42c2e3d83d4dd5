//! Chat session client.
//!
//! [`session::ChatSession`] mediates a request/response exchange with the
//! remote assistant through the [`api::ChatApi`] port, which the
//! infrastructure layer implements over HTTP.

pub mod api;
pub mod notice;
pub mod session;

pub use api::ChatApi;
pub use session::{ChatSession, SendOutcome, SendRejection, SessionState};

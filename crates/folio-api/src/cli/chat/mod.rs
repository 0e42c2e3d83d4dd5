//! Interactive CLI chat with the portfolio assistant.
//!
//! Entry point: `loop_runner::run_chat_loop`. The session logic lives in
//! `folio_core::chat`; this module only handles input, rendering, and
//! slash commands.

pub mod banner;
pub mod budget_display;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;

//! Shared domain types for Folio.
//!
//! This crate contains the data shapes used across the workspace: terminal
//! log entries, chat messages and their wire format, profile content, site
//! configuration, and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod profile;
pub mod terminal;

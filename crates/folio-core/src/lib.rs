//! Terminal interpreter and chat session logic for Folio.
//!
//! This crate holds the behaviour of both components and defines the
//! `ChatApi` port that the infrastructure layer implements. It depends only
//! on `folio-types` -- never on `folio-infra` or any HTTP/IO crate.

pub mod chat;
pub mod terminal;

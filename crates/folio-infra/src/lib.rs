//! Infrastructure layer for Folio.
//!
//! Contains the adapters behind the ports defined in `folio-core`: the
//! reqwest-backed chat client, TOML config and profile loaders, data
//! directory resolution, and the OS document opener.

pub mod config;
pub mod filesystem;
pub mod http;
pub mod opener;
pub mod profile;

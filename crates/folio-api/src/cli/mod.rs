//! CLI command definitions for the `folio` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod terminal;
pub mod usage;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use folio_types::chat::Language;

use crate::state::ConfigOverrides;

/// Interactive portfolio terminal and assistant chat.
#[derive(Parser)]
#[command(name = "folio", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Base URL of the chat API.
    #[arg(long, env = "FOLIO_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Interface language (en or pt).
    #[arg(long, env = "FOLIO_LANGUAGE", global = true)]
    pub language: Option<Language>,

    /// Resume document URL or site-relative path.
    #[arg(long, env = "FOLIO_RESUME_URL", global = true)]
    pub resume_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Tracing directive for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,folio=debug",
            _ => "trace",
        }
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            language: self.language,
            resume_url: self.resume_url.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the full-screen portfolio terminal.
    #[command(alias = "term")]
    Terminal,

    /// Chat with the portfolio assistant.
    Chat,

    /// Show the remaining daily token budget.
    Usage,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

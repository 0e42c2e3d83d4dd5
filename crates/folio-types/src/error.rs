use thiserror::Error;

/// Failures of a remote chat exchange.
///
/// Every variant is recoverable: callers convert it into a localized notice
/// and keep the session usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("rate limited")]
    RateLimited,

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("transport failure: {0}")]
    Transport(String),
}

impl ChatError {
    /// Whether the server answered at all (as opposed to a network failure).
    pub fn is_remote(&self) -> bool {
        !matches!(self, ChatError::Transport(_))
    }
}

/// Errors produced while interpreting terminal input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Command not found: {0}. Type 'help' for available commands.")]
    Unrecognized(String),
}

/// Errors from loading configuration or profile files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

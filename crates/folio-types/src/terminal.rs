//! Terminal log types.
//!
//! A terminal session is an append-only list of [`TerminalEntry`] values.
//! Each entry pairs what the user typed with the output it produced; output
//! is either plain text or a list of styled fields so renderers can
//! pattern-match instead of inspecting markup.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Rendering class of a log entry. Has no behavioural effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Command,
    Info,
    Error,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Command => write!(f, "command"),
            EntryKind::Info => write!(f, "info"),
            EntryKind::Error => write!(f, "error"),
        }
    }
}

/// Visual weight of a structured output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    /// Section title or entity name.
    Heading,
    /// Ordinary prose.
    Body,
    /// Secondary detail such as a date range.
    Muted,
    /// Something the user can open (email, URL).
    Link,
}

/// One line of structured output, optionally prefixed by a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputField {
    pub label: Option<String>,
    pub value: String,
    pub emphasis: Emphasis,
}

impl OutputField {
    pub fn heading(value: impl Into<String>) -> Self {
        Self {
            label: None,
            value: value.into(),
            emphasis: Emphasis::Heading,
        }
    }

    pub fn body(value: impl Into<String>) -> Self {
        Self {
            label: None,
            value: value.into(),
            emphasis: Emphasis::Body,
        }
    }

    pub fn muted(value: impl Into<String>) -> Self {
        Self {
            label: None,
            value: value.into(),
            emphasis: Emphasis::Muted,
        }
    }

    pub fn labeled(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            value: value.into(),
            emphasis: Emphasis::Body,
        }
    }

    pub fn link(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            value: value.into(),
            emphasis: Emphasis::Link,
        }
    }
}

/// Output payload of a terminal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum TerminalOutput {
    Text(String),
    Structured(Vec<OutputField>),
}

impl TerminalOutput {
    /// Flatten the payload into plain lines (used for logs and tests).
    pub fn to_plain_lines(&self) -> Vec<String> {
        match self {
            TerminalOutput::Text(text) => text.lines().map(str::to_string).collect(),
            TerminalOutput::Structured(fields) => fields
                .iter()
                .map(|field| match &field.label {
                    Some(label) => format!("{label}: {}", field.value),
                    None => field.value.clone(),
                })
                .collect(),
        }
    }

    /// Whether the plain rendering contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.to_plain_lines().iter().any(|line| line.contains(needle))
    }
}

/// A single input/output pair in the terminal log.
///
/// Entries are never mutated after creation. System entries (the welcome
/// banner) carry an empty `input`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalEntry {
    pub input: String,
    pub output: TerminalOutput,
    pub kind: EntryKind,
}

impl TerminalEntry {
    pub fn info(input: impl Into<String>, output: TerminalOutput) -> Self {
        Self {
            input: input.into(),
            output,
            kind: EntryKind::Info,
        }
    }

    pub fn error(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: TerminalOutput::Text(message.into()),
            kind: EntryKind::Error,
        }
    }

    /// Whether this entry was typed by the user (and so belongs to history).
    pub fn is_user_input(&self) -> bool {
        !self.input.is_empty()
    }
}

/// Direction of a history-recall keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// Arrow-up: step back to an earlier command.
    Older,
    /// Arrow-down: step forward to a more recent command.
    Newer,
}

/// Side effects the terminal asks its host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// Open the resume document after `delay`. Fire-and-forget.
    ResumeRequested { url: String, delay: Duration },
}

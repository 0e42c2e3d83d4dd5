//! The terminal emulator: input buffer, append-only log, history cursor.
//!
//! `TerminalEmulator` never performs side effects itself. Commands that need
//! the outside world (opening the resume) return a [`TerminalEvent`] that the
//! host schedules.

use std::sync::Arc;

use tracing::debug;

use folio_types::config::SiteConfig;
use folio_types::profile::Profile;
use folio_types::terminal::{HistoryDirection, TerminalEntry, TerminalEvent};

use super::command::Command;
use super::history::{HistoryCursor, Recall};
use super::output;

/// State of one mounted terminal view.
///
/// Owns its log and cursor exclusively; profile and configuration are shared
/// read-only.
#[derive(Debug, Clone)]
pub struct TerminalEmulator {
    profile: Arc<Profile>,
    config: Arc<SiteConfig>,
    entries: Vec<TerminalEntry>,
    input: String,
    cursor: HistoryCursor,
}

impl TerminalEmulator {
    /// Mount a terminal. The log starts with the welcome banner.
    pub fn new(profile: Arc<Profile>, config: Arc<SiteConfig>) -> Self {
        let banner = TerminalEntry::info("", output::welcome_banner(&profile));
        Self {
            profile,
            config,
            entries: vec![banner],
            input: String::new(),
            cursor: HistoryCursor::new(),
        }
    }

    pub fn entries(&self) -> &[TerminalEntry] {
        &self.entries
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Prompt label, e.g. `ada@portfolio:~$`.
    pub fn prompt(&self) -> String {
        format!("{}@portfolio:~$", self.profile.handle)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn cursor(&self) -> HistoryCursor {
        self.cursor
    }

    /// Typed inputs still in the log, most recent first.
    pub fn history(&self) -> Vec<&str> {
        typed_inputs(&self.entries)
    }

    /// Interpret one line of input.
    ///
    /// Blank input is ignored. `clear` empties the log without recording
    /// itself. Every other input appends exactly one entry.
    pub fn submit(&mut self, raw: &str) -> Option<TerminalEvent> {
        if raw.trim().is_empty() {
            return None;
        }
        self.cursor.reset();

        let command = match raw.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                debug!(input = raw.trim(), "unrecognized terminal command");
                self.entries.push(TerminalEntry::error(raw, err.to_string()));
                return None;
            }
        };

        debug!(command = %command, "terminal command");

        let (content, event) = match command {
            Command::Clear => {
                self.entries.clear();
                return None;
            }
            Command::Help => (output::help(), None),
            Command::About => (output::about(&self.profile), None),
            Command::Experience => (output::experience(&self.profile), None),
            Command::Skills => (output::skills(&self.profile), None),
            Command::Projects => (output::projects(&self.profile), None),
            Command::Contact => (output::contact(&self.profile, &self.config), None),
            Command::Resume => (
                output::resume(),
                Some(TerminalEvent::ResumeRequested {
                    url: self.config.resume_url(),
                    delay: self.config.resume_delay(),
                }),
            ),
        };

        self.entries.push(TerminalEntry::info(raw, content));
        event
    }

    /// Submit the input buffer, then clear it and stop navigating history.
    ///
    /// A blank buffer is left untouched.
    pub fn submit_input(&mut self) -> Option<TerminalEvent> {
        if self.input.trim().is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.input);
        let event = self.submit(&line);
        self.cursor.reset();
        event
    }

    /// Recall an older or newer command into the input buffer.
    pub fn navigate_history(&mut self, direction: HistoryDirection) {
        let history = typed_inputs(&self.entries);

        match self.cursor.step(direction, &history) {
            Recall::Entry(entry) => self.input = entry.to_string(),
            Recall::Clear => self.input.clear(),
            Recall::Unchanged => {}
        }
    }
}

fn typed_inputs(entries: &[TerminalEntry]) -> Vec<&str> {
    entries
        .iter()
        .rev()
        .filter(|entry| entry.is_user_input())
        .map(|entry| entry.input.as_str())
        .collect()
}

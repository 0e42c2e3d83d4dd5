//! Command table and parsing for the terminal.
//!
//! Matching is exact after trimming and lower-casing the input; there are
//! no aliases or arguments.

use std::fmt;
use std::str::FromStr;

use folio_types::error::CommandError;

/// The fixed terminal vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List all commands.
    Help,
    /// Biography block.
    About,
    /// Roles, periods, one-line impact.
    Experience,
    /// Category to skill-list summary.
    Skills,
    /// Named projects.
    Projects,
    /// Open the resume document.
    Resume,
    /// Email and social links.
    Contact,
    /// Empty the log.
    Clear,
}

impl Command {
    /// Every command, in the order `help` lists them.
    pub const ALL: [Command; 8] = [
        Command::Help,
        Command::About,
        Command::Experience,
        Command::Skills,
        Command::Projects,
        Command::Resume,
        Command::Contact,
        Command::Clear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::About => "about",
            Command::Experience => "experience",
            Command::Skills => "skills",
            Command::Projects => "projects",
            Command::Resume => "resume",
            Command::Contact => "contact",
            Command::Clear => "clear",
        }
    }

    /// One-line description shown by `help`.
    pub fn description(self) -> &'static str {
        match self {
            Command::Help => "Show available commands",
            Command::About => "Learn about me",
            Command::Experience => "View work experience",
            Command::Skills => "View technical skills",
            Command::Projects => "Explore projects",
            Command::Resume => "Download resume",
            Command::Contact => "Get in touch",
            Command::Clear => "Clear terminal",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parse trimmed, case-insensitive input. The error keeps the trimmed
    /// input with its original casing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.to_lowercase();
        Command::ALL
            .into_iter()
            .find(|cmd| cmd.name() == normalized)
            .ok_or_else(|| CommandError::Unrecognized(trimmed.to_string()))
    }
}

//! Terminal markdown rendering for assistant replies.
//!
//! `ChatRenderer` runs replies through `termimad` and prefixes each message
//! with its role and local `HH:MM` timestamp.

use chrono::{DateTime, Local, Utc};
use console::style;
use termimad::MadSkin;

use folio_types::chat::{ChatMessage, MessageRole};

/// Characters shown per message in `/history`.
const PREVIEW_CHARS: usize = 100;

pub struct ChatRenderer {
    skin: MadSkin,
    assistant_name: String,
}

impl ChatRenderer {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(termimad::crossterm::style::Color::Cyan);
        skin.headers[0].set_fg(termimad::crossterm::style::Color::Cyan);
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            assistant_name: assistant_name.into(),
        }
    }

    /// Render markdown to ANSI text.
    pub fn render_markdown(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    /// Role label and timestamp line, e.g. `Ada's Minion  14:02`.
    pub fn header(&self, message: &ChatMessage) -> String {
        let label = match message.role {
            MessageRole::User => format!("{}", style("You").green().bold()),
            MessageRole::Assistant => format!("{}", style(&self.assistant_name).cyan().bold()),
        };
        format!(
            "  {}  {}",
            label,
            style(format_timestamp(message.timestamp)).dim()
        )
    }

    /// Full rendering of an assistant reply.
    pub fn render_reply(&self, message: &ChatMessage) -> String {
        let body = self.render_markdown(&message.content);
        let indented = body
            .trim_end()
            .lines()
            .map(|line| format!("  {line}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n{}\n", self.header(message), indented)
    }

    /// One-line summary used by `/history`.
    pub fn render_preview(&self, message: &ChatMessage) -> String {
        format!("{} {}", self.header(message), preview(&message.content))
    }
}

/// Local wall-clock time as `HH:MM`.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

fn preview(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

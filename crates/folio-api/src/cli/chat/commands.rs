//! Slash command parsing for the chat loop.
//!
//! Commands start with `/`. Anything else is sent to the assistant.

use std::io::Write;

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the screen and redraw the banner.
    Clear,
    /// Exit the chat.
    Exit,
    /// Re-fetch the remaining token budget.
    Usage,
    /// Show the messages exchanged so far.
    History,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/usage" | "/tokens" => Some(ChatCommand::Usage),
        "/history" => Some(ChatCommand::History),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Write the help text listing all available commands.
pub fn print_help(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {}", style("Available commands:").bold())?;
    writeln!(out)?;
    writeln!(out, "  {}     {}", style("/help").cyan(), "Show this help message")?;
    writeln!(out, "  {}    {}", style("/clear").cyan(), "Clear the screen")?;
    writeln!(out, "  {}    {}", style("/usage").cyan(), "Refresh the remaining token budget")?;
    writeln!(out, "  {}  {}", style("/history").cyan(), "Show conversation history")?;
    writeln!(out, "  {}     {}", style("/exit").cyan(), "End the chat")?;
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        style("Ctrl+C cancels a pending request, Ctrl+D exits").dim()
    )?;
    writeln!(out)?;
    Ok(())
}

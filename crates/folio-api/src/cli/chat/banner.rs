//! Welcome banner and suggested questions.

use std::io::Write;

use console::style;

use folio_core::chat::ChatSession;
use folio_core::chat::notice;

use super::budget_display::render_budget_line;

/// Write the banner shown when the chat starts.
pub fn print_welcome_banner(
    out: &mut impl Write,
    session: &ChatSession,
    token_limit: i64,
) -> std::io::Result<()> {
    let lang = session.language();
    let name = session.first_name();

    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        style(notice::assistant_title(lang, name)).cyan().bold()
    )?;
    writeln!(out, "  {}", style(notice::assistant_subtitle(lang, name)).dim())?;
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        render_budget_line(lang, session.tokens_remaining(), token_limit)
    )?;
    writeln!(out)?;
    writeln!(out, "  {}", style("Type /help for commands, Ctrl+D to exit").dim())?;
    writeln!(out, "  {}", style("---").dim())?;
    writeln!(out)?;
    Ok(())
}

/// Write the empty-state prompt with numbered example questions.
pub fn print_suggestions(out: &mut impl Write, session: &ChatSession) -> std::io::Result<()> {
    let lang = session.language();
    writeln!(out, "  {}", style(notice::empty_state(lang)).bold())?;
    writeln!(out, "  {}", style(notice::suggestions_label(lang)).dim())?;
    for (i, question) in notice::example_questions(lang, session.first_name())
        .iter()
        .enumerate()
    {
        writeln!(out, "    {} {}", style(format!("{}.", i + 1)).cyan(), question)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Map a bare number typed on an empty conversation to the matching example question.
pub fn pick_suggestion(input: &str, session: &ChatSession) -> Option<String> {
    if !session.messages().is_empty() {
        return None;
    }
    let index: usize = input.trim().parse().ok()?;
    notice::example_questions(session.language(), session.first_name())
        .into_iter()
        .nth(index.checked_sub(1)?)
}

//! Main chat loop orchestration.
//!
//! Reads input, dispatches slash commands, and drives one exchange at a time
//! through [`ChatSession`]. While a reply is pending the prompt stays live:
//! Ctrl+C abandons the request, and any other submitted line is rejected
//! because a request is already in flight.

use std::io::Write;
use std::time::Duration;

use console::style;
use rustyline_async::SharedWriter;

use folio_core::chat::notice;
use folio_core::chat::{ChatApi, ChatSession, SendOutcome, SendRejection};
use folio_types::chat::Language;

use crate::state::AppState;

use super::banner::{pick_suggestion, print_suggestions, print_welcome_banner};
use super::budget_display::{render_budget_line, render_exhausted};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

enum Flow {
    Continue,
    Exit,
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let mut session = ChatSession::new(&state.profile, &state.config);
    session.fetch_usage(&state.api).await;

    let lang = session.language();
    let token_limit = state.config.token_limit;
    let renderer = ChatRenderer::new(notice::assistant_title(lang, session.first_name()));

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, mut out) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    print_header(&mut out, &session, token_limit)?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                writeln!(
                    out,
                    "  {}",
                    style("Press Ctrl+D or type /exit to leave.").dim()
                )?;
                continue;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(&mut out)?,
                ChatCommand::Clear => {
                    chat_input.clear();
                    print_header(&mut out, &session, token_limit)?;
                }
                ChatCommand::Exit => break,
                ChatCommand::Usage => {
                    session.fetch_usage(&state.api).await;
                    writeln!(
                        out,
                        "{}",
                        render_budget_line(lang, session.tokens_remaining(), token_limit)
                    )?;
                }
                ChatCommand::History => {
                    writeln!(out)?;
                    if session.messages().is_empty() {
                        writeln!(out, "  {}", style(notice::empty_state(lang)).dim())?;
                    }
                    for message in session.messages() {
                        writeln!(out, "{}", renderer.render_preview(message))?;
                    }
                    writeln!(out)?;
                }
                ChatCommand::Unknown(name) => {
                    writeln!(
                        out,
                        "  {} Unknown command: {}. Type /help for available commands.",
                        style("?").yellow().bold(),
                        style(name).dim()
                    )?;
                }
            }
            continue;
        }

        let text = pick_suggestion(&text, &session).unwrap_or(text);
        let flow = exchange(
            &mut session,
            &state.api,
            &text,
            &mut chat_input,
            &mut out,
            &renderer,
        )
        .await?;

        writeln!(
            out,
            "{}",
            render_budget_line(lang, session.tokens_remaining(), token_limit)
        )?;
        if session.tokens_remaining() <= 0 {
            writeln!(out, "{}", render_exhausted(lang))?;
        }
        writeln!(out)?;

        if let Flow::Exit = flow {
            break;
        }
    }

    session.close();
    writeln!(out, "\n  {}", style("Session ended.").dim())?;
    chat_input.flush();
    Ok(())
}

/// Banner followed by the exhausted notice or, on an empty log, the suggestions.
fn print_header(
    out: &mut impl Write,
    session: &ChatSession,
    token_limit: i64,
) -> std::io::Result<()> {
    print_welcome_banner(out, session, token_limit)?;
    if session.tokens_remaining() <= 0 {
        writeln!(out, "{}", render_exhausted(session.language()))?;
    } else if session.messages().is_empty() {
        print_suggestions(out, session)?;
    }
    Ok(())
}

/// Send one message and render the outcome.
async fn exchange<A: ChatApi>(
    session: &mut ChatSession,
    api: &A,
    text: &str,
    input: &mut ChatInput,
    out: &mut SharedWriter,
    renderer: &ChatRenderer,
) -> anyhow::Result<Flow> {
    let lang = session.language();

    let pending = match session.begin_send(text) {
        Ok(pending) => pending,
        Err(rejection) => {
            if let Some(line) = render_rejection(&rejection, lang) {
                writeln!(out, "{line}")?;
            }
            return Ok(Flow::Continue);
        }
    };

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("{}...", notice::sending(lang)));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let mut flow = Flow::Continue;
    let result = {
        let request = api.send_message(pending.request());
        tokio::pin!(request);

        loop {
            tokio::select! {
                result = &mut request => break Some(result),
                event = input.read_line() => match event {
                    InputEvent::Interrupted => break None,
                    InputEvent::Eof => {
                        flow = Flow::Exit;
                        break None;
                    }
                    InputEvent::Message(extra) => {
                        if let Err(rejection) = session.check_send(&extra) {
                            if let Some(line) = render_rejection(&rejection, lang) {
                                writeln!(out, "{line}")?;
                            }
                        }
                    }
                },
            }
        }
    };
    spinner.finish_and_clear();

    let outcome = match result {
        Some(result) => session.complete_send(pending, result),
        None => session.abandon_send(pending),
    };

    match outcome {
        SendOutcome::Delivered { .. } => {
            if let Some(reply) = session.messages().last() {
                writeln!(out, "\n{}", renderer.render_reply(reply))?;
            }
            if let Some(warning) = session.warning() {
                writeln!(out, "  {} {}", style("!").yellow().bold(), style(warning).yellow())?;
            }
        }
        SendOutcome::Failed(_) => {
            if let Some(reply) = session.messages().last() {
                writeln!(
                    out,
                    "\n{}\n  {} {}\n",
                    renderer.header(reply),
                    style("!").red().bold(),
                    style(&reply.content).red()
                )?;
            }
        }
        SendOutcome::Cancelled => {
            if let Some(warning) = session.warning() {
                writeln!(out, "  {}", style(warning).dim())?;
            }
        }
    }

    Ok(flow)
}

/// User-facing line for a refused send. Empty input is silently ignored.
fn render_rejection(rejection: &SendRejection, lang: Language) -> Option<String> {
    match rejection {
        SendRejection::EmptyMessage => None,
        SendRejection::InFlight => Some(format!(
            "  {} {}",
            style("!").yellow().bold(),
            style(notice::in_flight(lang)).yellow()
        )),
        SendRejection::BudgetExhausted => Some(render_exhausted(lang)),
        SendRejection::TooLong { len, .. } => Some(format!(
            "  {} {}",
            style("!").red().bold(),
            style(notice::character_count(lang, *len)).red()
        )),
        SendRejection::Closed => Some(format!("  {}", style(rejection.to_string()).dim())),
    }
}

//! Full-screen portfolio terminal.
//!
//! A ratatui view over [`TerminalEmulator`]: scrollback on top, a single
//! input line at the bottom.
//!
//! Keybindings: Enter submit, Up/Down history, PageUp/PageDown scroll,
//! Esc or Ctrl+C quit.

use std::io;

use anyhow::Result;
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use folio_core::terminal::TerminalEmulator;
use folio_infra::opener::open_document;
use folio_types::terminal::{
    Emphasis, EntryKind, HistoryDirection, OutputField, TerminalEntry, TerminalEvent,
    TerminalOutput,
};

use crate::state::AppState;

/// Lines moved per PageUp/PageDown.
const PAGE_LINES: u16 = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

struct TerminalView {
    emulator: TerminalEmulator,
    /// Lines scrolled up from the bottom of the scrollback.
    scroll_back: u16,
    quit: bool,
}

impl TerminalView {
    fn new(emulator: TerminalEmulator) -> Self {
        Self {
            emulator,
            scroll_back: 0,
            quit: false,
        }
    }
}

/// Run the terminal until the user quits.
pub async fn run_terminal(state: &AppState) -> Result<()> {
    let emulator = TerminalEmulator::new(state.profile.clone(), state.config.clone());
    let mut view = TerminalView::new(emulator);

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui_loop(&mut terminal, &mut view);

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    result
}

// ---------------------------------------------------------------------------
// TUI loop
// ---------------------------------------------------------------------------

fn run_tui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    view: &mut TerminalView,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, view))?;

        if view.quit {
            break;
        }

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(event) = handle_key(key, view) {
                    schedule(event);
                }
            }
        }
    }

    Ok(())
}

/// Carry out a side effect requested by the emulator.
fn schedule(event: TerminalEvent) {
    match event {
        TerminalEvent::ResumeRequested { url, delay } => {
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if let Err(e) = open_document(&url) {
                    tracing::warn!(url = %url, error = %e, "failed to open resume");
                }
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Key handling
// ---------------------------------------------------------------------------

fn handle_key(key: KeyEvent, view: &mut TerminalView) -> Option<TerminalEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        view.quit = true;
        return None;
    }

    match key.code {
        KeyCode::Esc => {
            view.quit = true;
        }
        KeyCode::Enter => {
            view.scroll_back = 0;
            return view.emulator.submit_input();
        }
        KeyCode::Up => view.emulator.navigate_history(HistoryDirection::Older),
        KeyCode::Down => view.emulator.navigate_history(HistoryDirection::Newer),
        KeyCode::PageUp => {
            view.scroll_back = view.scroll_back.saturating_add(PAGE_LINES);
        }
        KeyCode::PageDown => {
            view.scroll_back = view.scroll_back.saturating_sub(PAGE_LINES);
        }
        KeyCode::Backspace => view.emulator.backspace(),
        KeyCode::Char(c) => view.emulator.insert_char(c),
        _ => {}
    }
    None
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, view: &mut TerminalView) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // scrollback
            Constraint::Length(3), // input
        ])
        .split(area);

    draw_scrollback(frame, layout[0], view);
    draw_input(frame, layout[1], view);
}

fn draw_scrollback(frame: &mut Frame, area: Rect, view: &mut TerminalView) {
    let prompt = view.emulator.prompt();
    let lines: Vec<Line> = view
        .emulator
        .entries()
        .iter()
        .flat_map(|entry| entry_lines(entry, &prompt))
        .collect();

    // Two rows go to the border.
    let visible = area.height.saturating_sub(2);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_back = total.saturating_sub(visible);
    view.scroll_back = view.scroll_back.min(max_back);
    let offset = max_back - view.scroll_back;

    let title = format!(" {} ", view.emulator.profile().name);
    let scrollback = Paragraph::new(lines).scroll((offset, 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(scrollback, area);
}

fn draw_input(frame: &mut Frame, area: Rect, view: &TerminalView) {
    let line = Line::from(vec![
        Span::styled(
            format!("{} ", view.emulator.prompt()),
            Style::default().fg(Color::Green),
        ),
        Span::raw(view.emulator.input().to_string()),
        Span::styled("_", Style::default().fg(Color::Green)),
    ]);

    let input = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Enter run | Up/Down history | PgUp/PgDn scroll | Esc quit ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(input, area);
}

/// Styled lines for one log entry: the echoed command, then its output.
fn entry_lines(entry: &TerminalEntry, prompt: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if entry.is_user_input() {
        lines.push(Line::from(vec![
            Span::styled(format!("{prompt} "), Style::default().fg(Color::Green)),
            Span::styled(entry.input.clone(), Style::default().fg(Color::Green)),
        ]));
    }

    match &entry.output {
        TerminalOutput::Text(text) => {
            let style = match entry.kind {
                EntryKind::Error => Style::default().fg(Color::Red),
                EntryKind::Command | EntryKind::Info => Style::default().fg(Color::Cyan),
            };
            lines.extend(
                text.lines()
                    .map(|line| Line::from(Span::styled(line.to_string(), style))),
            );
        }
        TerminalOutput::Structured(fields) => {
            lines.extend(fields.iter().map(field_line));
        }
    }

    lines.push(Line::default());
    lines
}

fn field_line(field: &OutputField) -> Line<'static> {
    let value_style = match field.emphasis {
        Emphasis::Heading => Style::default().fg(Color::Cyan).bold(),
        Emphasis::Body => Style::default().fg(Color::Gray),
        Emphasis::Muted => Style::default().fg(Color::DarkGray),
        Emphasis::Link => Style::default().fg(Color::Blue).underlined(),
    };

    let mut spans = Vec::new();
    if let Some(label) = &field.label {
        spans.push(Span::styled(
            format!("{label}: "),
            Style::default().fg(Color::Green),
        ));
    }
    spans.push(Span::styled(field.value.clone(), value_style));
    Line::from(spans)
}

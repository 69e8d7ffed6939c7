//! Interactive terminal front end.
//!
//! Draws the display and the history tape, reads key presses and lets the
//! session's display deadline drive the poll timeout so error reverts land on
//! time.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tracing::debug;

use crate::input::Key;
use crate::session::Session;

/// Poll interval while nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

const HELP: &str = "Enter/= evaluate  Bksp delete  Del clear entry  Esc clear  q quit";

/// Owns the terminal while the UI runs and restores it on drop, including
/// when unwinding from a panic.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                Err(e).context("Failed to set up terminal")
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore(self.terminal.backend_mut(), disable_raw_mode()) {
            debug!(error = %e, "Failed to fully restore terminal");
        }
    }
}

/// Leave the alternate screen and show the cursor, whatever `raw_mode`
/// (the result of leaving raw mode) was. Returns the first failure.
fn restore<W: Write>(out: &mut W, raw_mode: io::Result<()>) -> io::Result<()> {
    let screen = execute!(out, LeaveAlternateScreen, Show);
    raw_mode.and(screen)
}

/// Run the interactive UI until the user quits.
pub fn run(session: &mut Session) -> Result<()> {
    let mut guard = TerminalGuard::enter()?;
    event_loop(session, &mut guard.terminal)
}

fn event_loop<B: Backend>(session: &mut Session, terminal: &mut Terminal<B>) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, session))?;

        let timeout = session
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            if is_quit(&key) {
                debug!("Quit requested");
                return Ok(());
            }
            if let Some(key) = translate_key(&key) {
                // Failures are already on the display.
                let _ = session.handle_key(key, Instant::now());
            }
        }

        session.tick(Instant::now());
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

/// Translate a terminal key event into a session key.
pub fn translate_key(key: &KeyEvent) -> Option<Key> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match key.code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Delete => Some(Key::Delete),
        _ => None,
    }
}

/// The last `width` characters of `text`.
fn visible_tail(text: &str, width: usize) -> String {
    let len = text.chars().count();
    text.chars().skip(len.saturating_sub(width)).collect()
}

fn render(frame: &mut Frame, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Display
            Constraint::Min(2),    // History
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let display_style = if session.display().is_showing_error() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    // Keep the tail visible when the expression outgrows the box.
    let inner_width = chunks[0].width.saturating_sub(2) as usize;
    let display = Paragraph::new(visible_tail(session.display_text(), inner_width))
        .style(display_style)
        .alignment(Alignment::Right)
        .block(Block::default().title(" calcpad ").borders(Borders::ALL));
    frame.render_widget(display, chunks[0]);

    let items: Vec<ListItem> = session
        .history()
        .map(|entry| ListItem::new(format!("{} = {}", entry.expression, entry.display_result)))
        .collect();
    let history = List::new(items).block(Block::default().title(" History ").borders(Borders::ALL));
    frame.render_widget(history, chunks[1]);

    let help = Paragraph::new(Line::from(HELP)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}

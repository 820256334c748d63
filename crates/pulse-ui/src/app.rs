//! Application state and TUI event loop for the dashboard.
//!
//! [`App`] owns the theme and the [`DashboardSession`]. Every key press that
//! changes a selection goes through the session, which re-runs the pass, and
//! the next frame renders the new report.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tracing::{info, warn};

use pulse_core::models::Dimension;
use pulse_runtime::session::DashboardSession;

use crate::dashboard_view::{self, DashboardViewData};
use crate::themes::Theme;

/// Interactive dashboard application.
pub struct App {
    pub theme: Theme,
    pub session: DashboardSession,
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, session: DashboardSession) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            session,
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout; the loop exits on
    /// `q`, `Q`, or `Ctrl+C`.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press to the session.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('c') => self.session.cycle_filter(Dimension::Category),
            KeyCode::Char('l') => self.session.cycle_filter(Dimension::Location),
            KeyCode::Char('t') => {
                let mode = self.session.toggle_trend_mode();
                info!(mode = mode.as_str(), "trend mode toggled");
            }
            KeyCode::Char('r') => self.session.reset_filters(),
            KeyCode::Char('u') => {
                if let Err(e) = self.session.reload() {
                    warn!(error = %e, "reload failed");
                }
            }
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current session state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let source = self.session.source().label();
        let data = DashboardViewData {
            report: self.session.report(),
            source: &source,
            rows_loaded: self.session.data().len(),
            window: self.session.config().window,
            assumptions: &self.session.config().assumptions,
            reload_error: self.session.reload_error(),
        };
        dashboard_view::render_dashboard(frame, area, &data, &self.theme);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

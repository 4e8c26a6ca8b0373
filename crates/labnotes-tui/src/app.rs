//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! The app never holds a fixed timeline. It owns a [`Loader`] and calls it
//! once at startup and again on every `r`, so each refresh fetches both
//! sources and rebuilds the entries from scratch. A load that fails outright
//! replaces the panes with an error panel until a retry succeeds.

use crate::{
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        detail::{Detail, DetailState},
        entry_list::{EntryList, EntryListState},
        help::HelpPopup,
        load_error::LoadError,
    },
};
use crossterm::{
    event as ct_event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use labnotes_core::{config::Config, Origin, Snapshot, Timeline};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::{io, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Detail,
}

/// Fetches both sources and builds a fresh timeline snapshot.
pub type Loader = Box<dyn FnMut() -> anyhow::Result<Snapshot>>;

pub struct AppState {
    pub entries: EntryListState,
    /// Sources that failed on the last successful refresh.
    pub degraded: Vec<String>,
    /// Set when the last refresh produced no timeline at all.
    pub load_error: Option<anyhow::Error>,
    loader: Loader,
    pub detail: DetailState,
    pub focus: Focus,
    pub theme: Theme,
    /// Name of the active embedded theme, used by `CycleTheme`.
    pub theme_name: &'static str,
    pub config: Config,
    pub show_help: bool,
    pub quit: bool,
}

pub struct App {
    state: AppState,
}

impl App {
    /// Build the app and run the first load.
    pub fn new(loader: Loader, config: Config, theme: Theme) -> Self {
        let mut state = AppState {
            entries: EntryListState::new(Timeline::default()),
            degraded: Vec::new(),
            load_error: None,
            loader,
            detail: DetailState::default(),
            focus: Focus::List,
            theme,
            theme_name: "default",
            config,
            show_help: false,
            quit: false,
        };
        state.refresh();
        App { state }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(50))? {
                if let Some(ev) = event::to_app_event(ct_event::read()?) {
                    tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                    self.state.handle(ev);
                }
            }
        }
        Ok(())
    }
}

impl AppState {
    /// Run the loader and swap in its result.
    ///
    /// On failure the previous entries are kept but hidden behind the error
    /// panel.
    pub fn refresh(&mut self) {
        match (self.loader)() {
            Ok(snapshot) => {
                tracing::info!(
                    entries = snapshot.timeline.len(),
                    degraded = snapshot.degraded.len(),
                    "timeline refreshed"
                );
                self.entries = EntryListState::new(snapshot.timeline);
                self.detail.reset();
                self.degraded = snapshot.degraded;
                self.load_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed");
                self.load_error = Some(e);
            }
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::ToggleHelp | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        match event {
            AppEvent::ToggleHelp => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }
            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::List => Focus::Detail,
                    Focus::Detail => Focus::List,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }
            AppEvent::Refresh => self.refresh(),
            AppEvent::Escape => self.focus = Focus::List,
            AppEvent::CycleTheme => {
                self.theme_name = match self.theme_name {
                    "default" => "gruvbox_dark",
                    _ => "default",
                };
                tracing::debug!(theme = self.theme_name, "theme changed");
                self.theme = Theme::by_name(self.theme_name);
            }
            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}
            other => match self.focus {
                Focus::List => {
                    let before = self.entries.cursor;
                    self.entries.handle(&other);
                    if self.entries.cursor != before {
                        self.detail.reset();
                    }
                }
                Focus::Detail => self.detail.handle(&other),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: body | 1-line status bar
    let [body_area, status_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

    if let Some(error) = &state.load_error {
        frame.render_widget(LoadError::new(error, &state.theme), body_area);
    } else {
        // Body: entry list over detail
        let [list_area, detail_area] =
            Layout::vertical([Constraint::Percentage(55), Constraint::Fill(1)]).areas(body_area);

        frame.render_widget(
            EntryList::new(&state.entries, state.focus == Focus::List, &state.theme),
            list_area,
        );
        frame.render_widget(
            Detail::new(
                state.entries.selected(),
                &state.detail,
                state.focus == Focus::Detail,
                &state.theme,
            ),
            detail_area,
        );
    }
    frame.render_widget(Paragraph::new(status_line(state)), status_area);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }
}

fn status_line(state: &AppState) -> Line<'static> {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let mut spans = Vec::new();

    if state.load_error.is_some() {
        spans.push(Span::styled(" load failed ", state.theme.error));
    } else {
        let (legacy, modern) = state
            .entries
            .timeline
            .iter()
            .fold((0usize, 0usize), |(l, m), row| match row.entry.origin {
                Origin::Legacy => (l + 1, m),
                Origin::Modern => (l, m + 1),
            });
        spans.push(Span::styled(format!(" legacy {legacy} "), state.theme.origin_legacy));
        spans.push(Span::styled(format!(" modern {modern} "), state.theme.origin_modern));
        for note in &state.degraded {
            spans.push(Span::styled(format!(" ⚠ {note} "), state.theme.degraded));
        }
    }
    spans.push(Span::styled(
        format!(" UTC{} · r refresh · ? help · q quit", state.config.display.offset()),
        dim,
    ));
    Line::from(spans)
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

//! Entry list widget: the chronological timeline pane.
//!
//! One line per grouped entry, oldest at the top. A rule line is drawn above
//! the row flagged with `separator_before`.
//!
//! # Scroll semantics
//!
//! `cursor` is an index into the timeline rows. `scroll` is the first visible
//! *line* (rule lines count). Event handling only moves the cursor; render
//! adjusts `scroll` so the cursor line stays visible.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use labnotes_core::{Timeline, TimelineRow};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const SEPARATOR_LABEL: &str = " notebook entries ";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct EntryListState {
    pub timeline: Timeline,
    /// Index into `timeline` of the highlighted row.
    pub cursor: usize,
    /// First visible line; recomputed on every render.
    scroll: Cell<usize>,
    /// Cached from the last render so `handle()` can page by screenfuls.
    last_height: Cell<usize>,
}

impl EntryListState {
    /// Start with the cursor on the newest entry.
    pub fn new(timeline: Timeline) -> Self {
        let cursor = timeline.len().saturating_sub(1);
        Self {
            timeline,
            cursor,
            scroll: Cell::new(0),
            last_height: Cell::new(20),
        }
    }

    pub fn selected(&self) -> Option<&TimelineRow> {
        self.timeline.rows().get(self.cursor)
    }

    fn page(&self) -> usize {
        self.last_height.get().max(1)
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.timeline.len();
        if total == 0 {
            return;
        }
        let last = total - 1;

        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::PageUp => self.cursor = self.cursor.saturating_sub(self.page()),
            AppEvent::PageDown => self.cursor = (self.cursor + self.page()).min(last),
            AppEvent::Top => self.cursor = 0,
            AppEvent::Bottom => self.cursor = last,
            _ => return,
        }
        tracing::debug!(cursor = self.cursor, "entries: cursor moved");
    }

    /// Line index of `row`, counting the rule line if it precedes the row.
    fn line_of(&self, row: usize) -> usize {
        match self.timeline.separator_index() {
            Some(sep) if sep <= row => row + 1,
            _ => row,
        }
    }

    /// Pull `scroll` so the cursor line lies within a window of `height`.
    fn follow_cursor(&self, height: usize) -> usize {
        let line = self.line_of(self.cursor);
        let mut scroll = self.scroll.get();
        if line < scroll {
            scroll = line;
        } else if line >= scroll + height {
            scroll = line + 1 - height;
        }
        // Keep the rule visible when the cursor sits on the first modern row.
        if height > 1 && self.timeline.separator_index() == Some(self.cursor) && scroll == line {
            scroll = scroll.saturating_sub(1);
        }
        self.scroll.set(scroll);
        scroll
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct EntryList<'a> {
    state: &'a EntryListState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> EntryList<'a> {
    pub fn new(state: &'a EntryListState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for EntryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let title = format!("Notebook ({})", self.state.timeline.len());
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.state.timeline.is_empty() {
            let y = inner.y + inner.height / 2;
            let row = Rect { y, height: 1.min(inner.height), ..inner };
            Paragraph::new(Line::from(Span::styled("No notebook entries", self.theme.empty)).centered())
                .render(row, buf);
            return;
        }

        let height = (inner.height as usize).max(1);
        self.state.last_height.set(height);

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect { x: inner.right().saturating_sub(1), width: 1, ..inner };

        let mut lines: Vec<Line<'static>> = Vec::with_capacity(self.state.timeline.len() + 1);
        for (idx, row) in self.state.timeline.iter().enumerate() {
            if row.separator_before {
                lines.push(separator_line(text_area.width as usize, self.theme));
            }
            let mut line = render_row(row, self.theme);
            if idx == self.state.cursor {
                let highlight = if self.focused {
                    Modifier::REVERSED
                } else {
                    Modifier::UNDERLINED
                };
                line = line.patch_style(Style::default().add_modifier(highlight));
            }
            lines.push(line);
        }

        let total_lines = lines.len();
        let scroll = self.state.follow_cursor(height);
        let end = (scroll + height).min(total_lines);
        let visible: Vec<Line<'static>> = lines.drain(scroll.min(end)..end).collect();

        Paragraph::new(visible).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(total_lines)
            .position(scroll)
            .viewport_content_length(height);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Row rendering
// ---------------------------------------------------------------------------

fn separator_line(width: usize, theme: &Theme) -> Line<'static> {
    let label_len = SEPARATOR_LABEL.chars().count();
    let side = width.saturating_sub(label_len) / 2;
    let rule = "─".repeat(side);
    Line::from(Span::styled(format!("{rule}{SEPARATOR_LABEL}{rule}"), theme.separator))
}

fn render_row(row: &TimelineRow, theme: &Theme) -> Line<'static> {
    let entry = &row.entry;
    let dim = Style::default().add_modifier(Modifier::DIM);
    let mut spans: Vec<Span<'static>> = vec![
        Span::styled(format!("{:<10} {:>8} ", entry.created_date, entry.created_time), dim),
        Span::styled(format!("{:<7} ", entry.origin.to_string()), theme.origin_style(entry.origin)),
        Span::styled(
            format!("{:<18} ", truncate(&entry.author_display_name, 18)),
            theme.author_style(&entry.author_display_name),
        ),
        Span::raw(format!("{:<12} ", truncate(&entry.specimen_number, 12))),
        Span::styled("│ ".to_string(), dim),
        Span::raw(first_line(&entry.notes)),
    ];
    if !entry.attachments.is_empty() {
        spans.push(Span::styled(format!("  [{} file(s)]", entry.attachments.len()), theme.attachment));
    }
    Line::from(spans)
}

fn first_line(notes: &str) -> String {
    notes.lines().next().unwrap_or("").to_string()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

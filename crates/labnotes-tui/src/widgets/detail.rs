//! Detail pane — full notes, timestamps and attachments of the selected entry.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use labnotes_core::TimelineRow;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

#[derive(Debug, Default)]
pub struct DetailState {
    /// Vertical scroll within the detail text.
    pub scroll: u16,
}

impl DetailState {
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Up) => self.scroll = self.scroll.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.scroll = self.scroll.saturating_add(1),
            AppEvent::PageUp => self.scroll = self.scroll.saturating_sub(10),
            AppEvent::PageDown => self.scroll = self.scroll.saturating_add(10),
            AppEvent::Top => self.scroll = 0,
            _ => {}
        }
    }

    /// Reset when a different entry is selected.
    pub fn reset(&mut self) {
        self.scroll = 0;
    }
}

pub struct Detail<'a> {
    row: Option<&'a TimelineRow>,
    state: &'a DetailState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Detail<'a> {
    pub fn new(
        row: Option<&'a TimelineRow>,
        state: &'a DetailState,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { row, state, focused, theme }
    }
}

impl Widget for Detail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered().title("Entry").border_style(border_style);

        let Some(row) = self.row else {
            block.render(area, buf);
            return;
        };

        Paragraph::new(detail_lines(row, self.theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.state.scroll, 0))
            .render(area, buf);
    }
}

fn detail_lines(row: &TimelineRow, theme: &Theme) -> Vec<Line<'static>> {
    let entry = &row.entry;
    let label = Style::default().add_modifier(Modifier::BOLD);
    let field = |name: &str, value: String| {
        Line::from(vec![Span::styled(format!("{name:<14}"), label), Span::raw(value)])
    };

    let mut lines = vec![
        field("Specimen", entry.specimen_number.clone()),
        field("Names", entry.names.join(", ")),
        Line::from(vec![
            Span::styled(format!("{:<14}", "Author"), label),
            Span::styled(
                entry.author_display_name.clone(),
                theme.author_style(&entry.author_display_name),
            ),
        ]),
        field("Created", format!("{} {}", entry.created_date, entry.created_time)),
        field("Last modified", entry.last_modified_display.clone()),
        Line::from(vec![
            Span::styled(format!("{:<14}", "Source"), label),
            Span::styled(entry.origin.to_string(), theme.origin_style(entry.origin)),
        ]),
        Line::default(),
    ];

    if entry.attachments.is_empty() {
        lines.push(field("Attachments", "none".to_string()));
    } else {
        lines.push(Line::from(Span::styled("Attachments", label)));
        lines.extend(
            entry
                .attachments
                .iter()
                .map(|a| Line::from(Span::styled(format!("  • {a}"), theme.attachment))),
        );
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Notes", label)));
    lines.extend(entry.notes.lines().map(|l| Line::from(l.to_string())));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use labnotes_core::{GroupedEntry, Origin};

    #[test]
    fn lists_every_attachment() {
        let row = TimelineRow {
            separator_before: false,
            entry: GroupedEntry {
                specimen_number: "L-1".into(),
                names: vec!["DOE, JANE".into()],
                notes: "line one\nline two".into(),
                created_date: "01/02/2024".into(),
                created_time: "3:04 PM".into(),
                last_modified_display: "N/A".into(),
                author_display_name: "Jane Doe".into(),
                attachments: vec!["x.pdf".into(), "y.pdf".into()],
                origin: Origin::Modern,
                sort_key: 0,
            },
        };
        let text: Vec<String> = detail_lines(&row, &Theme::load_default())
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(text.iter().any(|l| l.contains("x.pdf")));
        assert!(text.iter().any(|l| l.contains("y.pdf")));
        assert!(text.iter().any(|l| l == "line two"));
    }

    #[test]
    fn scroll_saturates() {
        let mut state = DetailState::default();
        state.handle(&AppEvent::Nav(Direction::Up));
        assert_eq!(state.scroll, 0);
        state.handle(&AppEvent::PageDown);
        assert_eq!(state.scroll, 10);
        state.reset();
        assert_eq!(state.scroll, 0);
    }
}

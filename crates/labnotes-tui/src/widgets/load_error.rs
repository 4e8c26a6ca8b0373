//! Error panel drawn in place of the timeline when a refresh fails outright.
//!
//! When both sources are down each cause gets its own line. Any other load
//! error is shown as its context chain. The panel always ends with the retry
//! hint.

use crate::theme::Theme;
use labnotes_core::FetchError;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

const RETRY_HINT: &str = "Press r to retry, q to quit.";

pub struct LoadError<'a> {
    error: &'a anyhow::Error,
    theme: &'a Theme,
}

impl<'a> LoadError<'a> {
    pub fn new(error: &'a anyhow::Error, theme: &'a Theme) -> Self {
        Self { error, theme }
    }
}

/// Headline followed by one line per cause.
pub fn error_lines(error: &anyhow::Error) -> Vec<String> {
    match error.downcast_ref::<FetchError>() {
        Some(FetchError::AllSourcesFailed { legacy, modern }) => vec![
            "All notebook sources failed.".to_string(),
            format!("legacy: {legacy}"),
            format!("modern: {modern}"),
        ],
        None => std::iter::once("Could not load notebook entries.".to_string())
            .chain(error.chain().map(|cause| cause.to_string()))
            .collect(),
    }
}

impl Widget for LoadError<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Notebook: load failed ")
            .border_style(self.theme.error);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut causes = error_lines(self.error).into_iter();
        let mut lines: Vec<Line> = Vec::new();
        if let Some(headline) = causes.next() {
            lines.push(Line::from(Span::styled(headline, self.theme.error)));
            lines.push(Line::default());
        }
        lines.extend(causes.map(|cause| Line::from(format!("  {cause}"))));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            RETRY_HINT,
            Style::default().add_modifier(Modifier::BOLD),
        )));

        Paragraph::new(lines).wrap(Wrap { trim: false }).render(inner, buf);
    }
}

use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};

use crate::host::{TerminalHost, PADDING};
use crate::theme::Theme;

pub struct SectionViewWidget;

impl SectionViewWidget {
    /// Render the panes visible at `offset` rows into the container
    pub fn render(frame: &mut Frame, area: Rect, host: &TerminalHost, offset: f64, theme: &Theme) {
        let pad = " ".repeat(PADDING as usize);
        let lines: Vec<Line> = visible_rows(host, offset, area.height)
            .into_iter()
            .map(|row| Line::from(format!("{pad}{}", row.unwrap_or(""))))
            .collect();

        let paragraph = Paragraph::new(lines)
            .style(Style::default().fg(theme.fg).bg(theme.bg))
            .block(Block::default().style(Style::default().bg(theme.bg)));
        frame.render_widget(paragraph, area);
    }
}

/// Text for each screen row when the container is shifted up by `offset` rows
///
/// Every section occupies exactly one pane of the host's height; within its
/// pane a section shows its text from its own scroll position.
pub fn visible_rows(host: &TerminalHost, offset: f64, rows: u16) -> Vec<Option<&str>> {
    let pane = host.height() as usize;
    let start = offset.max(0.0).round() as usize;

    (0..rows as usize)
        .map(|r| {
            let global = start + r;
            let section = global / pane;
            if section >= host.section_count() {
                return None;
            }
            let line = host.section_scroll(section) as usize + global % pane;
            host.section_rows(section).get(line).map(String::as_str)
        })
        .collect()
}

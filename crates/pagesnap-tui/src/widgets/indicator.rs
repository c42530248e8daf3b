use pagesnap_core::indicator::Dot;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Theme;

const DOT: &str = "○";
const DOT_ACTIVE: &str = "●";

pub struct IndicatorWidget;

impl IndicatorWidget {
    pub fn render(frame: &mut Frame, area: Rect, dots: &[Dot], theme: &Theme) {
        let bg = Style::default().bg(theme.bg);
        frame.render_widget(Paragraph::new("").style(bg), area);

        for (dot, cell) in dots.iter().zip(dot_cells(area, dots.len())) {
            let (symbol, color) = if dot.active {
                (DOT_ACTIVE, theme.dot_active)
            } else {
                (DOT, theme.dot)
            };
            let line = Line::from(Span::styled(symbol, Style::default().fg(color).bg(theme.bg)));
            frame.render_widget(Paragraph::new(line), cell);
        }
    }
}

/// One-cell rects for `count` dots, centred vertically in `area`
///
/// Dots are spaced one row apart when they fit; dots that do not fit at all
/// are left out.
pub fn dot_cells(area: Rect, count: usize) -> Vec<Rect> {
    if area.width == 0 || area.height == 0 || count == 0 {
        return Vec::new();
    }

    let height = area.height as usize;
    let step = if count * 2 - 1 <= height { 2 } else { 1 };
    let shown = count.min(height);
    let span = (shown - 1) * step + 1;
    let top = area.y as usize + (height - span) / 2;
    let x = area.x + area.width / 2;

    (0..shown)
        .map(|i| Rect::new(x, (top + i * step) as u16, 1, 1))
        .collect()
}

/// Dot under a mouse position, if any
pub fn dot_at(area: Rect, count: usize, column: u16, row: u16) -> Option<usize> {
    if column < area.x || column >= area.x + area.width {
        return None;
    }
    dot_cells(area, count).iter().position(|cell| cell.y == row)
}

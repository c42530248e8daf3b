use pagesnap_core::Phase;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let base = Style::default().fg(theme.fg).bg(theme.status_bg);

        if let Mode::Fragment(input) = &app.mode {
            let line = Line::from(vec![
                Span::styled(" #", base.fg(theme.accent).add_modifier(Modifier::BOLD)),
                Span::styled(input.clone(), base),
                Span::styled("█", base.fg(theme.muted)),
            ]);
            frame.render_widget(Paragraph::new(line).style(base), area);
            return;
        }

        let phase = app.phase();
        let phase_style = match phase {
            Phase::Bound => base.fg(theme.accent),
            Phase::Destroyed => base.fg(theme.warning),
            Phase::Unbound => base.fg(theme.muted),
        };

        let status_text = match &app.status_message {
            Some(msg) => format!(" {} ", msg),
            None => format!(" {} | {} ", position_text(app), app.controller.host().location()),
        };
        let phase_text = format!(" {} ", phase_label(phase));

        let keys = &app.config.keymap;
        let help_hint = format!(
            " {}:quit {}:destroy {}:rebuild {}:jump ",
            keys.quit, keys.destroy, keys.rebuild, keys.fragment
        );

        let used = status_text.width() + phase_text.width() + help_hint.width();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(phase_text, phase_style.add_modifier(Modifier::BOLD)),
            Span::styled(status_text, base),
            Span::styled(" ".repeat(padding_len), base),
            Span::styled(help_hint, base.fg(theme.muted)),
        ]);

        frame.render_widget(Paragraph::new(line).style(base), area);
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Unbound => "UNBOUND",
        Phase::Bound => "BOUND",
        Phase::Destroyed => "DESTROYED",
    }
}

/// "2/5 #anchor" for the current section
fn position_text(app: &App) -> String {
    let current = app.controller.current();
    let total = app.controller.section_count();
    match app.controller.host().section_anchor(current) {
        Some(anchor) => format!("{}/{} #{}", current + 1, total, anchor),
        None => format!("{}/{}", current + 1, total),
    }
}

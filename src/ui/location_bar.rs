use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let bg = Theme::BG_ELEVATED;
    let history = &state.history;

    let arrow = |enabled: bool, glyph: &'static str| {
        let fg = if enabled {
            Theme::ACCENT_TEAL
        } else {
            Theme::TEXT_MUTED
        };
        Span::styled(glyph, Style::default().fg(fg).bg(bg))
    };

    let line = Line::from(vec![
        arrow(history.can_go_back(), " ◀ "),
        arrow(history.can_go_forward(), "▶ "),
        Span::styled(
            history.current().location(),
            Style::default()
                .fg(Theme::TEXT_PRIMARY)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

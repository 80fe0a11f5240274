use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    let (badge, badge_fg) = match (state.watchdog.enabled, state.watchdog.remaining) {
        (false, _) => (" OFF ", Theme::TEXT_MUTED),
        (true, Some(_)) => (" ARMED ", Theme::ACCENT_GREEN),
        (true, None) => (" IDLE ", Theme::ACCENT_AMBER),
    };
    parts.push(Span::styled(
        badge,
        Style::default().fg(badge_fg).bg(Color::DarkGray),
    ));

    parts.push(Span::styled(
        format!(" {} ", state.status_line()),
        Theme::status_bar(),
    ));

    let hint = "Alt+←/→ history  Ctrl+C quit";
    let used: usize = parts.iter().map(|s| s.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + hint.chars().count() + 2);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" {} ", hint),
        Style::default().fg(Color::Cyan).bg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

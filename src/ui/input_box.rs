use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Go to ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border_focused())
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = &state.input;
    let line = if input.text.is_empty() {
        Line::from(vec![
            Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL)),
            Span::styled(
                "/location/<slug>/set/<slug>  or  /help",
                Style::default().fg(Theme::TEXT_MUTED),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL)),
            Span::styled(input.text.as_str(), Theme::input_text()),
        ])
    };
    frame.render_widget(Paragraph::new(line), inner);

    // Cursor offset: chevron "❯ " is 2 columns
    let prompt_offset = 2u16;
    let cursor_col = input.text[..input.cursor].chars().count() as u16;
    let cursor_x = inner.x + prompt_offset + cursor_col;
    if inner.width > 0 {
        frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
    }
}

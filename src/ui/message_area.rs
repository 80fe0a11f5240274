use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Session ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let log = &state.log;
    let available_height = inner.height as usize;
    let total = log.entries.len();

    // Visible range with scroll offset
    let end = total.saturating_sub(log.scroll_offset);
    let start = end.saturating_sub(available_height);

    let lines: Vec<Line> = log
        .entries
        .iter()
        .skip(start)
        .take(end - start)
        .map(format_entry)
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);

    if total > available_height {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(available_height)).position(start);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_symbol("┃")
            .track_symbol(Some("│"))
            .thumb_style(Theme::scrollbar_thumb())
            .track_style(Theme::scrollbar_track());

        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn format_entry(entry: &LogEntry) -> Line<'static> {
    let ts = Span::styled(format!("[{}] ", entry.timestamp), Theme::timestamp());

    let (marker, marker_color, text_style) = match entry.kind {
        EntryKind::Navigation => ("", Theme::ACCENT_TEAL, Theme::navigation_entry()),
        EntryKind::Reset => ("⟲ ", Theme::ACCENT_AMBER, Theme::reset_entry()),
        EntryKind::System => ("• ", Theme::ACCENT_AMBER, Theme::system_message()),
        EntryKind::Error => ("✘ ", Theme::ACCENT_ROSE, Theme::error_message()),
    };

    Line::from(vec![
        ts,
        Span::styled(marker, Style::default().fg(marker_color)),
        Span::styled(entry.text.clone(), text_style),
    ])
}

mod input_box;
mod layout;
mod location_bar;
mod message_area;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};
use theme::Theme;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    location_bar::render(frame, app_layout.location_bar, state);
    message_area::render(frame, app_layout.message_area, state);
    render_route_panel(frame, app_layout.route_panel, state);
    input_box::render(frame, app_layout.input_box, state);
    status_bar::render(frame, app_layout.status_bar, state);
}

fn render_route_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Route ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border());

    let slugs = state.history.current().slugs();
    let slug_item = |label: &'static str, value: &str| {
        let value = if value.is_empty() {
            Span::styled("-", Style::default().fg(Theme::TEXT_MUTED))
        } else {
            Span::styled(value.to_string(), Theme::slug_value())
        };
        ListItem::new(Line::from(vec![
            Span::styled(format!(" {:<9}", label), Theme::slug_label()),
            value,
        ]))
    };

    let mut items = vec![
        slug_item("location", &slugs.location),
        slug_item("set", &slugs.current),
        slug_item("object", &slugs.object),
        ListItem::new(""),
    ];

    let (verdict, color) = if !state.watchdog.enabled {
        ("watchdog off", Theme::TEXT_MUTED)
    } else if slugs.should_reset() {
        ("resets when idle", Theme::ACCENT_AMBER)
    } else {
        ("stays when idle", Theme::ACCENT_GREEN)
    };
    items.push(ListItem::new(Span::styled(
        format!(" {}", verdict),
        Style::default().fg(color),
    )));

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

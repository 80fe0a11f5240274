use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub location_bar: Rect,
    pub message_area: Rect,
    pub route_panel: Rect,
    pub input_box: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Vertical: location bar | content | input | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Location bar
            Constraint::Min(5),    // Main content
            Constraint::Length(3), // Input box
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    // Horizontal: session log | gap | route panel
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([Constraint::Min(30), Constraint::Length(30)])
        .split(main_chunks[1]);

    AppLayout {
        location_bar: main_chunks[0],
        message_area: h_chunks[0],
        route_panel: h_chunks[1],
        input_box: main_chunks[2],
        status_bar: main_chunks[3],
    }
}

use crate::app::action::{Action, ActivityKind};
use crate::app::commands::{self, InputLine, ParsedCommand};
use crate::app::event::AppEvent;
use crate::app::state::*;
use crossterm::event::{
    Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => handle_terminal(state, cevent),
        AppEvent::IdleTimeout { generation } => vec![Action::IdleExpired { generation }],
        AppEvent::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // Keep the countdown moving
            if state.watchdog.remaining.is_some() {
                state.dirty = true;
            }
            vec![]
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => {
            state.dirty = true;
            let mut actions = Vec::new();
            if state.config.activity.keys {
                actions.push(Action::Activity {
                    kind: ActivityKind::Key,
                });
            }
            actions.extend(handle_key(state, key));
            actions
        }
        CEvent::Mouse(mouse) => handle_mouse(state, mouse),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> Vec<Action> {
    let activity = &state.config.activity;
    match mouse.kind {
        MouseEventKind::Down(_) if activity.clicks => vec![Action::Activity {
            kind: ActivityKind::Click,
        }],
        MouseEventKind::Up(_) if activity.touches => vec![Action::Activity {
            kind: ActivityKind::TouchEnd,
        }],
        MouseEventKind::ScrollUp => {
            state.log.scroll_up(3);
            state.dirty = true;
            vec![]
        }
        MouseEventKind::ScrollDown => {
            state.log.scroll_down(3);
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => vec![Action::Quit],
        KeyCode::Char('w') if ctrl => {
            state.input.delete_segment_back();
            vec![]
        }
        KeyCode::Left if alt => vec![Action::Back],
        KeyCode::Right if alt => vec![Action::Forward],
        KeyCode::Char(c) if !ctrl => {
            state.input.insert_char(c);
            vec![]
        }
        KeyCode::Backspace => {
            state.input.delete_back();
            vec![]
        }
        KeyCode::Delete => {
            state.input.delete_forward();
            vec![]
        }
        KeyCode::Left => {
            state.input.move_left();
            vec![]
        }
        KeyCode::Right => {
            state.input.move_right();
            vec![]
        }
        KeyCode::Home => {
            state.input.move_home();
            vec![]
        }
        KeyCode::End => {
            state.input.move_end();
            vec![]
        }
        KeyCode::Up => {
            state.input.history_up();
            vec![]
        }
        KeyCode::Down => {
            state.input.history_down();
            vec![]
        }
        KeyCode::PageUp => {
            state.log.scroll_up(10);
            vec![]
        }
        KeyCode::PageDown => {
            state.log.scroll_down(10);
            vec![]
        }
        KeyCode::Enter => {
            let text = state.input.take_text();
            submit_input(state, &text)
        }
        _ => vec![],
    }
}

fn submit_input(state: &mut AppState, text: &str) -> Vec<Action> {
    match commands::parse_input(text) {
        InputLine::Empty => vec![],
        InputLine::Location(location) => vec![Action::Navigate { location }],
        InputLine::Invalid(text) => {
            state.error_message(format!(
                "Not a path: {:?} (paths start with '/', try /help)",
                text
            ));
            vec![]
        }
        InputLine::Command(cmd) => match cmd {
            ParsedCommand::Go { location } => vec![Action::Navigate { location }],
            ParsedCommand::Back => vec![Action::Back],
            ParsedCommand::Forward => vec![Action::Forward],
            ParsedCommand::Home => vec![Action::Home],
            ParsedCommand::Status => vec![Action::ShowStatus],
            ParsedCommand::Quit => vec![Action::Quit],
            ParsedCommand::Help => {
                for line in commands::HELP_LINES {
                    state.system_message((*line).to_string());
                }
                vec![]
            }
            ParsedCommand::Usage(usage) => {
                state.error_message(format!("Usage: {}", usage));
                vec![]
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crossterm::event::{KeyEventState, MouseButton};

    fn state_with(config: AppConfig) -> AppState {
        let base = config.base_url().unwrap();
        AppState::new(config, base)
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
    }

    fn mouse(kind: MouseEventKind) -> AppEvent {
        AppEvent::Terminal(CEvent::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn type_line(state: &mut AppState, line: &str) -> Vec<Action> {
        for c in line.chars() {
            handle_event(state, key(KeyCode::Char(c)));
        }
        handle_event(state, key(KeyCode::Enter))
    }

    #[test]
    fn test_click_and_touch_are_activity() {
        let mut state = state_with(AppConfig::default());
        assert_eq!(
            handle_event(&mut state, mouse(MouseEventKind::Down(MouseButton::Left))),
            vec![Action::Activity { kind: ActivityKind::Click }]
        );
        assert_eq!(
            handle_event(&mut state, mouse(MouseEventKind::Up(MouseButton::Left))),
            vec![Action::Activity { kind: ActivityKind::TouchEnd }]
        );
        assert!(handle_event(&mut state, mouse(MouseEventKind::Moved)).is_empty());
    }

    #[test]
    fn test_disabled_sources_are_ignored() {
        let mut config = AppConfig::default();
        config.activity.clicks = false;
        config.activity.keys = false;
        let mut state = state_with(config);
        assert!(handle_event(&mut state, mouse(MouseEventKind::Down(MouseButton::Left))).is_empty());
        assert!(handle_event(&mut state, key(KeyCode::Char('x'))).is_empty());
        assert_eq!(state.input.text, "x");
    }

    #[test]
    fn test_enter_navigates() {
        let mut state = state_with(AppConfig::default());
        let actions = type_line(&mut state, "/location/park1/set/zoo2");
        assert_eq!(
            actions,
            vec![
                Action::Activity { kind: ActivityKind::Key },
                Action::Navigate {
                    location: "/location/park1/set/zoo2".into()
                },
            ]
        );
        assert!(state.input.text.is_empty());
    }

    #[test]
    fn test_commands_map_to_actions() {
        let mut config = AppConfig::default();
        config.activity.keys = false;
        let mut state = state_with(config);
        assert_eq!(type_line(&mut state, "/back"), vec![Action::Back]);
        assert_eq!(type_line(&mut state, "/home"), vec![Action::Home]);
        assert_eq!(type_line(&mut state, "/status"), vec![Action::ShowStatus]);

        let before = state.log.entries.len();
        assert!(type_line(&mut state, "nowhere").is_empty());
        assert_eq!(state.log.entries.back().unwrap().kind, EntryKind::Error);
        assert_eq!(state.log.entries.len(), before + 1);
    }

    #[test]
    fn test_idle_timeout_becomes_action() {
        let mut state = state_with(AppConfig::default());
        assert_eq!(
            handle_event(&mut state, AppEvent::IdleTimeout { generation: 4 }),
            vec![Action::IdleExpired { generation: 4 }]
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut config = AppConfig::default();
        config.activity.keys = false;
        let mut state = state_with(config);
        let event = AppEvent::Terminal(CEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert_eq!(handle_event(&mut state, event), vec![Action::Quit]);
    }
}

use crate::config::AppConfig;
use crate::nav::NavigationHistory;
use chrono::Local;
use std::collections::VecDeque;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub text: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Navigation,
    Reset,
    System,
    Error,
}

/// Scrollback of session events shown in the log pane.
#[derive(Debug, Default)]
pub struct SessionLog {
    pub entries: VecDeque<LogEntry>,
    pub scroll_offset: usize,
}

impl SessionLog {
    pub fn push(&mut self, entry: LogEntry, max_scrollback: usize) {
        self.entries.push_back(entry);
        while self.entries.len() > max_scrollback.max(1) {
            self.entries.pop_front();
            self.scroll_offset = self.scroll_offset.saturating_sub(1);
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let max = self.entries.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + lines).min(max);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }
}

/// Single-line editor for the location/command input.
#[derive(Debug, Default)]
pub struct InputState {
    pub text: String,
    /// Byte offset into `text`, always on a char boundary.
    pub cursor: usize,
    pub history: Vec<String>,
    pub history_index: Option<usize>,
}

impl InputState {
    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    pub fn delete_back(&mut self) {
        let prev = self.prev_boundary();
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
    }

    pub fn delete_forward(&mut self) {
        let next = self.next_boundary();
        self.text.drain(self.cursor..next);
    }

    /// Delete back to the previous `/` or space, so Ctrl+W drops one path
    /// segment at a time.
    pub fn delete_segment_back(&mut self) {
        let head = &self.text[..self.cursor];
        let trimmed = head.trim_end_matches(['/', ' ']);
        let start = trimmed.rfind(['/', ' ']).map_or(0, |i| i + 1);
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn take_text(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.history_index = None;
        if !text.trim().is_empty() && self.history.last() != Some(&text) {
            self.history.push(text.clone());
        }
        text
    }

    pub fn history_up(&mut self) {
        let idx = match self.history_index {
            Some(0) => return,
            Some(i) => i - 1,
            None if self.history.is_empty() => return,
            None => self.history.len() - 1,
        };
        self.recall(Some(idx));
    }

    pub fn history_down(&mut self) {
        match self.history_index {
            Some(i) if i + 1 < self.history.len() => self.recall(Some(i + 1)),
            Some(_) => self.recall(None),
            None => {}
        }
    }

    fn recall(&mut self, idx: Option<usize>) {
        self.history_index = idx;
        self.text = idx.map(|i| self.history[i].clone()).unwrap_or_default();
        self.cursor = self.text.len();
    }
}

/// Watchdog snapshot for rendering.
#[derive(Debug, Clone, Default)]
pub struct WatchdogStatus {
    pub enabled: bool,
    pub remaining: Option<Duration>,
    pub resets: u64,
}

pub struct AppState {
    pub config: AppConfig,
    pub history: NavigationHistory,
    pub log: SessionLog,
    pub input: InputState,
    pub watchdog: WatchdogStatus,
    /// Entries added since the session logger last drained them.
    pub new_entries: Vec<LogEntry>,
    pub should_quit: bool,
    pub dirty: bool,
    pub tick_count: u64,
}

impl AppState {
    pub fn new(config: AppConfig, base_url: Url) -> Self {
        let history = NavigationHistory::new(base_url, &config.shell.start_path);
        let mut state = Self {
            watchdog: WatchdogStatus {
                enabled: config.watchdog.enabled,
                ..WatchdogStatus::default()
            },
            config,
            history,
            log: SessionLog::default(),
            input: InputState::default(),
            new_entries: Vec::new(),
            should_quit: false,
            dirty: true,
            tick_count: 0,
        };
        state.record_location();
        state
    }

    pub fn add_entry(&mut self, kind: EntryKind, text: String) {
        let entry = LogEntry {
            timestamp: Local::now().format(&self.config.shell.timestamp_format).to_string(),
            text,
            kind,
        };
        self.new_entries.push(entry.clone());
        self.log.push(entry, self.config.shell.max_scrollback);
        self.dirty = true;
    }

    pub fn system_message(&mut self, text: String) {
        self.add_entry(EntryKind::System, text);
    }

    pub fn error_message(&mut self, text: String) {
        self.add_entry(EntryKind::Error, text);
    }

    /// Log the location just navigated to, noting idle-reset arrivals.
    pub fn record_location(&mut self) {
        let current = self.history.current();
        let location = current.location();
        let reset_arrival = current.is_timeout_reset(&self.config.watchdog.timeout_param);
        self.add_entry(EntryKind::Navigation, format!("→ {}", location));
        if reset_arrival {
            self.add_entry(EntryKind::Reset, "Session reset after inactivity".to_string());
        }
    }

    pub fn status_line(&self) -> String {
        if !self.watchdog.enabled {
            return "Watchdog: off".to_string();
        }
        let mut s = match self.watchdog.remaining {
            Some(left) => format!("Idle reset in {}", format_countdown(left)),
            None => "Watchdog: waiting for activity".to_string(),
        };
        if self.watchdog.resets > 0 {
            s.push_str(&format!(" | Resets: {}", self.watchdog.resets));
        }
        s
    }
}

/// `m:ss`, rounded up so the display never shows 0:00 while still armed.
pub fn format_countdown(left: Duration) -> String {
    let secs = left.as_millis().div_ceil(1000) as u64;
    format!("{}:{:02}", secs / 60, secs % 60)
}

//! Session logging to disk and diagnostics setup.
//!
//! When enabled, navigation and idle-reset records are appended to daily log
//! files named `session_<date>.log` in the configured log directory
//! (default: `~/.local/share/kioskwatch/logs/`).
//!
//! Diagnostics go through `tracing`. The TUI owns the terminal, so they are
//! only written when `logging.diagnostics_file` is set.

use crate::app::state::{EntryKind, LogEntry};
use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "KIOSKWATCH_LOG";

/// Install the global `tracing` subscriber.
pub fn init_diagnostics(config: &LoggingConfig) -> Result<()> {
    let Some(path) = config.diagnostics_file.as_deref() else {
        return Ok(());
    };
    let path = expand_home(&path.to_string_lossy());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open diagnostics file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;
    Ok(())
}

/// Appends session entries to a daily log file.
///
/// The file handle is cached until the date rolls over. If the file cannot
/// be opened the logger disables itself after one warning.
pub struct SessionLogger {
    enabled: bool,
    log_dir: PathBuf,
    log_navigation: bool,
    log_resets: bool,
    current: Option<(String, File)>,
}

impl SessionLogger {
    pub fn new(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.enabled,
            log_dir: expand_home(&config.log_dir),
            log_navigation: config.log_navigation,
            log_resets: config.log_resets,
            current: None,
        }
    }

    /// Write an entry. No-op if logging is disabled or the entry kind is not
    /// configured for logging.
    pub fn log_entry(&mut self, entry: &LogEntry) {
        if !self.enabled {
            return;
        }

        let line = match entry.kind {
            EntryKind::Navigation if self.log_navigation => {
                format!("[{}] NAV {}", entry.timestamp, entry.text)
            }
            EntryKind::Reset if self.log_resets => {
                format!("[{}] RESET {}", entry.timestamp, entry.text)
            }
            EntryKind::Error => format!("[{}] !!! {}", entry.timestamp, entry.text),
            _ => return,
        };

        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        if let Err(e) = self.write_line(&date, &line) {
            tracing::warn!(error = %e, "session log disabled");
            self.enabled = false;
        }
    }

    fn write_line(&mut self, date: &str, line: &str) -> Result<()> {
        let stale = !matches!(&self.current, Some((d, _)) if d == date);
        if stale {
            fs::create_dir_all(&self.log_dir).with_context(|| {
                format!("Failed to create log directory {}", self.log_dir.display())
            })?;
            let path = self.log_dir.join(format!("session_{}.log", date));
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            self.current = Some((date.to_string(), file));
        }

        if let Some((_, file)) = self.current.as_mut() {
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}

fn expand_home(dir: &str) -> PathBuf {
    match dir.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => Path::new(dir).to_path_buf(),
        },
        None => PathBuf::from(dir),
    }
}

//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the shell works out of the box.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub watchdog: WatchdogConfig,
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub activity: ActivityConfig,
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Idle session-reset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchdogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Inactivity before the reset check runs, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Reset path; `{location}` is replaced by the location slug.
    #[serde(default = "default_target_template")]
    pub target_template: String,
    /// Query parameter set to `true` on reset URLs.
    #[serde(default = "default_timeout_param")]
    pub timeout_param: String,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: default_timeout_ms(),
            target_template: default_target_template(),
            timeout_param: default_timeout_param(),
        }
    }
}

/// Kiosk shell settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Origin the kiosk application is served from. Reset URLs are built
    /// against it and redirects to other origins are refused.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_start_path")]
    pub start_path: String,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default = "default_max_scrollback")]
    pub max_scrollback: usize,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            start_path: default_start_path(),
            timestamp_format: default_timestamp_format(),
            max_scrollback: default_max_scrollback(),
            tick_ms: default_tick_ms(),
        }
    }
}

/// Which interactions count as visitor activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    #[serde(default = "default_true")]
    pub clicks: bool,
    #[serde(default = "default_true")]
    pub touches: bool,
    #[serde(default = "default_true")]
    pub keys: bool,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            clicks: true,
            touches: true,
            keys: true,
        }
    }
}

/// Backend endpoints the kiosk application talks to. Only reported at
/// startup; the shell itself makes no requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default)]
    pub graphql_url: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub env: Option<String>,
}

/// Session log and diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_true")]
    pub log_navigation: bool,
    #[serde(default = "default_true")]
    pub log_resets: bool,
    #[serde(default)]
    pub diagnostics_file: Option<PathBuf>,
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            log_navigation: true,
            log_resets: true,
            diagnostics_file: None,
            level: default_level(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_timeout_ms() -> u64 {
    120_000
}
fn default_target_template() -> String {
    "/location/{location}/set/{location}".to_string()
}
fn default_timeout_param() -> String {
    "timeout".to_string()
}
fn default_base_url() -> String {
    "http://localhost:5000/".to_string()
}
fn default_start_path() -> String {
    "/".to_string()
}
fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}
fn default_max_scrollback() -> usize {
    1000
}
fn default_tick_ms() -> u64 {
    250
}
fn default_log_dir() -> String {
    "~/.local/share/kioskwatch/logs".to_string()
}
fn default_level() -> String {
    "info".to_string()
}

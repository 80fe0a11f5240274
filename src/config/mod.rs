pub mod model;

use crate::route::target::LOCATION_PLACEHOLDER;
use crate::route::TargetUrlBuilder;
use crate::watchdog::ResetConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub use model::{AppConfig, LoggingConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("watchdog.timeout_ms must be greater than zero")]
    ZeroTimeout,
    #[error("watchdog.target_template must contain {{location}}: {0:?}")]
    MissingPlaceholder(String),
    #[error("watchdog.timeout_param must not be empty")]
    EmptyTimeoutParam,
    #[error("shell.base_url is not a valid absolute URL ({url}): {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("shell.start_path must begin with '/': {0:?}")]
    RelativeStartPath(String),
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kioskwatch")
        .join("config.toml")
}

/// Load the config from `path` (or the default location), falling back to
/// defaults when the default file does not exist.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (config_path(), false),
    };
    if !explicit && !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    parse_config(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;
    Ok(config)
}

pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(())
}

/// Apply environment overrides. `lookup` is `std::env::var` in production.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("KIOSK_TIMEOUT_MS") {
        config.watchdog.timeout_ms = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            var: "KIOSK_TIMEOUT_MS",
            value,
        })?;
    }
    if let Some(value) = lookup("KIOSK_BASE_URL") {
        config.shell.base_url = value;
    }
    if let Some(value) = lookup("KIOSK_START_PATH") {
        config.shell.start_path = value;
    }

    let endpoints = &mut config.endpoints;
    for (var, slot) in [
        ("GRAPHQL_URL", &mut endpoints.graphql_url),
        ("API_URL", &mut endpoints.api_url),
        ("URL", &mut endpoints.url),
        ("ENV", &mut endpoints.env),
    ] {
        if let Some(value) = lookup(var) {
            *slot = Some(value);
        }
    }
    Ok(())
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.watchdog.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if !self.watchdog.target_template.contains(LOCATION_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder(
                self.watchdog.target_template.clone(),
            ));
        }
        if self.watchdog.timeout_param.is_empty() {
            return Err(ConfigError::EmptyTimeoutParam);
        }
        if !self.shell.start_path.starts_with('/') {
            return Err(ConfigError::RelativeStartPath(self.shell.start_path.clone()));
        }
        self.base_url()?;
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.shell.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.shell.base_url.clone(),
            source,
        })
    }

    pub fn reset_config(&self) -> Result<ResetConfig, ConfigError> {
        let target = TargetUrlBuilder::new(
            self.base_url()?,
            self.watchdog.target_template.clone(),
            self.watchdog.timeout_param.clone(),
        );
        Ok(ResetConfig {
            timeout: Duration::from_millis(self.watchdog.timeout_ms),
            target,
        })
    }
}

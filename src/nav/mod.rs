//! Navigation source and navigator for the kiosk shell.
//!
//! [`NavigationHistory`] owns the back/forward stack and publishes the current
//! location on a `watch` channel so the watchdog can sample it at any time.
//! The [`Navigator`] trait is the full-load capability the watchdog's
//! redirects go through.

pub mod history;

pub use history::NavigationHistory;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("refusing to load {url}: origin differs from {base}")]
    ForeignOrigin { url: String, base: String },
}

/// Performs a full load of an absolute URL in the current browsing context.
pub trait Navigator {
    fn redirect(&mut self, url: &Url) -> Result<(), NavError>;
}

//! Kiosk URL scheme: `/location/<loc>/set/<set>/object/<obj>`.
//!
//! Parses locations into positional path segments and extracts the three
//! slugs the session-reset watchdog decides on.

pub mod target;

pub use target::TargetUrlBuilder;

/// A single observed location: positional path segments plus the raw query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    path: String,
    query: Option<String>,
    segments: Vec<String>,
}

impl NavigationState {
    /// Parse a location such as `/location/park1/set/zoo2?timeout=true`.
    ///
    /// One leading `/` is dropped; interior empty segments are kept so slug
    /// positions match what was typed.
    pub fn parse(location: &str) -> Self {
        let without_fragment = location.split('#').next().unwrap_or_default();
        let (path, query) = match without_fragment.split_once('?') {
            Some((p, q)) => (p, Some(q.to_string())),
            None => (without_fragment, None),
        };
        let path = if path.is_empty() { "/" } else { path };

        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let segments = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').map(str::to_string).collect()
        };

        Self {
            path: path.to_string(),
            query: query.filter(|q| !q.is_empty()),
            segments,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path and query as typed into the location bar.
    pub fn location(&self) -> String {
        match self.query() {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    pub fn slugs(&self) -> RouteSlugs {
        RouteSlugs::from_segments(self.segments())
    }

    /// True when the query carries `<marker>=true`, i.e. this page was
    /// reached through an idle reset.
    pub fn is_timeout_reset(&self, marker: &str) -> bool {
        let Some(query) = self.query.as_deref() else {
            return false;
        };
        url::form_urlencoded::parse(query.as_bytes()).any(|(k, v)| k == marker && v == "true")
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::parse("/")
    }
}

/// Location, current set and object slugs. Empty when the matching keyword
/// segment is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSlugs {
    pub location: String,
    pub current: String,
    pub object: String,
}

impl RouteSlugs {
    pub fn from_segments(segments: &[String]) -> Self {
        Self {
            location: keyed_slug(segments, 0, "location"),
            current: keyed_slug(segments, 2, "set"),
            object: keyed_slug(segments, 4, "object"),
        }
    }

    /// Whether an idle timeout on this route should send the kiosk home.
    ///
    /// The visitor has left the location's own set, or is on an object page.
    pub fn should_reset(&self) -> bool {
        let left_home_set = !self.location.is_empty()
            && !self.current.is_empty()
            && self.current != self.location;
        left_home_set || !self.object.is_empty()
    }
}

fn keyed_slug(segments: &[String], key_index: usize, keyword: &str) -> String {
    match segments.get(key_index) {
        Some(key) if key == keyword => segments.get(key_index + 1).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

use crate::nav::{NavError, Navigator};
use crate::route::NavigationState;
use tokio::sync::watch;
use url::Url;

/// Back/forward navigation stack with a persistent "current location"
/// subscription.
pub struct NavigationHistory {
    base: Url,
    entries: Vec<NavigationState>,
    index: usize,
    full_loads: u64,
    current_tx: watch::Sender<NavigationState>,
}

impl NavigationHistory {
    pub fn new(base: Url, start: &str) -> Self {
        let state = NavigationState::parse(start);
        let (current_tx, _) = watch::channel(state.clone());
        Self {
            base,
            entries: vec![state],
            index: 0,
            full_loads: 1,
            current_tx,
        }
    }

    /// A receiver that always holds the current location.
    pub fn subscribe(&self) -> watch::Receiver<NavigationState> {
        self.current_tx.subscribe()
    }

    pub fn current(&self) -> &NavigationState {
        &self.entries[self.index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of full page loads, including the initial one.
    pub fn full_loads(&self) -> u64 {
        self.full_loads
    }

    /// Client-side transition. Returns `false` if `location` is already
    /// current.
    pub fn push(&mut self, location: &str) -> bool {
        let state = NavigationState::parse(location);
        if *self.current() == state {
            return false;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(state);
        self.index = self.entries.len() - 1;
        self.publish();
        true
    }

    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        self.publish();
        true
    }

    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.index += 1;
        self.publish();
        true
    }

    fn publish(&self) {
        let state = self.current().clone();
        self.current_tx.send_replace(state);
    }
}

impl Navigator for NavigationHistory {
    /// Replace the whole history with `url`, as a fresh page load would.
    fn redirect(&mut self, url: &Url) -> Result<(), NavError> {
        if url.origin() != self.base.origin() {
            return Err(NavError::ForeignOrigin {
                url: url.to_string(),
                base: self.base.to_string(),
            });
        }

        let location = match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        };
        self.entries = vec![NavigationState::parse(&location)];
        self.index = 0;
        self.full_loads += 1;
        self.publish();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://kiosk.local/").unwrap()
    }

    #[test]
    fn test_push_and_back_forward() {
        let mut history = NavigationHistory::new(base(), "/location/park1/set/park1");
        assert!(history.push("/location/park1/set/zoo2"));
        assert!(history.push("/location/park1/set/zoo2/object/lion"));
        assert_eq!(history.len(), 3);

        assert!(history.back());
        assert_eq!(history.current().path(), "/location/park1/set/zoo2");
        assert!(history.forward());
        assert!(!history.forward());

        // Pushing after going back drops the forward entries
        history.back();
        history.back();
        history.push("/about");
        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_push_same_location_is_noop() {
        let mut history = NavigationHistory::new(base(), "/about");
        assert!(!history.push("/about"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_subscription_tracks_latest() {
        let mut history = NavigationHistory::new(base(), "/");
        let rx = history.subscribe();
        history.push("/location/a/set/b");
        history.push("/location/a/set/c");
        assert_eq!(rx.borrow().path(), "/location/a/set/c");
        history.back();
        assert_eq!(rx.borrow().path(), "/location/a/set/b");
    }

    #[test]
    fn test_redirect_replaces_history() {
        let mut history = NavigationHistory::new(base(), "/location/a/set/a");
        let rx = history.subscribe();
        history.push("/location/a/set/b");

        let url = Url::parse("http://kiosk.local/location/a/set/a?timeout=true").unwrap();
        history.redirect(&url).unwrap();

        assert_eq!(history.len(), 1);
        assert!(!history.can_go_back());
        assert_eq!(history.full_loads(), 2);
        assert_eq!(rx.borrow().location(), "/location/a/set/a?timeout=true");
    }

    #[test]
    fn test_redirect_rejects_foreign_origin() {
        let mut history = NavigationHistory::new(base(), "/");
        let url = Url::parse("https://elsewhere.example/location/a").unwrap();
        let err = history.redirect(&url).unwrap_err();
        assert!(matches!(err, NavError::ForeignOrigin { .. }));
        assert_eq!(history.full_loads(), 1);
    }
}

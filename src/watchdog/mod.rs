//! Idle session-reset watchdog.
//!
//! Arms a single delayed expiry that every click, tap or key press pushes
//! back by the configured timeout. When an expiry survives, the latest
//! location is sampled and, if the visitor has left the location's own set
//! or is on an object page, the kiosk is sent back to the location's reset
//! target with a full load.
//!
//! A firing that decides not to reset leaves the watchdog disarmed; only the
//! next activity rearms it.

pub mod scheduler;

pub use scheduler::{DelayScheduler, TokioScheduler};

use crate::route::{NavigationState, RouteSlugs, TargetUrlBuilder};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use url::Url;

/// Immutable watchdog settings.
#[derive(Debug, Clone)]
pub struct ResetConfig {
    pub timeout: Duration,
    pub target: TargetUrlBuilder,
}

/// Outcome of an expiry reaching the watchdog.
#[derive(Debug, Clone, PartialEq)]
pub enum ResetDecision {
    /// The expiry was cancelled by later activity, or has already fired.
    Stale,
    /// The route does not call for a reset; the watchdog is now disarmed.
    Idle { slugs: RouteSlugs },
    /// Navigate to `url` with a full load.
    Redirect { url: Url, slugs: RouteSlugs },
}

struct Pending<H> {
    handle: H,
    deadline: Instant,
}

pub struct SessionResetTimer<S: DelayScheduler> {
    config: ResetConfig,
    scheduler: S,
    current: watch::Receiver<NavigationState>,
    pending: Option<Pending<S::Handle>>,
    generation: u64,
}

impl<S: DelayScheduler> SessionResetTimer<S> {
    pub fn new(config: ResetConfig, scheduler: S, current: watch::Receiver<NavigationState>) -> Self {
        Self {
            config,
            scheduler,
            current,
            pending: None,
            generation: 0,
        }
    }

    /// Arm the watchdog for the first time.
    pub fn start(&mut self) {
        if self.pending.is_some() {
            tracing::warn!("watchdog started while already armed; rearming");
        }
        tracing::info!(timeout_ms = self.config.timeout.as_millis() as u64, "watchdog started");
        self.arm();
    }

    /// Push the expiry back by the full timeout. Call on every user
    /// interaction.
    pub fn notify_activity(&mut self) {
        self.arm();
    }

    /// Cancel any pending expiry without rearming.
    pub fn stop(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.scheduler.cancel(pending.handle);
            tracing::debug!(generation = self.generation, "watchdog stopped");
        }
    }

    /// Handle a delivered expiry for `generation`.
    pub fn fire(&mut self, generation: u64) -> Result<ResetDecision, url::ParseError> {
        if generation != self.generation || self.pending.is_none() {
            tracing::debug!(generation, live = self.generation, "ignoring stale expiry");
            return Ok(ResetDecision::Stale);
        }
        self.pending = None;

        let location = self.current.borrow().clone();
        let slugs = location.slugs();
        if !slugs.should_reset() {
            tracing::debug!(path = location.path(), "idle timeout, no reset needed");
            return Ok(ResetDecision::Idle { slugs });
        }

        let url = self.config.target.build(&slugs.location)?;
        tracing::info!(path = location.path(), target = %url, "idle timeout, resetting session");
        Ok(ResetDecision::Redirect { url, slugs })
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending expiry, if armed.
    pub fn remaining(&self) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.deadline.saturating_duration_since(Instant::now()))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    pub fn target(&self) -> &TargetUrlBuilder {
        &self.config.target
    }

    // Cancel strictly before scheduling the replacement.
    fn arm(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.scheduler.cancel(pending.handle);
        }
        self.generation = self.generation.wrapping_add(1);
        let handle = self.scheduler.schedule(self.config.timeout, self.generation);
        self.pending = Some(Pending {
            handle,
            deadline: Instant::now() + self.config.timeout,
        });
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every schedule/cancel so tests can inspect what is pending.
    #[derive(Default)]
    pub struct Ledger {
        pub scheduled: Vec<(Duration, u64)>,
        pub cancelled: Vec<u64>,
    }

    impl Ledger {
        pub fn live(&self) -> Vec<u64> {
            self.scheduled
                .iter()
                .map(|(_, g)| *g)
                .filter(|g| !self.cancelled.contains(g))
                .collect()
        }
    }

    #[derive(Clone, Default)]
    pub struct RecordingScheduler {
        pub ledger: Rc<RefCell<Ledger>>,
    }

    impl DelayScheduler for RecordingScheduler {
        type Handle = u64;

        fn schedule(&mut self, delay: Duration, generation: u64) -> u64 {
            self.ledger.borrow_mut().scheduled.push((delay, generation));
            generation
        }

        fn cancel(&mut self, handle: u64) {
            self.ledger.borrow_mut().cancelled.push(handle);
        }
    }

    pub fn reset_config(timeout: Duration) -> ResetConfig {
        let base = Url::parse("http://kiosk.local/").unwrap();
        ResetConfig {
            timeout,
            target: TargetUrlBuilder::new(base, "/location/{location}/set/{location}", "timeout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::app::event::AppEvent;
    use tokio::sync::mpsc;

    const TIMEOUT: Duration = Duration::from_secs(60);

    fn timer_at(
        path: &str,
    ) -> (
        SessionResetTimer<RecordingScheduler>,
        RecordingScheduler,
        watch::Sender<NavigationState>,
    ) {
        let (tx, rx) = watch::channel(NavigationState::parse(path));
        let scheduler = RecordingScheduler::default();
        let timer = SessionResetTimer::new(reset_config(TIMEOUT), scheduler.clone(), rx);
        (timer, scheduler, tx)
    }

    fn fire_current(timer: &mut SessionResetTimer<RecordingScheduler>) -> ResetDecision {
        let generation = timer.generation();
        timer.fire(generation).unwrap()
    }

    #[test]
    fn test_start_schedules_once() {
        let (mut timer, scheduler, _tx) = timer_at("/");
        timer.start();
        let ledger = scheduler.ledger.borrow();
        assert_eq!(ledger.scheduled, vec![(TIMEOUT, 1)]);
        assert!(timer.is_armed());
    }

    #[test]
    fn test_same_set_does_not_reset() {
        let (mut timer, _, _tx) = timer_at("/location/park1/set/park1");
        timer.start();
        assert!(matches!(fire_current(&mut timer), ResetDecision::Idle { .. }));
    }

    #[test]
    fn test_other_set_resets_to_location() {
        let (mut timer, _, _tx) = timer_at("/location/park1/set/zoo2");
        timer.start();
        match fire_current(&mut timer) {
            ResetDecision::Redirect { url, slugs } => {
                assert_eq!(url.as_str(), "http://kiosk.local/location/park1/set/park1?timeout=true");
                assert_eq!(slugs.current, "zoo2");
            }
            other => panic!("expected redirect, got {:?}", other),
        }
    }

    #[test]
    fn test_object_page_always_resets() {
        let (mut timer, _, _tx) = timer_at("/location/park1/set/park1/object/lion");
        timer.start();
        assert!(matches!(fire_current(&mut timer), ResetDecision::Redirect { .. }));
    }

    #[test]
    fn test_unrelated_page_does_not_reset() {
        let (mut timer, _, _tx) = timer_at("/about");
        timer.start();
        assert!(matches!(fire_current(&mut timer), ResetDecision::Idle { .. }));
    }

    #[test]
    fn test_samples_latest_path_at_firing() {
        let (mut timer, _, tx) = timer_at("/location/park1/set/park1");
        timer.start();
        tx.send_replace(NavigationState::parse("/location/park1/set/zoo2"));
        tx.send_replace(NavigationState::parse("/location/park1/set/aviary"));
        match fire_current(&mut timer) {
            ResetDecision::Redirect { slugs, .. } => assert_eq!(slugs.current, "aviary"),
            other => panic!("expected redirect, got {:?}", other),
        }
    }

    #[test]
    fn test_rapid_activity_leaves_one_pending() {
        let (mut timer, scheduler, _tx) = timer_at("/location/park1/set/zoo2");
        timer.start();
        for _ in 0..10 {
            timer.notify_activity();
        }
        let ledger = scheduler.ledger.borrow();
        assert_eq!(ledger.scheduled.len(), 11);
        assert_eq!(ledger.live(), vec![11]);
    }

    #[test]
    fn test_cancelled_expiry_is_stale() {
        let (mut timer, _, _tx) = timer_at("/location/park1/set/zoo2");
        timer.start();
        let first = timer.generation();
        timer.notify_activity();
        assert_eq!(timer.fire(first).unwrap(), ResetDecision::Stale);
        assert!(timer.is_armed());
    }

    #[test]
    fn test_no_rearm_after_idle_firing() {
        let (mut timer, scheduler, _tx) = timer_at("/about");
        timer.start();
        let generation = timer.generation();
        assert!(matches!(timer.fire(generation).unwrap(), ResetDecision::Idle { .. }));
        assert!(!timer.is_armed());
        assert_eq!(scheduler.ledger.borrow().scheduled.len(), 1);

        // A duplicate delivery of the same expiry does nothing
        assert_eq!(timer.fire(generation).unwrap(), ResetDecision::Stale);

        timer.notify_activity();
        assert!(timer.is_armed());
    }

    #[test]
    fn test_start_twice_keeps_single_pending() {
        let (mut timer, scheduler, _tx) = timer_at("/");
        timer.start();
        timer.start();
        assert_eq!(scheduler.ledger.borrow().live(), vec![2]);
    }

    #[test]
    fn test_stop_cancels() {
        let (mut timer, scheduler, _tx) = timer_at("/");
        timer.start();
        timer.stop();
        assert!(!timer.is_armed());
        assert!(scheduler.ledger.borrow().live().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_activity_gaps_below_timeout_never_fire() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (_nav_tx, nav_rx) = watch::channel(NavigationState::parse("/location/park1/set/zoo2"));
        let mut timer =
            SessionResetTimer::new(reset_config(TIMEOUT), TokioScheduler::new(event_tx), nav_rx);
        timer.start();

        for _ in 0..5 {
            tokio::time::sleep(TIMEOUT - Duration::from_secs(1)).await;
            assert!(event_rx.try_recv().is_err());
            timer.notify_activity();
        }

        tokio::time::sleep(TIMEOUT + Duration::from_millis(1)).await;
        let Ok(AppEvent::IdleTimeout { generation }) = event_rx.try_recv() else {
            panic!("expected an idle timeout");
        };
        assert!(matches!(timer.fire(generation).unwrap(), ResetDecision::Redirect { .. }));
        assert!(event_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remaining_counts_down() {
        let (event_tx, _event_rx) = mpsc::unbounded_channel();
        let (_nav_tx, nav_rx) = watch::channel(NavigationState::default());
        let mut timer =
            SessionResetTimer::new(reset_config(TIMEOUT), TokioScheduler::new(event_tx), nav_rx);
        assert_eq!(timer.remaining(), None);
        timer.start();
        tokio::time::advance(Duration::from_secs(20)).await;
        assert_eq!(timer.remaining(), Some(Duration::from_secs(40)));
    }
}

//! Delay scheduling for the watchdog.
//!
//! The tokio implementation delivers expiry as an [`AppEvent::IdleTimeout`]
//! on the shell's event channel, so the decision itself always runs on the
//! event loop.

use crate::app::event::AppEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Schedules a single delayed expiry tagged with a generation number.
pub trait DelayScheduler {
    type Handle;

    fn schedule(&mut self, delay: Duration, generation: u64) -> Self::Handle;
    fn cancel(&mut self, handle: Self::Handle);
}

pub struct TokioScheduler {
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl TokioScheduler {
    pub fn new(event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { event_tx }
    }
}

impl DelayScheduler for TokioScheduler {
    type Handle = JoinHandle<()>;

    fn schedule(&mut self, delay: Duration, generation: u64) -> JoinHandle<()> {
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(AppEvent::IdleTimeout { generation });
        })
    }

    fn cancel(&mut self, handle: JoinHandle<()>) {
        handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_delivers_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx);
        let _handle = scheduler.schedule(Duration::from_secs(30), 7);

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(2)).await;
        match rx.try_recv() {
            Ok(AppEvent::IdleTimeout { generation }) => assert_eq!(generation, 7),
            other => panic!("expected idle timeout, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_never_delivers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx);
        let handle = scheduler.schedule(Duration::from_secs(5), 1);
        scheduler.cancel(handle);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }
}

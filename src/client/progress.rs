//! Synthetic upload progress.
//!
//! The percentage is driven by a timer, not by transfer telemetry. It climbs
//! in fixed steps while the request is outstanding and stops at a ceiling.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A periodic task advancing a shared percentage. Aborted when dropped.
#[derive(Debug)]
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// Start ticking `progress` by `step` every `interval`, up to `ceiling`.
    pub fn start(
        progress: Arc<watch::Sender<u8>>,
        interval: Duration,
        step: u8,
        ceiling: u8,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            // The first tick completes immediately.
            timer.tick().await;

            loop {
                timer.tick().await;
                let mut reached = false;
                progress.send_modify(|p| {
                    *p = p.saturating_add(step).min(ceiling);
                    reached = *p >= ceiling;
                });
                if reached || step == 0 {
                    break;
                }
            }
        });

        Self { handle }
    }

    /// Whether the task is still running.
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop ticking. No further increments happen after this returns.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_climbs_to_ceiling_and_finishes() {
        let (tx, rx) = watch::channel(0u8);
        let ticker = ProgressTicker::start(Arc::new(tx), Duration::from_millis(2), 10, 90);

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(*rx.borrow(), 90);
        assert!(!ticker.is_running());
    }

    #[tokio::test]
    async fn test_stop_halts_increments() {
        let (tx, rx) = watch::channel(0u8);
        let ticker = ProgressTicker::start(Arc::new(tx), Duration::from_millis(50), 10, 90);

        ticker.stop();
        let frozen = *rx.borrow();
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(*rx.borrow(), frozen);
    }
}

//! Fixed-cadence refill timer.
//!
//! [`RefillScheduler::start`] spawns a tokio task that adds one token to the
//! shared bucket every period until the returned [`RefillHandle`] is stopped
//! or dropped. The timer is wall-clock driven and runs regardless of traffic.

use crate::api::metrics;
use std::time::Duration;
use tokengate_core::BucketStore;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Periodically calls [`BucketStore::refill`].
pub struct RefillScheduler {
    store: BucketStore,
    period: Duration,
}

impl RefillScheduler {
    pub fn new(store: BucketStore, period: Duration) -> Self {
        Self { store, period }
    }

    /// Spawns the timer task. The first refill happens one full period from now.
    pub fn start(self) -> RefillHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let Self { store, period } = self;

        tracing::info!(
            period_ms = period.as_millis() as u64,
            capacity = store.capacity(),
            "Refill scheduler started"
        );

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            // A stalled runtime must not turn into a burst of refills
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let (_, added) = store.refill();
                        if added {
                            metrics::record_refill();
                        }
                    }
                    // Fires on an explicit stop and when the handle is dropped
                    _ = &mut shutdown_rx => break,
                }
            }
            tracing::info!("Refill scheduler stopped");
        });

        RefillHandle { shutdown_tx, task }
    }
}

/// Owner of a running refill timer.
///
/// Dropping the handle also stops the timer.
pub struct RefillHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl RefillHandle {
    /// Signals the timer to stop and waits for its task to exit.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            tracing::error!("Refill scheduler task failed: {}", e);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_secs(2);

    async fn sleep_ms(ms: u64) {
        time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_token_per_tick() {
        let store = BucketStore::new(10);
        let handle = RefillScheduler::new(store.clone(), PERIOD).start();

        sleep_ms(1_999).await;
        assert_eq!(store.len(), 0);

        sleep_ms(2).await; // t = 2.001s
        assert_eq!(store.len(), 1);

        sleep_ms(2_000).await; // t = 4.001s
        assert_eq!(store.len(), 2);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_exceeds_capacity() {
        let store = BucketStore::new(10);
        let handle = RefillScheduler::new(store.clone(), PERIOD).start();

        sleep_ms(60_001).await; // 30 ticks
        assert_eq!(store.len(), 10);
        assert_eq!(store.snapshot().tokens.len(), 10);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_refills_after_drain() {
        let store = BucketStore::new(10);
        let handle = RefillScheduler::new(store.clone(), PERIOD).start();

        sleep_ms(20_001).await;
        while store.try_consume().is_some() {}
        assert!(store.is_empty());

        sleep_ms(2_000).await;
        assert_eq!(store.len(), 1);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_refills() {
        let store = BucketStore::new(10);
        let handle = RefillScheduler::new(store.clone(), PERIOD).start();

        sleep_ms(2_001).await;
        assert_eq!(store.len(), 1);
        assert!(handle.is_running());

        handle.stop().await;
        sleep_ms(10_000).await;
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_halts_refills() {
        let store = BucketStore::new(10);
        let handle = RefillScheduler::new(store.clone(), PERIOD).start();
        drop(handle);

        sleep_ms(10_000).await;
        assert_eq!(store.len(), 0);
    }
}

//! Periodic health regeneration.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::infrastructure::ports::PlayerRepo;

/// Background worker that heals every wounded player on a fixed cadence.
///
/// Each pass is one set-based update: wounded players gain `percent` of
/// their max hp (at least 1 point), capped at max. Players at full
/// health are left untouched. A failed pass is logged and the next tick
/// tries again.
pub struct HealthRegeneration {
    players: Arc<dyn PlayerRepo>,
    percent: i64,
    interval: Duration,
}

impl HealthRegeneration {
    pub fn new(players: Arc<dyn PlayerRepo>, percent: i64, interval: Duration) -> Self {
        Self {
            players,
            percent,
            interval,
        }
    }

    /// Runs until the shutdown token fires. The first pass lands one full
    /// interval after start.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        // An interval's first tick completes immediately; consume it.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("health regeneration worker stopping");
                    return;
                }
                _ = ticker.tick() => {}
            }

            match self.players.regenerate_health(self.percent).await {
                Ok(0) => {}
                Ok(healed) => {
                    tracing::debug!(players = healed, "regenerated health");
                }
                Err(e) => {
                    tracing::error!(error = %e, "health regeneration pass failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockPlayerRepo, RepoError};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Instant;

    async fn wait_for_calls(calls: &AtomicU64, at_least: u64) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while calls.load(Ordering::SeqCst) < at_least {
            assert!(
                Instant::now() < deadline,
                "regeneration passes did not run in time"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test]
    async fn heals_periodically_until_shutdown() {
        let calls = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&calls);
        let mut players = MockPlayerRepo::new();
        players.expect_regenerate_health().returning(move |percent| {
            assert_eq!(percent, 5);
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(2)
        });

        let worker =
            HealthRegeneration::new(Arc::new(players), 5, Duration::from_millis(20));
        let shutdown = CancellationToken::new();
        let stop = shutdown.clone();
        let handle = tokio::spawn(worker.run(stop));

        wait_for_calls(&calls, 3).await;

        shutdown.cancel();
        handle.await.expect("worker shuts down");
    }

    #[tokio::test]
    async fn a_failed_pass_does_not_stop_the_worker() {
        let calls = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&calls);
        let mut players = MockPlayerRepo::new();
        players.expect_regenerate_health().returning(move |_| {
            let pass = counter.fetch_add(1, Ordering::SeqCst);
            if pass == 0 {
                Err(RepoError::database("player_regen", "disk I/O error"))
            } else {
                Ok(1)
            }
        });

        let worker =
            HealthRegeneration::new(Arc::new(players), 5, Duration::from_millis(20));
        let shutdown = CancellationToken::new();
        let stop = shutdown.clone();
        let handle = tokio::spawn(worker.run(stop));

        wait_for_calls(&calls, 2).await;

        shutdown.cancel();
        handle.await.expect("worker shuts down");
    }
}

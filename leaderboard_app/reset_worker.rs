use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time};
use tokio_util::sync::CancellationToken;

use crate::service::LeaderboardService;

/// Periodically wipes the leaderboard, e.g. for daily competitions.
pub struct ResetScheduler {
    service: Arc<LeaderboardService>,
    interval: Duration,
}

impl ResetScheduler {
    pub fn new(service: Arc<LeaderboardService>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Run the reset loop inside a tokio task until `cancel` fires.
    /// The first reset happens one full interval after start.
    pub fn run(self: Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + self.interval, self.interval);
            interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
            tracing::info!(
                interval_secs = self.interval.as_secs(),
                "Reset scheduler started."
            );

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {}
                }

                match self.service.reset(&cancel).await {
                    Ok(()) => tracing::info!("Scheduled leaderboard reset completed."),
                    Err(e) => tracing::error!("Scheduled leaderboard reset failed: {}", e),
                }
            }

            tracing::info!("Reset scheduler stopped.");
        })
    }
}

#[cfg(test)]
mod tests {
    use leaderboard_ranking::test_utils::board_factory;

    use super::*;
    use crate::{
        app::AppBus,
        config::Config,
        test_utils::tests::{MockPlayerScoreRepository, MockUnitOfWorkProvider},
    };

    #[tokio::test(start_paused = true)]
    async fn test_resets_after_each_interval_until_cancelled() {
        let scores = MockPlayerScoreRepository::new();
        for record in board_factory(&[("A", 1), ("B", 2)]) {
            scores.insert(record);
        }
        let provider = Arc::new(MockUnitOfWorkProvider::with_scores(scores));
        let bus = Arc::new(AppBus::new(Arc::new(Config::default()), provider.clone()));
        let service = Arc::new(LeaderboardService::new(bus));
        let scheduler = Arc::new(ResetScheduler::new(service, Duration::from_secs(3600)));
        let cancel = CancellationToken::new();

        let handle = scheduler.run(cancel.clone());

        time::sleep(Duration::from_secs(1800)).await;
        assert_eq!(provider.scores().len(), 2);

        time::sleep(Duration::from_secs(1801)).await;
        assert_eq!(provider.scores().len(), 0);
        assert_eq!(provider.commits(), 1);

        cancel.cancel();
        handle.await.unwrap();
    }
}

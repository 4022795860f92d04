use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use leaderboard_types::{
    Result,
    common::PlayerId,
    leaderboard::LeaderboardSnapshot,
};

use crate::{
    app::AppBus,
    command_handlers::{ResetLeaderboardCommandHandler, SubmitScoreCommandHandler},
    cqrs::{
        commands::{ResetLeaderboard, SubmitScore},
        queries::{CheckReadiness, GetLeaderboard, Readiness},
    },
    queries_handlers::{CheckReadinessHandler, GetLeaderboardHandler},
};

/// Entry point for leaderboard use cases, shared by every request.
///
/// A submit is two independent phases: the write commits in its own unit of
/// work, then a fresh query builds the snapshot. Writes from other players
/// that land in between are visible in the returned ranking.
pub struct LeaderboardService {
    app_bus: Arc<AppBus>,
}

impl LeaderboardService {
    pub fn new(app_bus: Arc<AppBus>) -> Self {
        Self { app_bus }
    }

    pub fn app_bus(&self) -> &Arc<AppBus> {
        &self.app_bus
    }

    pub async fn submit(
        &self,
        player_id: &str,
        score: i64,
        cancel: &CancellationToken,
    ) -> Result<LeaderboardSnapshot> {
        let command = SubmitScore::new(player_id, score)?;
        let player_id = command.player_id.clone();

        self.app_bus
            .execute(command, SubmitScoreCommandHandler::new(), cancel)
            .await?;

        self.snapshot(player_id, cancel).await
    }

    pub async fn get_leaderboard(
        &self,
        player_id: &str,
        cancel: &CancellationToken,
    ) -> Result<LeaderboardSnapshot> {
        let player_id = PlayerId::parse(player_id)?;
        self.snapshot(player_id, cancel).await
    }

    /// Deletes every record. Irreversible.
    pub async fn reset(&self, cancel: &CancellationToken) -> Result<()> {
        self.app_bus
            .execute(ResetLeaderboard, ResetLeaderboardCommandHandler::new(), cancel)
            .await
    }

    pub async fn readiness(&self, cancel: &CancellationToken) -> Result<Readiness> {
        self.app_bus
            .query(CheckReadiness, CheckReadinessHandler::new(), cancel)
            .await
    }

    async fn snapshot(
        &self,
        player_id: PlayerId,
        cancel: &CancellationToken,
    ) -> Result<LeaderboardSnapshot> {
        self.app_bus
            .query(GetLeaderboard { player_id }, GetLeaderboardHandler::new(), cancel)
            .await
    }
}

#[cfg(test)]
mod tests {
    use leaderboard_types::{
        common::UpdateMode,
        errors::{ApplicationError, ValidationError},
        leaderboard::RankAndScore,
    };

    use super::*;
    use crate::{config::Config, test_utils::tests::MockUnitOfWorkProvider};

    fn service_with(config: Config) -> (LeaderboardService, Arc<MockUnitOfWorkProvider>) {
        let provider = Arc::new(MockUnitOfWorkProvider::new());
        let bus = AppBus::new(Arc::new(config), provider.clone());
        (LeaderboardService::new(Arc::new(bus)), provider)
    }

    #[tokio::test]
    async fn test_submit_returns_fresh_snapshot() -> Result<()> {
        let (service, _) = service_with(Config {
            top_limit: 3,
            nearby_range: 1,
            ..Default::default()
        });
        let cancel = CancellationToken::new();

        for (player_id, score) in [("A", 100), ("B", 90), ("C", 90)] {
            service.submit(player_id, score, &cancel).await?;
        }
        let snapshot = service.submit("D", 80, &cancel).await?;

        assert_eq!(snapshot.player_id, "D");
        assert_eq!(snapshot.standing, Some(RankAndScore { rank: 3, score: 80 }));
        assert_eq!(snapshot.top.len(), 3);
        assert!(snapshot.nearby.iter().all(|e| e.player_id != "D"));
        assert_eq!(
            snapshot
                .nearby
                .iter()
                .map(|e| e.player_id.as_str())
                .collect::<Vec<_>>(),
            vec!["B", "C"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_trims_player_id() -> Result<()> {
        let (service, provider) = service_with(Config::default());

        let snapshot = service
            .submit("  alice  ", 42, &CancellationToken::new())
            .await?;

        assert_eq!(snapshot.player_id, "alice");
        assert_eq!(provider.scores().record("alice").map(|r| r.score), Some(42));
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_then_accumulate_modes() -> Result<()> {
        let cancel = CancellationToken::new();

        let (replace, _) = service_with(Config::default());
        replace.submit("p", 50, &cancel).await?;
        let snapshot = replace.submit("p", 20, &cancel).await?;
        assert_eq!(snapshot.player_score(), 20);

        let (accumulate, _) = service_with(Config {
            update_mode: UpdateMode::Accumulate,
            ..Default::default()
        });
        accumulate.submit("p", 50, &cancel).await?;
        let snapshot = accumulate.submit("p", 20, &cancel).await?;
        assert_eq!(snapshot.player_score(), 70);
        Ok(())
    }

    #[tokio::test]
    async fn test_validation_errors_never_reach_store() {
        let (service, provider) = service_with(Config::default());
        let cancel = CancellationToken::new();

        let err = service.submit("alice", -1, &cancel).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Validation(ValidationError::NegativeScore)
        ));

        let err = service.submit("   ", 10, &cancel).await.unwrap_err();
        assert_eq!(err.rejected_field(), Some("playerId"));

        let too_long = "x".repeat(129);
        let err = service.get_leaderboard(&too_long, &cancel).await.unwrap_err();
        assert_eq!(err.rejected_field(), Some("playerId"));

        assert_eq!(provider.commits(), 0);
        assert_eq!(provider.rollbacks(), 0);
    }

    #[tokio::test]
    async fn test_reset_then_every_lookup_is_empty() -> Result<()> {
        let (service, _) = service_with(Config::default());
        let cancel = CancellationToken::new();

        service.submit("A", 10, &cancel).await?;
        service.submit("B", 20, &cancel).await?;
        service.reset(&cancel).await?;

        for player_id in ["A", "B", "ghost"] {
            let snapshot = service.get_leaderboard(player_id, &cancel).await?;
            assert_eq!(snapshot.standing, None);
            assert!(snapshot.top.is_empty());
            assert!(snapshot.nearby.is_empty());
        }
        assert_eq!(service.readiness(&cancel).await?.player_count, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_submissions_for_same_player_last_write_wins() -> Result<()> {
        let (service, provider) = service_with(Config::default());
        let service = Arc::new(service);
        let cancel = CancellationToken::new();

        let first = {
            let service = service.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move { service.submit("race", 100, &cancel).await })
        };
        let second = {
            let service = service.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move { service.submit("race", 200, &cancel).await })
        };
        first.await.expect("task panicked")?;
        second.await.expect("task panicked")?;

        let stored = provider.scores().record("race").map(|r| r.score);
        assert!(matches!(stored, Some(100) | Some(200)));
        Ok(())
    }
}

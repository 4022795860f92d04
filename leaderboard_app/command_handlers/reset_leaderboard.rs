use std::sync::Arc;

use leaderboard_types::Result;

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::ResetLeaderboard},
    uow::UnitOfWork,
};

pub struct ResetLeaderboardCommandHandler {}

impl Default for ResetLeaderboardCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ResetLeaderboardCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<ResetLeaderboard> for ResetLeaderboardCommandHandler {
    async fn handle(
        &self,
        _command: ResetLeaderboard,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<()> {
        uow.scores().delete_all().await?;
        tracing::info!("Leaderboard reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use leaderboard_ranking::test_utils::board_factory;

    use super::*;
    use crate::test_utils::tests::{MockPlayerScoreRepository, MockUnitOfWork};

    #[tokio::test]
    async fn test_reset_removes_all_rows() -> Result<()> {
        let scores = MockPlayerScoreRepository::new();
        for record in board_factory(&[("p1", 1), ("p2", 2), ("p3", 3)]) {
            scores.insert(record);
        }
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::with_scores(scores));
        assert_eq!(mock_uow.scores().count().await?, 3);

        ResetLeaderboardCommandHandler::new()
            .handle(ResetLeaderboard, &mock_uow, &Arc::new(Config::default()))
            .await?;

        assert_eq!(mock_uow.scores().count().await?, 0);
        assert_eq!(mock_uow.scores().get("p1").await?, None);
        Ok(())
    }
}

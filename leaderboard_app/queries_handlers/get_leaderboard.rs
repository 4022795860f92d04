use async_trait::async_trait;
use std::sync::Arc;

use leaderboard_types::{errors::ApplicationError, leaderboard::LeaderboardSnapshot};

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetLeaderboard},
    ranking::RankingEngine,
    uow::UnitOfWork,
};

pub struct GetLeaderboardHandler {}

impl GetLeaderboardHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetLeaderboard> for GetLeaderboardHandler {
    async fn handle(
        &self,
        query: GetLeaderboard,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<<GetLeaderboard as Query>::Output, ApplicationError> {
        let engine = RankingEngine::new(uow.scores());
        let player_id = query.player_id.into_inner();

        // Clamp again: a misconfigured limit degrades to an empty list.
        let top_limit = i64::from(config.top_limit.max(0));
        let nearby_range = i64::from(config.nearby_range.max(0));

        let standing = engine.rank_of(&player_id).await?;
        let top = engine.top(top_limit).await?;

        let nearby = match standing {
            Some(own) if nearby_range > 0 => engine
                .nearby(own.rank, nearby_range)
                .await?
                .into_iter()
                .filter(|entry| entry.player_id != player_id)
                .collect(),
            _ => Vec::new(),
        };

        Ok(LeaderboardSnapshot {
            player_id,
            standing,
            top,
            nearby,
        })
    }
}

use std::sync::Arc;

use leaderboard_types::{
    errors::ApplicationError,
    leaderboard::{RankAndScore, RankedEntry},
};

use crate::repository::PlayerScoreRepository;

/// Read-only ranking questions over the current score set.
///
/// Arguments are clamped here so stores only ever see `n >= 0`, `radius >= 0`
/// and a ranked `target_rank`.
pub struct RankingEngine<'a> {
    scores: Arc<dyn PlayerScoreRepository + 'a>,
}

impl<'a> RankingEngine<'a> {
    pub fn new(scores: Arc<dyn PlayerScoreRepository + 'a>) -> Self {
        Self { scores }
    }

    /// `None` means the player has never submitted.
    pub async fn rank_of(&self, player_id: &str) -> Result<Option<RankAndScore>, ApplicationError> {
        self.scores.rank_and_score(player_id).await
    }

    pub async fn top(&self, n: i64) -> Result<Vec<RankedEntry>, ApplicationError> {
        let n = n.max(0);
        if n == 0 {
            return Ok(Vec::new());
        }
        self.scores.top(n).await
    }

    pub async fn nearby(
        &self,
        target_rank: i64,
        radius: i64,
    ) -> Result<Vec<RankedEntry>, ApplicationError> {
        if target_rank <= 0 {
            return Ok(Vec::new());
        }
        self.scores.windowed(target_rank, radius.max(0)).await
    }
}

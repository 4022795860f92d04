use leaderboard_types::{
    common::PlayerRecord,
    errors::ApplicationError,
    leaderboard::{RankAndScore, RankedEntry},
};

/// Durable storage of one current score per player, queried through a dense ranking.
///
/// Ranks are dense over `score desc`; every list is ordered by rank, then by
/// ascending player id. Ranks are computed from the current score set on each
/// call, never cached.
#[async_trait::async_trait]
pub trait PlayerScoreRepository: Send + Sync {
    /// Returns the record of a player, if any.
    async fn get(&self, player_id: &str) -> Result<Option<PlayerRecord>, ApplicationError>;

    /// Inserts or updates a player's score, refreshing `updated_at`.
    /// With `accumulate` the score is added to the stored one (0 if absent),
    /// otherwise it replaces it. Score and timestamp are written together.
    async fn upsert(
        &self,
        player_id: &str,
        score: i64,
        accumulate: bool,
    ) -> Result<(), ApplicationError>;

    /// Deletes every record.
    async fn delete_all(&self) -> Result<(), ApplicationError>;

    /// Returns the dense rank and score of a player, `None` if the player has no record.
    async fn rank_and_score(
        &self,
        player_id: &str,
    ) -> Result<Option<RankAndScore>, ApplicationError>;

    /// Returns the first `n` entries of the board.
    async fn top(&self, n: i64) -> Result<Vec<RankedEntry>, ApplicationError>;

    /// Returns every entry ranked within `[max(1, center_rank - radius), center_rank + radius]`.
    async fn windowed(
        &self,
        center_rank: i64,
        radius: i64,
    ) -> Result<Vec<RankedEntry>, ApplicationError>;

    /// Number of players on the board.
    async fn count(&self) -> Result<i64, ApplicationError>;
}

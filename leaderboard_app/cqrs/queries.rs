use leaderboard_types::{common::PlayerId, leaderboard::LeaderboardSnapshot};

use crate::cqrs::Query;

/// Builds the leaderboard snapshot for a player: own standing, top list and nearby window.
#[derive(Debug, Clone)]
pub struct GetLeaderboard {
    pub player_id: PlayerId,
}

impl Query for GetLeaderboard {
    type Output = LeaderboardSnapshot;
}

/// Checks that the rank store answers queries.
#[derive(Debug, Clone, Default)]
pub struct CheckReadiness;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    pub player_count: i64,
}

impl Query for CheckReadiness {
    type Output = Readiness;
}

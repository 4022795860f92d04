use serde::Serialize;

/// A player's dense rank together with the score it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankAndScore {
    pub rank: i64,
    pub score: i64,
}

/// One row of a ranking query. Derived on every read, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub player_id: String,
    pub score: i64,
    pub rank: i64,
}

impl RankedEntry {
    pub fn new(player_id: impl Into<String>, score: i64, rank: i64) -> Self {
        Self {
            player_id: player_id.into(),
            score,
            rank,
        }
    }
}

/// What a player sees after a submit or a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardSnapshot {
    pub player_id: String,
    /// `None` when the player has never submitted a score.
    pub standing: Option<RankAndScore>,
    pub top: Vec<RankedEntry>,
    pub nearby: Vec<RankedEntry>,
}

impl LeaderboardSnapshot {
    /// Rank reported for players without a record.
    pub const NOT_RANKED: i64 = -1;

    pub fn player_rank(&self) -> i64 {
        self.standing.map_or(Self::NOT_RANKED, |s| s.rank)
    }

    pub fn player_score(&self) -> i64 {
        self.standing.map_or(Self::NOT_RANKED, |s| s.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_sentinel_for_unranked_player() {
        let snapshot = LeaderboardSnapshot {
            player_id: "ghost".to_string(),
            standing: None,
            top: vec![],
            nearby: vec![],
        };
        assert_eq!(snapshot.player_rank(), -1);
        assert_eq!(snapshot.player_score(), -1);
    }

    #[test]
    fn test_ranked_entry_serializes_camel_case() {
        let json = serde_json::to_value(RankedEntry::new("A", 100, 1)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "playerId": "A", "score": 100, "rank": 1 })
        );
    }
}

use thiserror::Error;

/// Errors for score-update rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    #[error("Accumulated score for player '{player_id}' exceeds the maximum score")]
    ScoreOverflow { player_id: String },
}

impl LeaderboardError {
    pub fn field(&self) -> &'static str {
        match self {
            LeaderboardError::ScoreOverflow { .. } => "score",
        }
    }
}

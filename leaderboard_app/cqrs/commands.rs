use leaderboard_types::{common::PlayerId, errors::ValidationError};

use crate::cqrs::Command;

/// Submits a score for a player, combined with the stored one per the configured update mode.
#[derive(Debug, Clone)]
pub struct SubmitScore {
    pub player_id: PlayerId,
    pub score: i64,
}

impl SubmitScore {
    pub fn new(player_id: &str, score: i64) -> Result<Self, ValidationError> {
        let player_id = PlayerId::parse(player_id)?;
        if score < 0 {
            return Err(ValidationError::NegativeScore);
        }
        Ok(Self { player_id, score })
    }
}

impl Command for SubmitScore {}

/// Deletes every player record. Administrative use only.
#[derive(Debug, Clone, Default)]
pub struct ResetLeaderboard;

impl Command for ResetLeaderboard {}

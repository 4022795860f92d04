use chrono::{DateTime, Utc};

use leaderboard_types::common::PlayerRecord;

#[derive(Default, Clone)]
pub struct PlayerRecordFactoryOptions<'a> {
    pub player_id: Option<&'a str>,
    pub score: Option<i64>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub fn player_record_factory(options: PlayerRecordFactoryOptions) -> PlayerRecord {
    PlayerRecord {
        player_id: options.player_id.unwrap_or("player").to_string(),
        score: options.score.unwrap_or(0),
        updated_at: options.updated_at.unwrap_or_else(Utc::now),
    }
}

/// Builds one record per `(player_id, score)` pair.
pub fn board_factory(scores: &[(&str, i64)]) -> Vec<PlayerRecord> {
    scores
        .iter()
        .map(|(player_id, score)| {
            player_record_factory(PlayerRecordFactoryOptions {
                player_id: Some(*player_id),
                score: Some(*score),
                ..Default::default()
            })
        })
        .collect()
}

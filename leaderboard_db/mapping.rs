use leaderboard_ranking::DenseRanker;
use leaderboard_types::{
    common::PlayerRecord,
    leaderboard::{RankAndScore, RankedEntry},
};

use crate::models::{BoardRow, PlayerScore, Standing};

impl From<PlayerScore> for PlayerRecord {
    fn from(row: PlayerScore) -> Self {
        PlayerRecord {
            player_id: row.player_id,
            score: row.score,
            updated_at: row.updated_at,
        }
    }
}

impl From<Standing> for RankAndScore {
    fn from(row: Standing) -> Self {
        RankAndScore {
            rank: row.rank,
            score: row.score,
        }
    }
}

/// Numbers rows already sorted in board order, the first row holding `first_rank`.
pub(crate) fn rank_rows(rows: Vec<BoardRow>, first_rank: i64) -> Vec<RankedEntry> {
    let mut ranker = DenseRanker::starting_at(first_rank);
    rows.into_iter()
        .map(|row| {
            let rank = ranker.next_rank(row.score);
            RankedEntry {
                player_id: row.player_id,
                score: row.score,
                rank,
            }
        })
        .collect()
}

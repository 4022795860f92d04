use std::cmp::Ordering;

use leaderboard_types::{
    common::PlayerRecord,
    leaderboard::{RankAndScore, RankedEntry},
};

/// Presentation order of the board: higher scores first, ties broken by
/// ascending player id (byte order of UTF-8, i.e. code-point order).
pub fn rank_order(a: (&str, i64), b: (&str, i64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Inclusive rank range `[target - radius, target + radius]`, clamped at rank 1.
/// Returns `None` for players without a rank (`target_rank <= 0`).
pub fn window_bounds(target_rank: i64, radius: i64) -> Option<(i64, i64)> {
    if target_rank <= 0 {
        return None;
    }
    let radius = radius.max(0);
    let min_rank = target_rank.saturating_sub(radius).max(1);
    let max_rank = target_rank.saturating_add(radius);
    Some((min_rank, max_rank))
}

/// Assigns dense ranks to a stream of scores sorted in non-increasing order.
///
/// Equal scores share a rank and the next lower score gets the following
/// integer, so there are never gaps. Stores that already read rows in
/// [`rank_order`] use this to number them without materializing the board.
#[derive(Debug, Clone)]
pub struct DenseRanker {
    rank: i64,
    last_score: Option<i64>,
}

impl Default for DenseRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl DenseRanker {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Numbers a stream whose first score holds rank `first_rank`.
    pub fn starting_at(first_rank: i64) -> Self {
        Self {
            rank: first_rank - 1,
            last_score: None,
        }
    }

    pub fn next_rank(&mut self, score: i64) -> i64 {
        debug_assert!(
            self.last_score.is_none_or(|last| score <= last),
            "scores must arrive in non-increasing order"
        );
        if self.last_score != Some(score) {
            self.rank += 1;
            self.last_score = Some(score);
        }
        self.rank
    }
}

/// A fully dense-ranked board, built fresh from the current score set.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    entries: Vec<RankedEntry>,
}

impl Ranking {
    pub fn from_scores<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut rows: Vec<(String, i64)> = scores
            .into_iter()
            .map(|(player_id, score)| (player_id.into(), score))
            .collect();
        rows.sort_by(|a, b| rank_order((&a.0, a.1), (&b.0, b.1)));

        let mut ranker = DenseRanker::new();
        let entries = rows
            .into_iter()
            .map(|(player_id, score)| {
                let rank = ranker.next_rank(score);
                RankedEntry {
                    player_id,
                    score,
                    rank,
                }
            })
            .collect();

        Self { entries }
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a PlayerRecord>,
    {
        Self::from_scores(
            records
                .into_iter()
                .map(|r| (r.player_id.as_str(), r.score)),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn rank_of(&self, player_id: &str) -> Option<RankAndScore> {
        self.entries
            .iter()
            .find(|e| e.player_id == player_id)
            .map(|e| RankAndScore {
                rank: e.rank,
                score: e.score,
            })
    }

    /// The first `min(n, len)` entries. Negative `n` yields nothing.
    pub fn top(&self, n: i64) -> Vec<RankedEntry> {
        let n = usize::try_from(n.max(0)).unwrap_or(usize::MAX);
        self.entries.iter().take(n).cloned().collect()
    }

    /// Every entry whose rank lies inside [`window_bounds`], ties included.
    pub fn nearby(&self, target_rank: i64, radius: i64) -> Vec<RankedEntry> {
        let Some((min_rank, max_rank)) = window_bounds(target_rank, radius) else {
            return Vec::new();
        };

        self.entries
            .iter()
            .skip_while(|e| e.rank < min_rank)
            .take_while(|e| e.rank <= max_rank)
            .cloned()
            .collect()
    }
}

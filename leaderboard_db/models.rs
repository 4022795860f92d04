use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow, Clone)]
pub struct PlayerScore {
    pub player_id: String,
    pub score: i64,
    pub updated_at: DateTime<Utc>,
}

/// A board row in rank order, before dense numbering.
#[derive(Debug, FromRow, Clone)]
pub struct BoardRow {
    pub player_id: String,
    pub score: i64,
}

#[derive(Debug, FromRow, Clone, Copy)]
pub struct Standing {
    pub rank: i64,
    pub score: i64,
}

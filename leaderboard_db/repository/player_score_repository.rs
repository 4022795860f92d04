use chrono::Utc;
use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use leaderboard_app::repository::PlayerScoreRepository;
use leaderboard_ranking::window_bounds;
use leaderboard_types::{
    Result,
    common::PlayerRecord,
    errors::{ApplicationError, DbError, LeaderboardError},
    leaderboard::{RankAndScore, RankedEntry},
};

use crate::{
    mapping::rank_rows,
    models::{self as db_models},
};

/// SQLSTATE raised by Postgres when a BIGINT addition leaves the i64 range.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

/// Implements PlayerScoreRepository and operates on transactions.
#[derive(Clone)]
pub struct PostgresPlayerScoreRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresPlayerScoreRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> PlayerScoreRepository for PostgresPlayerScoreRepository<'a> {
    async fn get(&self, player_id: &str) -> Result<Option<PlayerRecord>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let row = sqlx::query_as::<_, db_models::PlayerScore>(
            "SELECT player_id, score, updated_at FROM player_scores WHERE player_id = $1",
        )
        .bind(player_id)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(row.map(Into::into))
    }

    async fn upsert(
        &self,
        player_id: &str,
        score: i64,
        accumulate: bool,
    ) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        // One statement: concurrent submissions for the same player serialize on the row lock.
        sqlx::query(
            r#"
              INSERT INTO player_scores (player_id, score, updated_at)
              VALUES ($1, $2, $4)
              ON CONFLICT (player_id) DO UPDATE
              SET
                  score = CASE WHEN $3 THEN player_scores.score + EXCLUDED.score
                               ELSE EXCLUDED.score END,
                  updated_at = EXCLUDED.updated_at
              "#,
        )
        .bind(player_id)
        .bind(score)
        .bind(accumulate)
        .bind(Utc::now())
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| {
            let overflow = matches!(
                &e,
                sqlx::Error::Database(db_err)
                    if db_err.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE)
            );
            if overflow {
                ApplicationError::Leaderboard(LeaderboardError::ScoreOverflow {
                    player_id: player_id.to_string(),
                })
            } else {
                ApplicationError::Db(DbError::Database(e))
            }
        })?;

        Ok(())
    }

    async fn delete_all(&self) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let deleted = sqlx::query("DELETE FROM player_scores")
            .execute(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        tracing::debug!("Deleted {} player scores", deleted.rows_affected());
        Ok(())
    }

    async fn rank_and_score(
        &self,
        player_id: &str,
    ) -> Result<Option<RankAndScore>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let standing = sqlx::query_as::<_, db_models::Standing>(
            r#"
              SELECT
                  p.score,
                  (SELECT COUNT(DISTINCT h.score) FROM player_scores h WHERE h.score > p.score) + 1
                      AS rank
              FROM player_scores p
              WHERE p.player_id = $1
              "#,
        )
        .bind(player_id)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(standing.map(Into::into))
    }

    async fn top(&self, n: i64) -> Result<Vec<RankedEntry>, ApplicationError> {
        if n <= 0 {
            return Ok(Vec::new());
        }

        let mut tx_guard = self.tx.lock().await;
        let rows = sqlx::query_as::<_, db_models::BoardRow>(
            r#"
              SELECT player_id, score
              FROM player_scores
              ORDER BY score DESC, player_id COLLATE "C" ASC
              LIMIT $1
              "#,
        )
        .bind(n)
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(rank_rows(rows, 1))
    }

    async fn windowed(
        &self,
        center_rank: i64,
        radius: i64,
    ) -> Result<Vec<RankedEntry>, ApplicationError> {
        let Some((min_rank, max_rank)) = window_bounds(center_rank, radius) else {
            return Ok(Vec::new());
        };
        let offset = min_rank - 1;
        let limit = max_rank.saturating_sub(min_rank).saturating_add(1);

        let mut tx_guard = self.tx.lock().await;
        // Rank r holds the r-th distinct score, so the window is a score interval.
        let rows = sqlx::query_as::<_, db_models::BoardRow>(
            r#"
              WITH window_scores AS (
                  SELECT DISTINCT score
                  FROM player_scores
                  ORDER BY score DESC
                  OFFSET $1
                  LIMIT $2
              ),
              bounds AS (
                  SELECT MIN(score) AS low, MAX(score) AS high FROM window_scores
              )
              SELECT p.player_id, p.score
              FROM player_scores p, bounds b
              WHERE p.score BETWEEN b.low AND b.high
              ORDER BY p.score DESC, p.player_id COLLATE "C" ASC
              "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(rank_rows(rows, min_rank))
    }

    async fn count(&self) -> Result<i64, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM player_scores")
            .fetch_one(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(count)
    }
}

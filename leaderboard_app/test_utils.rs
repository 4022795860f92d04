#[cfg(any(test, feature = "test-utils"))]
#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use std::{
        collections::HashMap,
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use leaderboard_ranking::{Ranking, apply_update};
    use leaderboard_types::{
        common::{PlayerRecord, UpdateMode},
        errors::{ApplicationError, DbError},
        leaderboard::{RankAndScore, RankedEntry},
    };

    use crate::{
        repository::PlayerScoreRepository,
        uow::{UnitOfWork, UnitOfWorkProvider},
    };

    /// In-memory rank store. Clones share the same records.
    #[derive(Default, Clone)]
    pub struct MockPlayerScoreRepository {
        records: Arc<Mutex<HashMap<String, PlayerRecord>>>,
        unavailable: Arc<AtomicBool>,
        latency: Option<Duration>,
    }

    impl MockPlayerScoreRepository {
        pub fn new() -> Self {
            Default::default()
        }

        /// Delays every write, to exercise cancellation.
        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = Some(latency);
            self
        }

        /// Makes every call fail like a lost connection.
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        pub fn insert(&self, record: PlayerRecord) {
            self.records
                .lock()
                .unwrap()
                .insert(record.player_id.clone(), record);
        }

        pub fn record(&self, player_id: &str) -> Option<PlayerRecord> {
            self.records.lock().unwrap().get(player_id).cloned()
        }

        pub fn len(&self) -> usize {
            self.records.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn check_available(&self) -> Result<(), ApplicationError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ApplicationError::Db(DbError::Transaction(
                    "rank store unavailable".to_string(),
                )));
            }
            Ok(())
        }

        fn ranking(&self) -> Ranking {
            Ranking::from_records(self.records.lock().unwrap().values())
        }
    }

    #[async_trait]
    impl PlayerScoreRepository for MockPlayerScoreRepository {
        async fn get(&self, player_id: &str) -> Result<Option<PlayerRecord>, ApplicationError> {
            self.check_available()?;
            Ok(self.record(player_id))
        }

        async fn upsert(
            &self,
            player_id: &str,
            score: i64,
            accumulate: bool,
        ) -> Result<(), ApplicationError> {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            self.check_available()?;

            let mode = if accumulate {
                UpdateMode::Accumulate
            } else {
                UpdateMode::Replace
            };
            let mut records = self.records.lock().unwrap();
            let previous = records.get(player_id).map(|r| r.score);
            let score = apply_update(mode, player_id, previous, score)?;

            records.insert(
                player_id.to_string(),
                PlayerRecord {
                    player_id: player_id.to_string(),
                    score,
                    updated_at: Utc::now(),
                },
            );
            Ok(())
        }

        async fn delete_all(&self) -> Result<(), ApplicationError> {
            self.check_available()?;
            self.records.lock().unwrap().clear();
            Ok(())
        }

        async fn rank_and_score(
            &self,
            player_id: &str,
        ) -> Result<Option<RankAndScore>, ApplicationError> {
            self.check_available()?;
            Ok(self.ranking().rank_of(player_id))
        }

        async fn top(&self, n: i64) -> Result<Vec<RankedEntry>, ApplicationError> {
            self.check_available()?;
            Ok(self.ranking().top(n))
        }

        async fn windowed(
            &self,
            center_rank: i64,
            radius: i64,
        ) -> Result<Vec<RankedEntry>, ApplicationError> {
            self.check_available()?;
            Ok(self.ranking().nearby(center_rank, radius))
        }

        async fn count(&self) -> Result<i64, ApplicationError> {
            self.check_available()?;
            Ok(self.len() as i64)
        }
    }

    #[derive(Default)]
    pub struct MockUnitOfWork {
        scores: Arc<MockPlayerScoreRepository>,

        // Counters shared with the provider to check commit/rollback calls
        commits: Arc<AtomicUsize>,
        rollbacks: Arc<AtomicUsize>,
    }

    impl MockUnitOfWork {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn with_scores(scores: MockPlayerScoreRepository) -> Self {
            Self {
                scores: Arc::new(scores),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for MockUnitOfWork {
        fn scores(&self) -> Arc<dyn PlayerScoreRepository + 'a> {
            self.scores.clone()
        }

        async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
            self.rollbacks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Hands out units of work over one shared in-memory store.
    #[derive(Default)]
    pub struct MockUnitOfWorkProvider {
        scores: Arc<MockPlayerScoreRepository>,
        commits: Arc<AtomicUsize>,
        rollbacks: Arc<AtomicUsize>,
    }

    impl MockUnitOfWorkProvider {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn with_scores(scores: MockPlayerScoreRepository) -> Self {
            Self {
                scores: Arc::new(scores),
                ..Default::default()
            }
        }

        pub fn scores(&self) -> Arc<MockPlayerScoreRepository> {
            self.scores.clone()
        }

        pub fn commits(&self) -> usize {
            self.commits.load(Ordering::SeqCst)
        }

        pub fn rollbacks(&self) -> usize {
            self.rollbacks.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UnitOfWorkProvider for MockUnitOfWorkProvider {
        async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
            let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork {
                scores: self.scores.clone(),
                commits: self.commits.clone(),
                rollbacks: self.rollbacks.clone(),
            });
            Ok(uow)
        }
    }
}

//! Postgres-backed tests. They need `TEST_DATABASE_URL` and run with
//! `cargo test -- --ignored`. Every test works inside one transaction that is
//! never committed, and uses its own player ids.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use leaderboard_app::{
    command_handlers::SubmitScoreCommandHandler,
    config::Config,
    cqrs::{commands::SubmitScore, queries::GetLeaderboard},
    queries_handlers::GetLeaderboardHandler,
    repository::PlayerScoreRepository,
    uow::UnitOfWorkProvider,
};
use leaderboard_types::{
    Result,
    common::{PlayerId, UpdateMode},
    errors::{ApplicationError, LeaderboardError},
    leaderboard::{RankAndScore, RankedEntry},
};

use crate::test_utils::tests::setup_db_app;

async fn seeded_scores(
    uow_provider: &Arc<dyn UnitOfWorkProvider>,
    board: &[(&str, i64)],
) -> Result<()> {
    let uow = uow_provider.begin().await?;
    let scores = uow.scores();
    scores.delete_all().await?;
    for (player_id, score) in board {
        scores.upsert(player_id, *score, false).await?;
    }
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_dense_rank_top_and_window() -> Result<(), ApplicationError> {
    let (_, uow_provider) = setup_db_app(Config::default()).await?;
    seeded_scores(
        &uow_provider,
        &[("rank-A", 100), ("rank-C", 90), ("rank-D", 80), ("rank-B", 90)],
    )
    .await?;
    let uow = uow_provider.begin().await?;
    let scores = uow.scores();

    assert_eq!(
        scores.rank_and_score("rank-C").await?,
        Some(RankAndScore { rank: 2, score: 90 })
    );
    assert_eq!(
        scores.rank_and_score("rank-D").await?,
        Some(RankAndScore { rank: 3, score: 80 })
    );
    assert_eq!(scores.rank_and_score("rank-ghost").await?, None);

    assert_eq!(
        scores.top(3).await?,
        vec![
            RankedEntry::new("rank-A", 100, 1),
            RankedEntry::new("rank-B", 90, 2),
            RankedEntry::new("rank-C", 90, 2),
        ]
    );
    assert!(scores.top(0).await?.is_empty());

    assert_eq!(
        scores.windowed(3, 1).await?,
        vec![
            RankedEntry::new("rank-B", 90, 2),
            RankedEntry::new("rank-C", 90, 2),
            RankedEntry::new("rank-D", 80, 3),
        ]
    );
    assert_eq!(scores.windowed(1, 0).await?, vec![RankedEntry::new("rank-A", 100, 1)]);
    assert!(scores.windowed(7, 2).await?.is_empty());
    assert!(scores.windowed(0, 2).await?.is_empty());

    assert_eq!(scores.count().await?, 4);
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_ties_order_by_code_point() -> Result<(), ApplicationError> {
    let (_, uow_provider) = setup_db_app(Config::default()).await?;
    seeded_scores(
        &uow_provider,
        &[("coll-b", 5), ("coll-Z", 5), ("coll-é", 5), ("coll-a", 5)],
    )
    .await?;
    let uow = uow_provider.begin().await?;

    let ids: Vec<String> = uow
        .scores()
        .top(10)
        .await?
        .into_iter()
        .map(|e| e.player_id)
        .collect();

    assert_eq!(ids, vec!["coll-Z", "coll-a", "coll-b", "coll-é"]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_upsert_replace_and_accumulate() -> Result<(), ApplicationError> {
    let (_, uow_provider) = setup_db_app(Config::default()).await?;
    seeded_scores(&uow_provider, &[]).await?;
    let uow = uow_provider.begin().await?;
    let scores = uow.scores();

    scores.upsert("upsert-dave", 10, true).await?;
    let first = scores.get("upsert-dave").await?.unwrap();
    assert_eq!(first.score, 10);

    scores.upsert("upsert-dave", 0, true).await?;
    let second = scores.get("upsert-dave").await?.unwrap();
    assert_eq!(second.score, 10);
    assert!(second.updated_at >= first.updated_at);

    scores.upsert("upsert-dave", 3, false).await?;
    assert_eq!(scores.get("upsert-dave").await?.unwrap().score, 3);
    assert!(scores.get("upsert-nobody").await?.is_none());
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_accumulate_overflow_is_rejected() -> Result<(), ApplicationError> {
    let (_, uow_provider) = setup_db_app(Config::default()).await?;
    seeded_scores(&uow_provider, &[("overflow-eve", i64::MAX - 1)]).await?;
    let uow = uow_provider.begin().await?;

    let result = uow.scores().upsert("overflow-eve", 2, true).await;

    assert!(matches!(
        result,
        Err(ApplicationError::Leaderboard(LeaderboardError::ScoreOverflow { .. }))
    ));
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_snapshot_through_bus() -> Result<(), ApplicationError> {
    let (app_bus, uow_provider) = setup_db_app(Config {
        top_limit: 2,
        nearby_range: 1,
        update_mode: UpdateMode::Accumulate,
        ..Default::default()
    })
    .await?;
    seeded_scores(&uow_provider, &[("bus-A", 100), ("bus-B", 90), ("bus-C", 80)]).await?;
    let cancel = CancellationToken::new();

    app_bus
        .execute(
            SubmitScore::new("bus-C", 15)?,
            SubmitScoreCommandHandler::new(),
            &cancel,
        )
        .await?;
    let snapshot = app_bus
        .query(
            GetLeaderboard {
                player_id: PlayerId::parse("bus-C")?,
            },
            GetLeaderboardHandler::new(),
            &cancel,
        )
        .await?;

    assert_eq!(snapshot.standing, Some(RankAndScore { rank: 2, score: 95 }));
    assert_eq!(
        snapshot.top,
        vec![
            RankedEntry::new("bus-A", 100, 1),
            RankedEntry::new("bus-C", 95, 2),
        ]
    );
    assert_eq!(
        snapshot.nearby,
        vec![
            RankedEntry::new("bus-A", 100, 1),
            RankedEntry::new("bus-B", 90, 3),
        ]
    );
    Ok(())
}

use axum::{
    Json,
    extract::{Query, State},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use leaderboard_types::leaderboard::{LeaderboardSnapshot, RankedEntry};

use crate::{
    handlers::helpers::{ApiError, MessageResponse},
    http::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    /// Missing ids fall through to id validation so the error names `playerId`.
    #[serde(default)]
    pub player_id: String,
    pub score: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardParams {
    pub player_id: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub player_id: String,
    /// -1 when the player has no record.
    pub player_rank: i64,
    pub player_score: i64,
    pub top_players: Vec<RankedEntry>,
    pub nearby_players: Vec<RankedEntry>,
}

impl From<LeaderboardSnapshot> for LeaderboardResponse {
    fn from(snapshot: LeaderboardSnapshot) -> Self {
        LeaderboardResponse {
            player_rank: snapshot.player_rank(),
            player_score: snapshot.player_score(),
            player_id: snapshot.player_id,
            top_players: snapshot.top,
            nearby_players: snapshot.nearby,
        }
    }
}

/// POST /api/submit
pub async fn submit_score(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<SubmitScoreRequest>, ApiError>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let cancel = state.request_token();
    let snapshot = state
        .service
        .submit(&request.player_id, request.score, &cancel)
        .await?;

    Ok(Json(snapshot.into()))
}

/// GET /api/leaderboard?playerId=...
pub async fn get_leaderboard(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<LeaderboardParams>, ApiError>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let cancel = state.request_token();
    let player_id = params.player_id.unwrap_or_default();
    let snapshot = state.service.get_leaderboard(&player_id, &cancel).await?;

    Ok(Json(snapshot.into()))
}

/// POST /api/reset
pub async fn reset_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let cancel = state.request_token();
    state.service.reset(&cancel).await?;

    Ok(Json(MessageResponse {
        message: "Leaderboard reset".to_string(),
    }))
}

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::http::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_count: Option<i64>,
}

/// GET /api/health/live
pub async fn live() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Healthy",
        player_count: None,
    })
}

/// GET /api/health/ready - the store must answer a count.
pub async fn ready(State(state): State<AppState>) -> Response {
    let cancel = state.request_token();
    match state.service.readiness(&cancel).await {
        Ok(readiness) => Json(HealthResponse {
            status: "Healthy",
            player_count: Some(readiness.player_count),
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "Unhealthy",
                    player_count: None,
                }),
            )
                .into_response()
        }
    }
}

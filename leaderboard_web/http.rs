use axum::{
    Router,
    routing::{get, post},
};
use std::{io::Error, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use leaderboard_app::service::LeaderboardService;
use leaderboard_types::{Result, errors::ApplicationError};

use crate::handlers::{get_leaderboard, live, ready, reset_leaderboard, submit_score};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LeaderboardService>,
    /// Root token: cancelled on shutdown, every request runs under a child of it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(service: Arc<LeaderboardService>, shutdown: CancellationToken) -> AppState {
        AppState { service, shutdown }
    }

    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}

pub struct WebRouter {}

impl WebRouter {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/api/submit", post(submit_score))
            .route("/api/leaderboard", get(get_leaderboard))
            .route("/api/reset", post(reset_leaderboard))
            .route("/api/health/live", get(live))
            .route("/api/health/ready", get(ready))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(state: AppState, port: u16) -> Result<(), ApplicationError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(infra_error)?;

        Self::serve_on(listener, state).await
    }

    /// Serves on an already bound listener until the state's shutdown token fires.
    pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<(), ApplicationError> {
        let shutdown = state.shutdown.clone();
        let addr = listener.local_addr().map_err(infra_error)?;
        let router = Self::router(state);

        tracing::info!("HTTP Server started, listening on http://{}", addr);
        axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .map_err(infra_error)?;

        tracing::info!("HTTP Server stopped");
        Ok(())
    }
}

fn infra_error(e: Error) -> ApplicationError {
    let err = format!("{:#?}", e);
    ApplicationError::Infrastructure(err)
}

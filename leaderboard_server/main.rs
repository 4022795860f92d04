use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use leaderboard_app::{
    app::AppBus, config::Config, reset_worker::ResetScheduler, service::LeaderboardService,
};
use leaderboard_db::{establish_connection_pool, run_migrations, uow::PostgresUnitOfWorkProvider};
use leaderboard_types::{Result, errors::ApplicationError};
use leaderboard_web::{AppState, WebRouter};

mod logs;
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    setup_logging();
    let (config, service) = setup_app().await.inspect_err(|e| {
        tracing::error!("Startup failed: {}", e);
    })?;

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_shutdown(shutdown.clone()));

    if let Some(interval) = config.reset_interval() {
        Arc::new(ResetScheduler::new(service.clone(), interval)).run(shutdown.clone());
    }

    let state = AppState::new(service, shutdown);
    WebRouter::serve(state, config.http_port).await
}

async fn setup_app() -> Result<(Arc<Config>, Arc<LeaderboardService>), ApplicationError> {
    let config = Arc::new(Config::from_env()?);
    tracing::info!(
        top_limit = config.top_limit,
        nearby_range = config.nearby_range,
        update_mode = %config.update_mode,
        "Configuration loaded."
    );

    let db_pool = establish_connection_pool().await?;
    run_migrations(&db_pool).await?;

    let uow_provider = Arc::new(PostgresUnitOfWorkProvider::new(db_pool));
    let app_bus = Arc::new(AppBus::new(config.clone(), uow_provider));
    let service = Arc::new(LeaderboardService::new(app_bus));

    Ok((config, service))
}

async fn wait_for_shutdown(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Unable to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown requested, draining requests.");
    shutdown.cancel();
}

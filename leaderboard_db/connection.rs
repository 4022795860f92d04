use sqlx::postgres::{PgPool, PgPoolOptions};
use std::env;

use leaderboard_types::errors::{ApplicationError, ConfigError, DbError};

pub type DbPool = PgPool;

pub async fn establish_connection_pool() -> Result<DbPool, ApplicationError> {
    init_connection_pool("DATABASE_URL").await
}

pub async fn establish_test_connection_pool() -> Result<DbPool, ApplicationError> {
    init_connection_pool("TEST_DATABASE_URL").await
}

/// Applies the schema migrations shipped with the workspace.
pub async fn run_migrations(pool: &DbPool) -> Result<(), ApplicationError> {
    sqlx::migrate!("../migrations")
        .run(pool)
        .await
        .map_err(DbError::Migration)?;
    Ok(())
}

async fn init_connection_pool(database_env: &'static str) -> Result<DbPool, ApplicationError> {
    dotenvy::dotenv().ok();

    let database_url = env::var(database_env).map_err(|_| ConfigError::Missing(database_env))?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .map_err(DbError::Database)?;

    tracing::debug!("Connection pool ready ({})", database_env);
    Ok(pool)
}

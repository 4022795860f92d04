use thiserror::Error;

pub mod config_error;
pub mod db_error;
pub mod leaderboard_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use db_error::DbError;
pub use leaderboard_error::LeaderboardError;
pub use validation_error::ValidationError;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Leaderboard(#[from] LeaderboardError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Operation was cancelled")]
    Cancelled,

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("An unknown error occurred: {0}")]
    Unknown(String),
}

impl ApplicationError {
    /// Returns the request field to blame when the error was caused by client input.
    pub fn rejected_field(&self) -> Option<&'static str> {
        match self {
            ApplicationError::Validation(e) => Some(e.field()),
            ApplicationError::Leaderboard(e) => Some(e.field()),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for ApplicationError {
    fn from(err: sqlx::Error) -> Self {
        ApplicationError::Db(DbError::Database(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_field_only_for_client_errors() {
        let err: ApplicationError = ValidationError::NegativeScore.into();
        assert_eq!(err.rejected_field(), Some("score"));

        let err: ApplicationError = LeaderboardError::ScoreOverflow {
            player_id: "alice".to_string(),
        }
        .into();
        assert_eq!(err.rejected_field(), Some("score"));

        let err = ApplicationError::Db(DbError::Transaction("boom".to_string()));
        assert_eq!(err.rejected_field(), None);
        assert_eq!(ApplicationError::Cancelled.rejected_field(), None);
    }
}

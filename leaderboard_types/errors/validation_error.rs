use thiserror::Error;

/// Errors for client input that must never reach the rank store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("playerId is required and must be <= {max} characters.")]
    InvalidPlayerId { max: usize },

    #[error("Score must be non-negative.")]
    NegativeScore,

    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

impl ValidationError {
    /// Name of the offending field, as the client sent it.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidPlayerId { .. } => "playerId",
            ValidationError::NegativeScore => "score",
            ValidationError::MalformedRequest(_) => "body",
        }
    }
}

use thiserror::Error;

/// Errors raised while loading configuration at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be either 'Replace' or 'Accumulate', got '{value}'")]
    InvalidUpdateMode { key: &'static str, value: String },

    #[error("{key} must be an integer, got '{value}'")]
    NotANumber { key: &'static str, value: String },

    #[error("{key} must be >= 0, got {value}")]
    Negative { key: &'static str, value: i64 },

    #[error("{0} must be set")]
    Missing(&'static str),
}

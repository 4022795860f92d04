use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::errors::ValidationError;

/// Maximum length of a player id, counted in Unicode code points.
pub const MAX_PLAYER_ID_CHARS: usize = 128;

/// A trimmed, non-empty player identifier of at most [`MAX_PLAYER_ID_CHARS`] code points.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len == 0 || len > MAX_PLAYER_ID_CHARS {
            return Err(ValidationError::InvalidPlayerId {
                max: MAX_PLAYER_ID_CHARS,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How a submitted score is combined with the stored one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateMode {
    #[default]
    Replace,
    Accumulate,
}

impl UpdateMode {
    pub fn accumulates(&self) -> bool {
        matches!(self, UpdateMode::Accumulate)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown update mode '{0}'")]
pub struct ParseUpdateModeError(pub String);

impl FromStr for UpdateMode {
    type Err = ParseUpdateModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("replace") {
            Ok(UpdateMode::Replace)
        } else if value.eq_ignore_ascii_case("accumulate") {
            Ok(UpdateMode::Accumulate)
        } else {
            Err(ParseUpdateModeError(s.to_string()))
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateMode::Replace => f.write_str("Replace"),
            UpdateMode::Accumulate => f.write_str("Accumulate"),
        }
    }
}

/// The persisted score of one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub player_id: String,
    pub score: i64,
    pub updated_at: DateTime<Utc>,
}

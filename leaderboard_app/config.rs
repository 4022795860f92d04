use dotenvy::dotenv;
use std::{env, time::Duration};

use leaderboard_types::{common::UpdateMode, errors::ConfigError};

pub const TOP_LIMIT_VAR: &str = "LEADERBOARD_TOP_LIMIT";
pub const NEARBY_RANGE_VAR: &str = "LEADERBOARD_NEARBY_RANGE";
pub const UPDATE_MODE_VAR: &str = "LEADERBOARD_UPDATE_MODE";
pub const RESET_INTERVAL_HOURS_VAR: &str = "LEADERBOARD_RESET_INTERVAL_HOURS";
pub const HTTP_PORT_VAR: &str = "LEADERBOARD_HTTP_PORT";

/// Process-wide leaderboard policy, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How many players the top list holds.
    pub top_limit: i32,
    /// How many ranks above and below a player the nearby window spans.
    pub nearby_range: i32,
    pub update_mode: UpdateMode,
    /// Hours between scheduled resets, 0 disables them.
    pub reset_interval_hours: i32,
    pub http_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_limit: 10,
            nearby_range: 2,
            update_mode: UpdateMode::Replace,
            reset_interval_hours: 0,
            http_port: 8080,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from a key lookup, validating every value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let update_mode = match lookup(UPDATE_MODE_VAR) {
            Some(val) => val
                .parse::<UpdateMode>()
                .map_err(|_| ConfigError::InvalidUpdateMode {
                    key: UPDATE_MODE_VAR,
                    value: val,
                })?,
            None => defaults.update_mode,
        };

        let http_port = match lookup(HTTP_PORT_VAR) {
            Some(val) => val
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::NotANumber {
                    key: HTTP_PORT_VAR,
                    value: val,
                })?,
            None => defaults.http_port,
        };

        Ok(Self {
            top_limit: non_negative(&lookup, TOP_LIMIT_VAR, defaults.top_limit)?,
            nearby_range: non_negative(&lookup, NEARBY_RANGE_VAR, defaults.nearby_range)?,
            update_mode,
            reset_interval_hours: non_negative(
                &lookup,
                RESET_INTERVAL_HOURS_VAR,
                defaults.reset_interval_hours,
            )?,
            http_port,
        })
    }

    /// Period of the scheduled reset, if enabled.
    pub fn reset_interval(&self) -> Option<Duration> {
        if self.reset_interval_hours > 0 {
            Some(Duration::from_secs(self.reset_interval_hours as u64 * 3600))
        } else {
            None
        }
    }
}

fn non_negative<F>(lookup: &F, key: &'static str, default: i32) -> Result<i32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(val) = lookup(key) else {
        return Ok(default);
    };
    let parsed = val
        .trim()
        .parse::<i32>()
        .map_err(|_| ConfigError::NotANumber { key, value: val })?;
    if parsed < 0 {
        return Err(ConfigError::Negative {
            key,
            value: parsed as i64,
        });
    }
    Ok(parsed)
}

use leaderboard_types::{common::UpdateMode, errors::LeaderboardError};

/// Computes the score to store after a submission.
///
/// `previous` is `None` for a player's first submission, which accumulates
/// from zero. Sums above `i64::MAX` are rejected instead of wrapping.
pub fn apply_update(
    mode: UpdateMode,
    player_id: &str,
    previous: Option<i64>,
    submitted: i64,
) -> Result<i64, LeaderboardError> {
    match mode {
        UpdateMode::Replace => Ok(submitted),
        UpdateMode::Accumulate => previous
            .unwrap_or(0)
            .checked_add(submitted)
            .ok_or_else(|| LeaderboardError::ScoreOverflow {
                player_id: player_id.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_ignores_previous() {
        assert_eq!(apply_update(UpdateMode::Replace, "a", Some(500), 20), Ok(20));
        assert_eq!(apply_update(UpdateMode::Replace, "a", None, 20), Ok(20));
    }

    #[test]
    fn test_accumulate_adds_to_previous() {
        assert_eq!(apply_update(UpdateMode::Accumulate, "a", Some(70), 30), Ok(100));
        assert_eq!(apply_update(UpdateMode::Accumulate, "a", None, 30), Ok(30));
    }

    #[test]
    fn test_accumulate_zero_keeps_score() {
        assert_eq!(apply_update(UpdateMode::Accumulate, "dave", Some(10), 0), Ok(10));
    }

    #[test]
    fn test_accumulate_overflow_is_rejected() {
        assert_eq!(
            apply_update(UpdateMode::Accumulate, "max", Some(i64::MAX), 1),
            Err(LeaderboardError::ScoreOverflow {
                player_id: "max".to_string()
            })
        );
        assert_eq!(
            apply_update(UpdateMode::Accumulate, "max", Some(i64::MAX - 1), 1),
            Ok(i64::MAX)
        );
    }
}

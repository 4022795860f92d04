mod reset_leaderboard;
mod submit_score;

pub use reset_leaderboard::ResetLeaderboardCommandHandler;
pub use submit_score::SubmitScoreCommandHandler;

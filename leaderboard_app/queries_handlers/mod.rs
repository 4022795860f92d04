mod check_readiness;
mod get_leaderboard;

pub use check_readiness::CheckReadinessHandler;
pub use get_leaderboard::GetLeaderboardHandler;

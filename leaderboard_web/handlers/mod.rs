mod health_handler;
mod helpers;
mod leaderboard_handler;

pub use health_handler::*;
pub use helpers::*;
pub use leaderboard_handler::*;

pub mod common;
pub mod errors;
pub mod leaderboard;

pub use errors::Result;

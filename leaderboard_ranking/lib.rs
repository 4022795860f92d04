pub mod ranking;
pub mod score;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ranking::{DenseRanker, Ranking, rank_order, window_bounds};
pub use score::apply_update;

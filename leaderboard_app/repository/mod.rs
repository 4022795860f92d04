mod player_score_repository;

pub use player_score_repository::PlayerScoreRepository;

use std::sync::Arc;

use leaderboard_types::{Result, errors::ValidationError};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::SubmitScore},
    uow::UnitOfWork,
};

pub struct SubmitScoreCommandHandler {}

impl Default for SubmitScoreCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitScoreCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<SubmitScore> for SubmitScoreCommandHandler {
    async fn handle(
        &self,
        command: SubmitScore,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<()> {
        if command.score < 0 {
            return Err(ValidationError::NegativeScore.into());
        }

        uow.scores()
            .upsert(
                command.player_id.as_str(),
                command.score,
                config.update_mode.accumulates(),
            )
            .await?;

        tracing::debug!(
            player_id = %command.player_id,
            score = command.score,
            mode = %config.update_mode,
            "Score submitted"
        );

        Ok(())
    }
}

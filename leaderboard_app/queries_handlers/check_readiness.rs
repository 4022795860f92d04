use async_trait::async_trait;
use std::sync::Arc;

use leaderboard_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{
        Query, QueryHandler,
        queries::{CheckReadiness, Readiness},
    },
    uow::UnitOfWork,
};

pub struct CheckReadinessHandler {}

impl CheckReadinessHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<CheckReadiness> for CheckReadinessHandler {
    async fn handle(
        &self,
        _query: CheckReadiness,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<CheckReadiness as Query>::Output, ApplicationError> {
        let player_count = uow.scores().count().await?;
        Ok(Readiness { player_count })
    }
}

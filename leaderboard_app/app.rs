use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use leaderboard_types::errors::{ApplicationError, Result};

use crate::{
    config::Config,
    cqrs::{Command, CommandHandler, Query, QueryHandler},
    uow::UnitOfWorkProvider,
};

/// AppBus (Mediator)
/// This struct is the central entry point for all application logic.
/// It does not contain any business logic itself.
/// Its primary roles are:
/// 1. Managing Unit of Work (transaction) lifecycles.
/// 2. Dispatching Commands and Queries to their respective handlers.
///
/// Every dispatch takes a cancellation token. A cancelled handler is dropped
/// and its Unit of Work rolled back; commit is never interrupted.
pub struct AppBus {
    config: Arc<Config>,
    uow_provider: Arc<dyn UnitOfWorkProvider>,
}

impl AppBus {
    pub fn new(config: Arc<Config>, uow_provider: Arc<dyn UnitOfWorkProvider>) -> Self {
        Self {
            config,
            uow_provider,
        }
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Executes a command.
    /// A command is an operation that modifies the system state.
    /// - It begins a Unit of Work.
    /// - It passes the UoW to the handler.
    /// - If the handler succeeds, it commits the UoW.
    /// - If the handler fails or is cancelled, it rolls back the UoW.
    pub async fn execute<C, H>(
        &self,
        cmd: C,
        handler: H,
        cancel: &CancellationToken,
    ) -> Result<(), ApplicationError>
    where
        C: Command,
        H: CommandHandler<C>,
    {
        if cancel.is_cancelled() {
            return Err(ApplicationError::Cancelled);
        }
        let uow = self.uow_provider.begin().await?;

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApplicationError::Cancelled),
            result = handler.handle(cmd, &uow, &self.config) => result,
        };

        match outcome {
            Ok(_) => {
                uow.commit().await?;
                Ok(())
            }
            Err(e) => {
                if matches!(e, ApplicationError::Cancelled) {
                    tracing::warn!("Command cancelled, rolling back");
                }
                uow.rollback().await?;
                Err(e)
            }
        }
    }

    /// Executes a query.
    /// A query is an operation that reads system state and returns data.
    /// It should *never* modify the state.
    /// This method ensures the transaction is *always* rolled back.
    pub async fn query<Q, H>(
        &self,
        query: Q,
        handler: H,
        cancel: &CancellationToken,
    ) -> Result<Q::Output, ApplicationError>
    where
        Q: Query,
        H: QueryHandler<Q>,
    {
        if cancel.is_cancelled() {
            return Err(ApplicationError::Cancelled);
        }
        let uow = self.uow_provider.begin().await?;

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApplicationError::Cancelled),
            result = handler.handle(query, &uow, &self.config) => result,
        };

        // Always rollback a query, as it should never write data.
        uow.rollback().await?;

        result
    }
}

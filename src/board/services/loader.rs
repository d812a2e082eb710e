//! Board loading: dependent stage and task fetches.

use std::sync::Arc;
use thiserror::Error;

use super::store::{BoardStore, BoardStoreError};
use crate::board::ports::{BoardGateway, GatewayError, StageQuery, TaskQuery};

/// Errors surfaced by a board load.
///
/// Every variant leaves the store settled and renderable; missing
/// collections degrade to empty instead of crashing the grouper.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The stage fetch failed; the task fetch was not issued.
    #[error("loading stages: {0}")]
    Stages(#[source] GatewayError),

    /// The task fetch failed after stages loaded.
    #[error("loading tasks: {0}")]
    Tasks(#[source] GatewayError),

    /// The store rejected an update.
    #[error(transparent)]
    Store(#[from] BoardStoreError),
}

/// Loads the board: stages first, then tasks.
///
/// The task fetch is an explicit continuation of the stage fetch rather than
/// a framework "enabled" flag: it is only issued once the stage fetch has
/// produced a result, so the board never renders columns that tasks were not
/// evaluated against.
pub struct BoardLoader<G: BoardGateway> {
    gateway: Arc<G>,
    store: Arc<BoardStore>,
}

impl<G: BoardGateway> BoardLoader<G> {
    /// Creates a loader over the given gateway and store.
    #[must_use]
    pub const fn new(gateway: Arc<G>, store: Arc<BoardStore>) -> Self {
        Self { gateway, store }
    }

    /// Fetches stages and tasks into the store.
    ///
    /// On failure the store settles with whatever did load and the typed
    /// error is returned to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Stages`] or [`LoadError::Tasks`] for fetch
    /// failures and [`LoadError::Store`] when the store lock is poisoned.
    pub async fn load(&self) -> Result<(), LoadError> {
        let stages = match self.gateway.list_stages(&StageQuery::workflow()).await {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::warn!(error = %err, "stage fetch failed; rendering an empty board");
                self.store.set_stages(Vec::new())?;
                self.store.set_tasks(Vec::new())?;
                self.store.mark_ready()?;
                return Err(LoadError::Stages(err));
            }
        };
        tracing::debug!(count = stages.len(), "stages loaded");
        self.store.set_stages(stages)?;

        let tasks = match self.gateway.list_tasks(&TaskQuery::default()).await {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::warn!(error = %err, "task fetch failed; rendering empty columns");
                self.store.set_tasks(Vec::new())?;
                self.store.mark_ready()?;
                return Err(LoadError::Tasks(err));
            }
        };
        tracing::debug!(count = tasks.len(), "tasks loaded");
        self.store.set_tasks(tasks)?;
        self.store.mark_ready()?;
        Ok(())
    }
}

//! Task creation and editing over the gateway.

use std::sync::Arc;
use thiserror::Error;

use super::store::{BoardStore, BoardStoreError};
use crate::board::{
    domain::{BoardDomainError, TaskCard, TaskDraft, TaskId, TaskPatch},
    ports::{BoardGateway, GatewayError},
};

/// Errors surfaced by the task editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// The gateway rejected the operation.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The store rejected an update.
    #[error(transparent)]
    Store(#[from] BoardStoreError),
}

/// Creates, edits, and deletes task cards, keeping the board cache in sync.
///
/// Every server copy returned by the gateway is merged into the store with
/// the same replace-by-id semantics as a live event.
pub struct TaskEditor<G: BoardGateway> {
    gateway: Arc<G>,
    store: Arc<BoardStore>,
}

impl<G: BoardGateway> TaskEditor<G> {
    /// Creates an editor over the given gateway and store.
    #[must_use]
    pub const fn new(gateway: Arc<G>, store: Arc<BoardStore>) -> Self {
        Self { gateway, store }
    }

    /// Creates a card and merges the server copy into the cache.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Gateway`] when creation fails.
    pub async fn create(&self, draft: &TaskDraft) -> Result<TaskCard, EditorError> {
        let card = self.gateway.create_task(draft).await?;
        self.store.upsert_task(card.clone())?;
        Ok(card)
    }

    /// Applies a partial update and merges the server copy into the cache.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Domain`] for an empty patch or a blank new
    /// title, and [`EditorError::Gateway`] when the update fails.
    pub async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<TaskCard, EditorError> {
        if patch.is_empty() {
            return Err(EditorError::Domain(BoardDomainError::EmptyTaskPatch));
        }
        if patch.title().is_some_and(|title| title.trim().is_empty()) {
            return Err(EditorError::Domain(BoardDomainError::EmptyTaskTitle));
        }
        let card = self.gateway.update_task(id, patch).await?;
        self.store.upsert_task(card.clone())?;
        Ok(card)
    }

    /// Deletes a card from the server and the cache.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Gateway`] when deletion fails.
    pub async fn delete(&self, id: &TaskId) -> Result<(), EditorError> {
        self.gateway.delete_task(id).await?;
        self.store.remove_task(id)?;
        Ok(())
    }
}

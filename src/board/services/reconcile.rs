//! Drag reconciliation: optimistic stage reassignment with rollback.
//!
//! A drag that changes a card's stage patches the cache immediately and
//! registers a pending [`StageMutation`]. The mutation settles exactly once:
//! server acknowledgement commits it and replaces the card with the server
//! copy; rejection or expiry restores the previous stage and surfaces a
//! notice. Commits are deliberately silent.

use chrono::Duration;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

use super::store::{BoardStore, BoardStoreError};
use crate::board::{
    domain::{
        DragEvent, MutationId, MutationSettledError, MutationStatus, StageMutation, TaskCard,
        TaskId, resolve,
    },
    ports::{BoardGateway, BoardNotice, BoardNotifier, GatewayError},
};

/// Errors surfaced by drag reconciliation.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The server rejected the stage update; the board was rolled back.
    #[error("stage update for task {task_id} failed: {source}")]
    UpdateFailed {
        /// The card whose update failed.
        task_id: TaskId,
        /// The gateway failure.
        #[source]
        source: GatewayError,
    },

    /// No registered mutation carries the given id.
    #[error("unknown mutation: {0}")]
    UnknownMutation(MutationId),

    /// The mutation was already settled.
    #[error(transparent)]
    Settled(#[from] MutationSettledError),

    /// The in-flight mutation ledger lock was poisoned.
    #[error("mutation ledger lock poisoned: {0}")]
    Ledger(String),

    /// The store rejected an update.
    #[error(transparent)]
    Store(#[from] BoardStoreError),
}

/// Outcome of a submitted drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDisposition {
    /// The drop resolved to no stage change; nothing was issued.
    Ignored,
    /// The server acknowledged the reassignment.
    Committed(MutationId),
}

/// Applies drag gestures to the board with optimistic semantics.
pub struct DragReconciler<G, N, C>
where
    G: BoardGateway,
    N: BoardNotifier,
    C: Clock + Send + Sync,
{
    store: Arc<BoardStore>,
    gateway: Arc<G>,
    notifier: Arc<N>,
    clock: Arc<C>,
    in_flight: RwLock<HashMap<MutationId, StageMutation>>,
}

impl<G, N, C> DragReconciler<G, N, C>
where
    G: BoardGateway,
    N: BoardNotifier,
    C: Clock + Send + Sync,
{
    /// Creates a reconciler over the given store, gateway, and notifier.
    #[must_use]
    pub fn new(store: Arc<BoardStore>, gateway: Arc<G>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            store,
            gateway,
            notifier,
            clock,
            in_flight: RwLock::new(HashMap::new()),
        }
    }

    /// Applies the predicted stage for a drag and registers the pending
    /// mutation.
    ///
    /// Returns `None` without touching the store or the gateway when the
    /// drag resolves to no stage change (drop outside the board, or onto the
    /// source column).
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Store`] when the dragged card is not cached
    /// or the store lock is poisoned.
    pub fn begin(&self, event: &DragEvent) -> Result<Option<StageMutation>, ReconcileError> {
        let Some(assignment) = resolve(event) else {
            return Ok(None);
        };
        let previous = self
            .store
            .patch_task_stage(assignment.task_id(), assignment.stage_id())?;
        let mutation = StageMutation::new(
            assignment.task_id().clone(),
            previous,
            assignment.stage_id().cloned(),
            &*self.clock,
        );
        tracing::debug!(
            task_id = %assignment.task_id(),
            mutation_id = %mutation.id(),
            "optimistic stage patch applied"
        );
        self.ledger_write()?
            .insert(mutation.id(), mutation.clone());
        Ok(Some(mutation))
    }

    /// Settles a registered mutation with the gateway outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::UnknownMutation`] for an unregistered id,
    /// [`ReconcileError::Settled`] for a double settlement, and
    /// [`ReconcileError::UpdateFailed`] after a completed rollback.
    pub fn finish(
        &self,
        id: MutationId,
        outcome: Result<TaskCard, GatewayError>,
    ) -> Result<DragDisposition, ReconcileError> {
        let mut ledger = self.ledger_write()?;
        let mutation = ledger
            .get_mut(&id)
            .ok_or(ReconcileError::UnknownMutation(id))?;
        match outcome {
            Ok(card) => {
                mutation.commit(&*self.clock)?;
                self.store.upsert_task(card)?;
                tracing::debug!(mutation_id = %id, "stage update committed");
                Ok(DragDisposition::Committed(id))
            }
            Err(source) => {
                mutation.roll_back(&*self.clock)?;
                let task_id = mutation.task_id().clone();
                let previous = mutation.previous().cloned();
                if let Err(store_err) = self.store.patch_task_stage(&task_id, previous.as_ref()) {
                    tracing::warn!(error = %store_err, "rollback target disappeared from the cache");
                }
                self.notifier.notify(&BoardNotice::StageUpdateFailed {
                    task_id: task_id.clone(),
                    reason: source.to_string(),
                });
                Err(ReconcileError::UpdateFailed { task_id, source })
            }
        }
    }

    /// Resolves a drag, issues the optimistic update, and settles it.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::begin`] and [`Self::finish`] errors; a rejected
    /// update surfaces as [`ReconcileError::UpdateFailed`] after the board
    /// has been rolled back.
    pub async fn submit(&self, event: &DragEvent) -> Result<DragDisposition, ReconcileError> {
        let Some(mutation) = self.begin(event)? else {
            return Ok(DragDisposition::Ignored);
        };
        let outcome = self
            .gateway
            .update_task_stage(mutation.task_id(), mutation.target())
            .await;
        self.finish(mutation.id(), outcome)
    }

    /// Rolls back pending mutations older than `max_age`.
    ///
    /// A request that never resolves would otherwise leave predicted state
    /// live indefinitely. The host event loop decides the sweep cadence;
    /// each expired mutation restores its previous stage and emits
    /// [`BoardNotice::StageUpdateTimedOut`]. Returns the expired ids.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Ledger`] when the ledger lock is poisoned.
    pub fn expire_overdue(&self, max_age: Duration) -> Result<Vec<MutationId>, ReconcileError> {
        let now = self.clock.utc();
        let mut expired = Vec::new();
        let mut ledger = self.ledger_write()?;
        for (id, mutation) in ledger.iter_mut() {
            if !mutation.is_overdue(now, max_age) {
                continue;
            }
            mutation.roll_back(&*self.clock)?;
            let task_id = mutation.task_id().clone();
            let previous = mutation.previous().cloned();
            if let Err(store_err) = self.store.patch_task_stage(&task_id, previous.as_ref()) {
                tracing::warn!(error = %store_err, "rollback target disappeared from the cache");
            }
            self.notifier
                .notify(&BoardNotice::StageUpdateTimedOut { task_id });
            tracing::warn!(mutation_id = %id, "optimistic stage update expired");
            expired.push(*id);
        }
        Ok(expired)
    }

    /// Returns a copy of the registered mutation, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Ledger`] when the ledger lock is poisoned.
    pub fn mutation(&self, id: MutationId) -> Result<Option<StageMutation>, ReconcileError> {
        Ok(self.ledger_read()?.get(&id).cloned())
    }

    /// Returns how many registered mutations are still pending.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Ledger`] when the ledger lock is poisoned.
    pub fn pending_count(&self) -> Result<usize, ReconcileError> {
        Ok(self
            .ledger_read()?
            .values()
            .filter(|mutation| mutation.status() == MutationStatus::Pending)
            .count())
    }

    fn ledger_read(
        &self,
    ) -> Result<RwLockReadGuard<'_, HashMap<MutationId, StageMutation>>, ReconcileError> {
        self.in_flight
            .read()
            .map_err(|err| ReconcileError::Ledger(err.to_string()))
    }

    fn ledger_write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<MutationId, StageMutation>>, ReconcileError> {
        self.in_flight
            .write()
            .map_err(|err| ReconcileError::Ledger(err.to_string()))
    }
}

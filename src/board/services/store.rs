//! Observable board store.
//!
//! The store owns the stage and task caches, recomputes the grouped board
//! model on every change, and publishes snapshots through a watch channel.
//! All mutation happens in response to discrete events (fetch completed,
//! drag settled, live update received) issued from a single rendering
//! context; handlers run to completion before the next begins.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tokio::sync::watch;

use crate::board::{
    domain::{GroupedTasks, Stage, StageId, TaskCard, TaskId, group},
    ports::LiveEvent,
};

/// Load phase of the board view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardPhase {
    /// The initial fetches have not both settled; render the skeleton.
    #[default]
    Loading,
    /// Both fetches settled; render the board.
    Ready,
}

/// One published view of the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Load phase.
    pub phase: BoardPhase,
    /// Grouped board model.
    pub grouped: GroupedTasks,
}

/// Errors returned by board store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardStoreError {
    /// The store lock was poisoned by a panicking writer.
    #[error("board store lock poisoned: {0}")]
    Poisoned(String),

    /// The task is not in the cache.
    #[error("task not in board cache: {0}")]
    TaskNotFound(TaskId),
}

#[derive(Debug, Default)]
struct StoreState {
    stages: Vec<Stage>,
    tasks: Vec<TaskCard>,
    phase: BoardPhase,
}

/// Observable stage/task cache with derived column grouping.
#[derive(Debug)]
pub struct BoardStore {
    state: RwLock<StoreState>,
    snapshots: watch::Sender<BoardSnapshot>,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardStore {
    /// Creates an empty store in the loading phase.
    #[must_use]
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(BoardSnapshot::default());
        Self {
            state: RwLock::new(StoreState::default()),
            snapshots,
        }
    }

    /// Subscribes to published board snapshots.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.snapshots.subscribe()
    }

    /// Returns the current board snapshot.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Replaces the stage collection.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn set_stages(&self, stages: Vec<Stage>) -> Result<(), BoardStoreError> {
        let mut state = self.write()?;
        state.stages = stages;
        self.publish(&state);
        Ok(())
    }

    /// Replaces the task collection.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn set_tasks(&self, tasks: Vec<TaskCard>) -> Result<(), BoardStoreError> {
        let mut state = self.write()?;
        state.tasks = tasks;
        self.publish(&state);
        Ok(())
    }

    /// Marks both initial fetches as settled.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn mark_ready(&self) -> Result<(), BoardStoreError> {
        let mut state = self.write()?;
        state.phase = BoardPhase::Ready;
        self.publish(&state);
        Ok(())
    }

    /// Returns a copy of the cached card, if present.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn task(&self, id: &TaskId) -> Result<Option<TaskCard>, BoardStoreError> {
        let state = self.read()?;
        Ok(state.tasks.iter().find(|task| task.id() == id).cloned())
    }

    /// Applies a predicted stage to a cached card and returns the stage it
    /// held before.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::TaskNotFound`] when the card is not cached
    /// and [`BoardStoreError::Poisoned`] when the store lock is poisoned.
    pub fn patch_task_stage(
        &self,
        id: &TaskId,
        stage_id: Option<&StageId>,
    ) -> Result<Option<StageId>, BoardStoreError> {
        let mut state = self.write()?;
        let card = state
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| BoardStoreError::TaskNotFound(id.clone()))?;
        let previous = card.stage_id().cloned();
        card.set_stage(stage_id.cloned());
        self.publish(&state);
        Ok(previous)
    }

    /// Inserts or replaces a card by id.
    ///
    /// Replacement keeps the card's cache position; new cards append.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn upsert_task(&self, card: TaskCard) -> Result<(), BoardStoreError> {
        let mut state = self.write()?;
        let mut replaced = false;
        for task in &mut state.tasks {
            if task.id() == card.id() {
                *task = card.clone();
                replaced = true;
                break;
            }
        }
        if !replaced {
            state.tasks.push(card);
        }
        self.publish(&state);
        Ok(())
    }

    /// Removes a card by id; returns whether it was cached.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn remove_task(&self, id: &TaskId) -> Result<bool, BoardStoreError> {
        let mut state = self.write()?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id() != id);
        let removed = state.tasks.len() != before;
        if removed {
            self.publish(&state);
        }
        Ok(removed)
    }

    /// Inserts or replaces a stage by id.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn upsert_stage(&self, stage: Stage) -> Result<(), BoardStoreError> {
        let mut state = self.write()?;
        let mut replaced = false;
        for known in &mut state.stages {
            if known.id() == stage.id() {
                *known = stage.clone();
                replaced = true;
                break;
            }
        }
        if !replaced {
            state.stages.push(stage);
        }
        self.publish(&state);
        Ok(())
    }

    /// Removes a stage by id; returns whether it was cached.
    ///
    /// Cards assigned to a removed stage become orphaned in the next
    /// grouping.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn remove_stage(&self, id: &StageId) -> Result<bool, BoardStoreError> {
        let mut state = self.write()?;
        let before = state.stages.len();
        state.stages.retain(|stage| stage.id() != id);
        let removed = state.stages.len() != before;
        if removed {
            self.publish(&state);
        }
        Ok(removed)
    }

    /// Merges a pushed resource mutation into the cache.
    ///
    /// Uses the same replace-by-id semantics as a settled mutation response.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn apply_live_event(&self, event: LiveEvent) -> Result<(), BoardStoreError> {
        match event {
            LiveEvent::TaskCreated(card) | LiveEvent::TaskUpdated(card) => self.upsert_task(card),
            LiveEvent::TaskDeleted(id) => self.remove_task(&id).map(|_| ()),
            LiveEvent::StageCreated(stage) | LiveEvent::StageUpdated(stage) => {
                self.upsert_stage(stage)
            }
            LiveEvent::StageDeleted(id) => self.remove_stage(&id).map(|_| ()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, BoardStoreError> {
        self.state
            .read()
            .map_err(|err| BoardStoreError::Poisoned(err.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, BoardStoreError> {
        self.state
            .write()
            .map_err(|err| BoardStoreError::Poisoned(err.to_string()))
    }

    fn publish(&self, state: &StoreState) {
        let grouped = group(&state.tasks, &state.stages);
        if !grouped.orphaned.is_empty() {
            tracing::warn!(
                count = grouped.orphaned.len(),
                "cards reference stages missing from the board"
            );
        }
        self.snapshots.send_replace(BoardSnapshot {
            phase: state.phase,
            grouped,
        });
    }
}

//! In-memory board gateway for tests and offline development.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Stage, StageId, TaskCard, TaskDraft, TaskId, TaskPatch},
    ports::{
        BoardGateway, GatewayError, GatewayResult, Pagination, SortOrder, Sorter, StageQuery,
        StageSortField, TaskQuery, TaskSortField, TransportError,
    },
};

/// Thread-safe in-memory board gateway.
///
/// Beyond serving seeded data it records every stage-update call and supports
/// failure injection, which the reconciliation and loader tests lean on.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardGateway {
    state: Arc<RwLock<GatewayState>>,
}

#[derive(Debug, Default)]
struct GatewayState {
    stages: Vec<Stage>,
    tasks: HashMap<TaskId, TaskCard>,
    stage_updates: Vec<(TaskId, Option<StageId>)>,
    next_update_failure: Option<TransportError>,
    stage_list_failure: Option<TransportError>,
    task_list_failure: Option<TransportError>,
    stage_list_calls: usize,
    task_list_calls: usize,
    created: u64,
}

fn lock_failure(err: impl fmt::Display) -> GatewayError {
    GatewayError::Transport(TransportError::network(format!(
        "gateway state lock poisoned: {err}"
    )))
}

fn paginate<T>(items: Vec<T>, pagination: Pagination) -> Vec<T> {
    match pagination {
        Pagination::Off => items,
        Pagination::Page { number, size } => {
            let page = usize::try_from(number.saturating_sub(1)).unwrap_or_default();
            let per_page = usize::try_from(size).unwrap_or_default();
            items
                .into_iter()
                .skip(page.saturating_mul(per_page))
                .take(per_page)
                .collect()
        }
    }
}

fn compare_due(a: &TaskCard, b: &TaskCard) -> std::cmp::Ordering {
    // Cards without a due date order after dated ones on an ascending sort.
    match (a.due_date(), b.due_date()) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (Some(_), None) => std::cmp::Ordering::Less,
        (Some(left), Some(right)) => left.cmp(&right),
    }
}

fn sort_stages(stages: &mut [Stage], sort: Sorter<StageSortField>) {
    match sort.field {
        StageSortField::CreatedAt => stages.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        }),
        StageSortField::Title => {
            stages.sort_by(|a, b| a.title().cmp(b.title()).then_with(|| a.id().cmp(b.id())));
        }
    }
    if sort.order == SortOrder::Descending {
        stages.reverse();
    }
}

fn sort_tasks(tasks: &mut [TaskCard], sort: Sorter<TaskSortField>) {
    match sort.field {
        TaskSortField::DueDate => {
            tasks.sort_by(|a, b| compare_due(a, b).then_with(|| a.id().cmp(b.id())));
        }
        TaskSortField::UpdatedAt => tasks.sort_by(|a, b| {
            a.updated_at()
                .cmp(&b.updated_at())
                .then_with(|| a.id().cmp(b.id()))
        }),
        TaskSortField::Title => {
            tasks.sort_by(|a, b| a.title().cmp(b.title()).then_with(|| a.id().cmp(b.id())));
        }
    }
    if sort.order == SortOrder::Descending {
        tasks.reverse();
    }
}

impl InMemoryBoardGateway {
    /// Creates an empty in-memory gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the seeded stage collection.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn seed_stages(&self, stages: impl IntoIterator<Item = Stage>) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_failure)?;
        state.stages = stages.into_iter().collect();
        Ok(())
    }

    /// Replaces the seeded task collection.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn seed_tasks(&self, tasks: impl IntoIterator<Item = TaskCard>) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_failure)?;
        state.tasks = tasks.into_iter().map(|task| (task.id().clone(), task)).collect();
        Ok(())
    }

    /// Makes the next stage-update call fail with the given error.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn fail_next_update(&self, error: TransportError) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_failure)?;
        state.next_update_failure = Some(error);
        Ok(())
    }

    /// Makes every stage list call fail with the given error.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn fail_stage_lists(&self, error: TransportError) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_failure)?;
        state.stage_list_failure = Some(error);
        Ok(())
    }

    /// Makes every task list call fail with the given error.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn fail_task_lists(&self, error: TransportError) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_failure)?;
        state.task_list_failure = Some(error);
        Ok(())
    }

    /// Returns every stage-update call issued so far, in order.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn recorded_stage_updates(&self) -> GatewayResult<Vec<(TaskId, Option<StageId>)>> {
        let state = self.state.read().map_err(lock_failure)?;
        Ok(state.stage_updates.clone())
    }

    /// Returns how many stage list calls were issued.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn stage_list_calls(&self) -> GatewayResult<usize> {
        let state = self.state.read().map_err(lock_failure)?;
        Ok(state.stage_list_calls)
    }

    /// Returns how many task list calls were issued.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn task_list_calls(&self) -> GatewayResult<usize> {
        let state = self.state.read().map_err(lock_failure)?;
        Ok(state.task_list_calls)
    }
}

#[async_trait]
impl BoardGateway for InMemoryBoardGateway {
    async fn list_stages(&self, query: &StageQuery) -> GatewayResult<Vec<Stage>> {
        let mut state = self.state.write().map_err(lock_failure)?;
        state.stage_list_calls += 1;
        if let Some(error) = &state.stage_list_failure {
            return Err(GatewayError::Transport(error.clone()));
        }

        let mut stages: Vec<Stage> = state
            .stages
            .iter()
            .filter(|stage| {
                query.titles.is_empty()
                    || query.titles.iter().any(|title| title == stage.title())
            })
            .cloned()
            .collect();
        sort_stages(&mut stages, query.sort);
        Ok(paginate(stages, query.pagination))
    }

    async fn list_tasks(&self, query: &TaskQuery) -> GatewayResult<Vec<TaskCard>> {
        let mut state = self.state.write().map_err(lock_failure)?;
        state.task_list_calls += 1;
        if let Some(error) = &state.task_list_failure {
            return Err(GatewayError::Transport(error.clone()));
        }

        let mut tasks: Vec<TaskCard> = state.tasks.values().cloned().collect();
        sort_tasks(&mut tasks, query.sort);
        Ok(paginate(tasks, query.pagination))
    }

    async fn update_task_stage(
        &self,
        id: &TaskId,
        stage_id: Option<&StageId>,
    ) -> GatewayResult<TaskCard> {
        let mut state = self.state.write().map_err(lock_failure)?;
        state
            .stage_updates
            .push((id.clone(), stage_id.cloned()));
        if let Some(error) = state.next_update_failure.take() {
            return Err(GatewayError::Transport(error));
        }

        let card = state
            .tasks
            .get_mut(id)
            .ok_or_else(|| GatewayError::TaskNotFound(id.clone()))?;
        card.set_stage(stage_id.cloned());
        Ok(card.clone())
    }

    async fn create_task(&self, draft: &TaskDraft) -> GatewayResult<TaskCard> {
        let mut state = self.state.write().map_err(lock_failure)?;
        state.created += 1;
        let id = TaskId::new(format!("task-{}", state.created))
            .map_err(|err| GatewayError::Transport(TransportError::malformed(err.to_string())))?;
        let card = TaskCard::new(id.clone(), draft.title(), Utc::now())
            .map_err(|err| GatewayError::Transport(TransportError::malformed(err.to_string())))?
            .with_stage(draft.stage_id().cloned())
            .with_users(draft.users().iter().cloned());
        state.tasks.insert(id, card.clone());
        Ok(card)
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> GatewayResult<TaskCard> {
        let mut state = self.state.write().map_err(lock_failure)?;
        let card = state
            .tasks
            .get_mut(id)
            .ok_or_else(|| GatewayError::TaskNotFound(id.clone()))?;
        patch.apply(card);
        Ok(card.clone())
    }

    async fn delete_task(&self, id: &TaskId) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_failure)?;
        state
            .tasks
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| GatewayError::TaskNotFound(id.clone()))
    }
}

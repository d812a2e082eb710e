//! Gateway port for the consumed data and mutation interfaces.

use crate::board::domain::{
    Stage, StageId, TaskCard, TaskDraft, TaskId, TaskPatch, WORKFLOW_STAGE_TITLES,
};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

impl SortOrder {
    /// Returns the wire representation used by the consumed query interface.
    #[must_use]
    pub const fn as_direction(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Sortable stage fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageSortField {
    /// Stage creation time.
    CreatedAt,
    /// Stage title.
    Title,
}

/// Sortable task fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSortField {
    /// Task due date.
    DueDate,
    /// Latest modification time.
    UpdatedAt,
    /// Task title.
    Title,
}

/// A sort instruction over a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sorter<F> {
    /// The field to sort by.
    pub field: F,
    /// The sort direction.
    pub order: SortOrder,
}

/// Pagination behaviour for list queries.
///
/// The board fetches whole collections, so [`Pagination::Off`] is the
/// default everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pagination {
    /// Fetch everything in one result.
    #[default]
    Off,
    /// Fetch one page of the collection.
    Page {
        /// One-based page number.
        number: u32,
        /// Items per page.
        size: u32,
    },
}

/// Filter and ordering for the stage fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageQuery {
    /// Stage titles to include.
    pub titles: Vec<String>,
    /// Sort instruction.
    pub sort: Sorter<StageSortField>,
    /// Pagination behaviour.
    pub pagination: Pagination,
}

impl StageQuery {
    /// The board's stage query: the workflow title allow-list, ascending
    /// creation time, pagination off.
    #[must_use]
    pub fn workflow() -> Self {
        Self {
            titles: WORKFLOW_STAGE_TITLES
                .iter()
                .map(|title| (*title).to_owned())
                .collect(),
            sort: Sorter {
                field: StageSortField::CreatedAt,
                order: SortOrder::Ascending,
            },
            pagination: Pagination::Off,
        }
    }
}

impl Default for StageQuery {
    fn default() -> Self {
        Self::workflow()
    }
}

/// Ordering for the task fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    /// Sort instruction.
    pub sort: Sorter<TaskSortField>,
    /// Pagination behaviour.
    pub pagination: Pagination,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            sort: Sorter {
                field: TaskSortField::DueDate,
                order: SortOrder::Ascending,
            },
            pagination: Pagination::Off,
        }
    }
}

/// Failure talking to the consumed query or mutation interface.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request never produced a response body.
    #[error("network failure: {0}")]
    Network(String),

    /// The response body reported server-side errors.
    #[error("{message} (status {status_code})")]
    Graph {
        /// Concatenated server error messages.
        message: String,
        /// Server-reported status code.
        status_code: String,
    },

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl TransportError {
    /// Creates a network failure.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a server-reported failure.
    #[must_use]
    pub fn graph(message: impl Into<String>, status_code: impl Into<String>) -> Self {
        Self::Graph {
            message: message.into(),
            status_code: status_code.into(),
        }
    }

    /// Creates a decode failure.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Transport-level failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The task does not exist on the server.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}

/// Data and mutation contract the board consumes.
///
/// Implementations wrap the host's query interface; the board treats the
/// transport underneath as a black box.
#[async_trait]
pub trait BoardGateway: Send + Sync {
    /// Lists workflow stages matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the fetch fails.
    async fn list_stages(&self, query: &StageQuery) -> GatewayResult<Vec<Stage>>;

    /// Lists task cards matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the fetch fails.
    async fn list_tasks(&self, query: &TaskQuery) -> GatewayResult<Vec<TaskCard>>;

    /// Reassigns a task card to a stage; `None` clears the assignment.
    ///
    /// Returns the server's updated copy of the card.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TaskNotFound`] when the card does not exist,
    /// or [`GatewayError::Transport`] when the mutation fails.
    async fn update_task_stage(
        &self,
        id: &TaskId,
        stage_id: Option<&StageId>,
    ) -> GatewayResult<TaskCard>;

    /// Creates a task card and returns the server copy.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the mutation fails.
    async fn create_task(&self, draft: &TaskDraft) -> GatewayResult<TaskCard>;

    /// Applies a partial update and returns the server copy.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TaskNotFound`] when the card does not exist,
    /// or [`GatewayError::Transport`] when the mutation fails.
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> GatewayResult<TaskCard>;

    /// Deletes a task card.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TaskNotFound`] when the card does not exist,
    /// or [`GatewayError::Transport`] when the mutation fails.
    async fn delete_task(&self, id: &TaskId) -> GatewayResult<()>;
}

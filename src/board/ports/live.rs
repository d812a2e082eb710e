//! Live-update channel port.
//!
//! The server pushes resource mutations over a subscription channel; the
//! board merges them into its cache without refetching. Events are another
//! serialized input into the single-threaded update loop.

use crate::board::domain::{Stage, StageId, TaskCard, TaskId};
use async_trait::async_trait;

/// Resource collections the live channel reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Task cards.
    Tasks,
    /// Workflow stages.
    Stages,
}

impl ResourceKind {
    /// Returns the resource name used by the consumed channel.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Stages => "taskStages",
        }
    }
}

/// Mutation kinds the live channel reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveAction {
    /// A record was created.
    Created,
    /// A record was updated.
    Updated,
    /// A record was deleted.
    Deleted,
}

/// A pushed resource mutation.
///
/// Create and update events carry the full record; deletes carry the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveEvent {
    /// A task card was created.
    TaskCreated(TaskCard),
    /// A task card was updated.
    TaskUpdated(TaskCard),
    /// A task card was deleted.
    TaskDeleted(TaskId),
    /// A workflow stage was created.
    StageCreated(Stage),
    /// A workflow stage was updated.
    StageUpdated(Stage),
    /// A workflow stage was deleted.
    StageDeleted(StageId),
}

impl LiveEvent {
    /// Returns the resource collection the event belongs to.
    #[must_use]
    pub const fn resource(&self) -> ResourceKind {
        match self {
            Self::TaskCreated(_) | Self::TaskUpdated(_) | Self::TaskDeleted(_) => {
                ResourceKind::Tasks
            }
            Self::StageCreated(_) | Self::StageUpdated(_) | Self::StageDeleted(_) => {
                ResourceKind::Stages
            }
        }
    }

    /// Returns the mutation kind the event reports.
    #[must_use]
    pub const fn action(&self) -> LiveAction {
        match self {
            Self::TaskCreated(_) | Self::StageCreated(_) => LiveAction::Created,
            Self::TaskUpdated(_) | Self::StageUpdated(_) => LiveAction::Updated,
            Self::TaskDeleted(_) | Self::StageDeleted(_) => LiveAction::Deleted,
        }
    }
}

/// A push-based stream of resource mutations.
#[async_trait]
pub trait LiveEventSource: Send {
    /// Waits for the next pushed event; `None` means the stream closed.
    async fn next_event(&mut self) -> Option<LiveEvent>;
}

//! Optimistic stage mutation state machine.
//!
//! Every drag that changes a card's stage creates one [`StageMutation`]. The
//! predicted state is applied to the board cache immediately; the mutation
//! then settles exactly once, committing on server acknowledgement or
//! rolling back on rejection or expiry.

use super::{MutationId, MutationSettledError, StageId, TaskId};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Settlement state of an in-flight optimistic mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationStatus {
    /// Predicted state applied; awaiting server confirmation.
    Pending,
    /// Server acknowledged the change.
    Committed,
    /// Predicted state reverted after rejection or expiry.
    RolledBack,
}

impl MutationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Committed => "committed",
            Self::RolledBack => "rolled_back",
        }
    }

    /// Returns `true` once the mutation can no longer change state.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for MutationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One in-flight optimistic stage reassignment.
///
/// Captures the stage the card held before the drag so a rejection or expiry
/// can restore it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageMutation {
    id: MutationId,
    task_id: TaskId,
    previous: Option<StageId>,
    target: Option<StageId>,
    initiated_at: DateTime<Utc>,
    settled_at: Option<DateTime<Utc>>,
    status: MutationStatus,
}

impl StageMutation {
    /// Records a new pending mutation.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        previous: Option<StageId>,
        target: Option<StageId>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: MutationId::new(),
            task_id,
            previous,
            target,
            initiated_at: clock.utc(),
            settled_at: None,
            status: MutationStatus::Pending,
        }
    }

    /// Returns the mutation identifier.
    #[must_use]
    pub const fn id(&self) -> MutationId {
        self.id
    }

    /// Returns the card being reassigned.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the stage the card held before the drag.
    #[must_use]
    pub const fn previous(&self) -> Option<&StageId> {
        self.previous.as_ref()
    }

    /// Returns the predicted stage.
    #[must_use]
    pub const fn target(&self) -> Option<&StageId> {
        self.target.as_ref()
    }

    /// Returns when the predicted state was applied.
    #[must_use]
    pub const fn initiated_at(&self) -> DateTime<Utc> {
        self.initiated_at
    }

    /// Returns when the mutation settled, if it has.
    #[must_use]
    pub const fn settled_at(&self) -> Option<DateTime<Utc>> {
        self.settled_at
    }

    /// Returns the settlement state.
    #[must_use]
    pub const fn status(&self) -> MutationStatus {
        self.status
    }

    /// Marks the mutation as acknowledged by the server.
    ///
    /// # Errors
    ///
    /// Returns [`MutationSettledError`] when the mutation already settled.
    pub fn commit(&mut self, clock: &impl Clock) -> Result<(), MutationSettledError> {
        self.settle(MutationStatus::Committed, clock)
    }

    /// Reverts the mutation after rejection or expiry.
    ///
    /// # Errors
    ///
    /// Returns [`MutationSettledError`] when the mutation already settled.
    pub fn roll_back(&mut self, clock: &impl Clock) -> Result<(), MutationSettledError> {
        self.settle(MutationStatus::RolledBack, clock)
    }

    /// Returns `true` when the mutation is still pending and was initiated
    /// more than `max_age` before `now`.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.status == MutationStatus::Pending
            && now.signed_duration_since(self.initiated_at) > max_age
    }

    fn settle(
        &mut self,
        next: MutationStatus,
        clock: &impl Clock,
    ) -> Result<(), MutationSettledError> {
        if self.status.is_settled() {
            return Err(MutationSettledError {
                mutation_id: self.id,
                status: self.status,
            });
        }
        self.status = next;
        self.settled_at = Some(clock.utc());
        Ok(())
    }
}

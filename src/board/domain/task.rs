//! Task card aggregate and edit payloads.

use super::{BoardDomainError, StageId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference to a user assigned to a task card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    id: String,
    name: String,
}

impl UserRef {
    /// Creates a user reference.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the user display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A task card on the board.
///
/// A card with no stage id sits in the unassigned pseudo-column. Cards are
/// mutated through the gateway; the cache holds either server copies or a
/// client-predicted stage while an optimistic mutation is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCard {
    id: TaskId,
    title: String,
    stage_id: Option<StageId>,
    due_date: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
    users: Vec<UserRef>,
    description: Option<String>,
}

impl TaskCard {
    /// Creates a task card.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, BoardDomainError> {
        let text = title.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        Ok(Self {
            id,
            title: trimmed.to_owned(),
            stage_id: None,
            due_date: None,
            updated_at,
            users: Vec::new(),
            description: None,
        })
    }

    /// Sets the stage assignment.
    #[must_use]
    pub fn with_stage(mut self, stage_id: Option<StageId>) -> Self {
        self.stage_id = stage_id;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assigned users.
    #[must_use]
    pub fn with_users(mut self, users: impl IntoIterator<Item = UserRef>) -> Self {
        self.users = users.into_iter().collect();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the card title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the assigned stage, if any.
    #[must_use]
    pub const fn stage_id(&self) -> Option<&StageId> {
        self.stage_id.as_ref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the latest server-acknowledged modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the assigned users.
    #[must_use]
    pub fn users(&self) -> &[UserRef] {
        &self.users
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Reassigns the card to a stage, or clears the assignment.
    ///
    /// `updated_at` is left untouched: predicted patches are not server
    /// acknowledgements, and authoritative timestamps arrive with the server
    /// copy that replaces the cached card.
    pub fn set_stage(&mut self, stage_id: Option<StageId>) {
        self.stage_id = stage_id;
    }
}

/// Payload for creating a new task card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    stage_id: Option<StageId>,
    users: Vec<UserRef>,
}

impl TaskDraft {
    /// Creates a draft with the required title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(title: impl Into<String>) -> Result<Self, BoardDomainError> {
        let text = title.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        Ok(Self {
            title: trimmed.to_owned(),
            stage_id: None,
            users: Vec::new(),
        })
    }

    /// Sets the stage the new card starts in.
    #[must_use]
    pub fn with_stage(mut self, stage_id: Option<StageId>) -> Self {
        self.stage_id = stage_id;
        self
    }

    /// Sets the initially assigned users.
    #[must_use]
    pub fn with_users(mut self, users: impl IntoIterator<Item = UserRef>) -> Self {
        self.users = users.into_iter().collect();
        self
    }

    /// Returns the draft title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the stage the new card starts in, if any.
    #[must_use]
    pub const fn stage_id(&self) -> Option<&StageId> {
        self.stage_id.as_ref()
    }

    /// Returns the initially assigned users.
    #[must_use]
    pub fn users(&self) -> &[UserRef] {
        &self.users
    }
}

/// Partial update for an existing task card.
///
/// Every field is optional; the editor service rejects a patch that changes
/// nothing. Stage and due date use a nested option so they can be cleared
/// explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    due_date: Option<Option<DateTime<Utc>>>,
    stage_id: Option<Option<StageId>>,
    users: Option<Vec<UserRef>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets or clears the stage assignment.
    #[must_use]
    pub fn with_stage(mut self, stage_id: Option<StageId>) -> Self {
        self.stage_id = Some(stage_id);
        self
    }

    /// Replaces the assigned users.
    #[must_use]
    pub fn with_users(mut self, users: impl IntoIterator<Item = UserRef>) -> Self {
        self.users = Some(users.into_iter().collect());
        self
    }

    /// Returns the new title, if the patch changes it.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the new description, if the patch changes it.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the new due date, if the patch changes it.
    #[must_use]
    pub const fn due_date(&self) -> Option<Option<DateTime<Utc>>> {
        self.due_date
    }

    /// Returns the new stage assignment, if the patch changes it.
    #[must_use]
    pub const fn stage_id(&self) -> Option<Option<&StageId>> {
        match &self.stage_id {
            None => None,
            Some(inner) => Some(inner.as_ref()),
        }
    }

    /// Returns the replacement user list, if the patch changes it.
    #[must_use]
    pub fn users(&self) -> Option<&[UserRef]> {
        self.users.as_deref()
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.stage_id.is_none()
            && self.users.is_none()
    }

    /// Applies the patch onto a card, field by field.
    pub fn apply(&self, card: &mut TaskCard) {
        if let Some(title) = &self.title {
            card.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            card.description = Some(description.clone());
        }
        if let Some(due_date) = self.due_date {
            card.due_date = due_date;
        }
        if let Some(stage_id) = &self.stage_id {
            card.stage_id.clone_from(stage_id);
        }
        if let Some(users) = &self.users {
            card.users.clone_from(users);
        }
    }
}

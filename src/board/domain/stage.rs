//! Workflow stage definitions backing board columns.

use super::{BoardDomainError, StageId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Titles of the workflow stages the board renders.
///
/// The stage fetch filters on this closed set; stages outside it never reach
/// the grouper.
pub const WORKFLOW_STAGE_TITLES: [&str; 4] = ["TODO", "IN PROGRESS", "IN REVIEW", "DONE"];

/// A named workflow stage backing one board column.
///
/// Stages are immutable once loaded for the session and ordered ascending by
/// creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    id: StageId,
    title: String,
    created_at: DateTime<Utc>,
}

impl Stage {
    /// Creates a stage record.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyStageTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        id: StageId,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, BoardDomainError> {
        let text = title.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyStageTitle);
        }
        Ok(Self {
            id,
            title: trimmed.to_owned(),
            created_at,
        })
    }

    /// Returns the stage identifier.
    #[must_use]
    pub const fn id(&self) -> &StageId {
        &self.id
    }

    /// Returns the stage title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

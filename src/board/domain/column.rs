//! Column grouping: partitioning task cards into board columns.
//!
//! Grouping is a pure derivation. It is recomputed whenever the stage or
//! task collection changes and never touches the collections it reads.

use super::{BoardDomainError, Stage, StageId, TaskCard, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Literal key of the pseudo-column for cards without a stage.
pub const UNASSIGNED_KEY: &str = "unassigned";

/// Number of placeholder columns a skeleton board renders while loading.
pub const SKELETON_COLUMNS: usize = 6;

/// Number of placeholder cards per skeleton column.
pub const SKELETON_CARDS_PER_COLUMN: usize = 4;

/// Identifies a board column: a workflow stage or the unassigned bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKey {
    /// The pseudo-column for cards with no stage.
    Unassigned,
    /// The column backed by a workflow stage.
    Stage(StageId),
}

impl ColumnKey {
    /// Parses a column key from its wire representation.
    ///
    /// The literal [`UNASSIGNED_KEY`] maps to the unassigned column; any
    /// other value must be a valid stage identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidStageId`] when the key is neither
    /// the unassigned literal nor a non-empty stage identifier.
    pub fn parse(value: &str) -> Result<Self, BoardDomainError> {
        if value == UNASSIGNED_KEY {
            return Ok(Self::Unassigned);
        }
        Ok(Self::Stage(StageId::new(value)?))
    }

    /// Returns the persisted stage id this key maps to.
    ///
    /// The unassigned key maps to `None`.
    #[must_use]
    pub const fn stage_id(&self) -> Option<&StageId> {
        match self {
            Self::Unassigned => None,
            Self::Stage(id) => Some(id),
        }
    }
}

impl From<Option<StageId>> for ColumnKey {
    fn from(stage_id: Option<StageId>) -> Self {
        stage_id.map_or(Self::Unassigned, Self::Stage)
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned => f.write_str(UNASSIGNED_KEY),
            Self::Stage(id) => write!(f, "{id}"),
        }
    }
}

/// One rendered column: a stage and the cards assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumn {
    /// The stage backing this column.
    pub stage: Stage,
    /// Cards assigned to the stage, in input order.
    pub tasks: Vec<TaskCard>,
}

/// The derived board model produced by [`group`].
///
/// The union of all buckets partitions the input task collection exactly
/// once: no card appears in zero or two buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedTasks {
    /// Cards with no stage; always rendered first.
    pub unassigned: Vec<TaskCard>,
    /// Stage columns in ascending stage-creation order.
    pub columns: Vec<BoardColumn>,
    /// Cards referencing a stage that is not on the board.
    ///
    /// These render in no column; they are collected here so the data
    /// inconsistency stays observable instead of silently disappearing.
    pub orphaned: Vec<TaskCard>,
}

impl GroupedTasks {
    /// Total number of cards across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.unassigned.len()
            + self.orphaned.len()
            + self.columns.iter().map(|column| column.tasks.len()).sum::<usize>()
    }

    /// Returns `true` when no bucket holds any card.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the column backed by the given stage.
    #[must_use]
    pub fn column(&self, stage_id: &StageId) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.stage.id() == stage_id)
    }

    /// Returns the key of the column holding the given card.
    ///
    /// Orphaned cards are in no column and resolve to `None`.
    #[must_use]
    pub fn locate(&self, task_id: &TaskId) -> Option<ColumnKey> {
        if self.unassigned.iter().any(|task| task.id() == task_id) {
            return Some(ColumnKey::Unassigned);
        }
        self.columns
            .iter()
            .find(|column| column.tasks.iter().any(|task| task.id() == task_id))
            .map(|column| ColumnKey::Stage(column.stage.id().clone()))
    }
}

/// Partitions task cards into the unassigned bucket plus one bucket per
/// stage.
///
/// Column order follows ascending stage creation time (ties broken by stage
/// id) regardless of the input order of `stages`. A card whose stage id
/// matches no loaded stage lands in [`GroupedTasks::orphaned`]. The function
/// is deterministic and side-effect free; empty inputs yield an empty
/// grouping, and bucket contents preserve the input order of `tasks`.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use stageboard::board::domain::{group, Stage, StageId, TaskCard, TaskId};
///
/// # fn demo() -> Result<(), stageboard::board::domain::BoardDomainError> {
/// let now = Utc::now();
/// let todo = Stage::new(StageId::new("1")?, "TODO", now)?;
/// let card = TaskCard::new(TaskId::new("t1")?, "Call the customer", now)?;
///
/// let grouped = group(&[card], &[todo.clone()]);
/// assert_eq!(grouped.unassigned.len(), 1);
/// assert!(grouped.column(todo.id()).is_some());
/// # Ok(())
/// # }
/// # demo().unwrap();
/// ```
#[must_use]
pub fn group(tasks: &[TaskCard], stages: &[Stage]) -> GroupedTasks {
    let mut ordered: Vec<Stage> = stages.to_vec();
    ordered.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });

    let mut buckets: HashMap<StageId, Vec<TaskCard>> = ordered
        .iter()
        .map(|stage| (stage.id().clone(), Vec::new()))
        .collect();
    let mut unassigned = Vec::new();
    let mut orphaned = Vec::new();

    for task in tasks {
        match task.stage_id() {
            None => unassigned.push(task.clone()),
            Some(stage_id) => match buckets.get_mut(stage_id) {
                Some(bucket) => bucket.push(task.clone()),
                None => orphaned.push(task.clone()),
            },
        }
    }

    let columns = ordered
        .into_iter()
        .map(|stage| {
            let assigned = buckets.remove(stage.id()).unwrap_or_default();
            BoardColumn {
                stage,
                tasks: assigned,
            }
        })
        .collect();

    GroupedTasks {
        unassigned,
        columns,
        orphaned,
    }
}

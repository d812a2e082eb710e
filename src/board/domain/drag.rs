//! Drag-end interpretation for stage reassignment.

use super::{ColumnKey, StageId, TaskId};

/// A completed drag gesture over the board.
///
/// `target` is absent when the card was dropped outside every column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEvent {
    task_id: TaskId,
    source: ColumnKey,
    target: Option<ColumnKey>,
}

impl DragEvent {
    /// Creates a drag-end event.
    #[must_use]
    pub const fn new(task_id: TaskId, source: ColumnKey, target: Option<ColumnKey>) -> Self {
        Self {
            task_id,
            source,
            target,
        }
    }

    /// Returns the dragged card's identifier.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the column the card was dragged from.
    #[must_use]
    pub const fn source(&self) -> &ColumnKey {
        &self.source
    }

    /// Returns the column the card was dropped on, if any.
    #[must_use]
    pub const fn target(&self) -> Option<&ColumnKey> {
        self.target.as_ref()
    }
}

/// The stage change a drag resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageAssignment {
    task_id: TaskId,
    stage_id: Option<StageId>,
}

impl StageAssignment {
    /// Returns the card being reassigned.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the stage the card moves to; `None` clears the assignment.
    #[must_use]
    pub const fn stage_id(&self) -> Option<&StageId> {
        self.stage_id.as_ref()
    }
}

/// Interprets a drag-end event.
///
/// Returns `None` when the drop happened outside the board or the card was
/// dropped on the column it came from; no update is issued in either case.
/// The unassigned column resolves to a cleared stage id; any stage column
/// resolves to its own id.
#[must_use]
pub fn resolve(event: &DragEvent) -> Option<StageAssignment> {
    let target = event.target()?;
    if target == event.source() {
        return None;
    }
    Some(StageAssignment {
        task_id: event.task_id().clone(),
        stage_id: target.stage_id().cloned(),
    })
}

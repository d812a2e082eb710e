//! Route builders for the task-creation flow.

use super::{ColumnKey, StageId};

/// Path of the task-creation form for a column.
///
/// The unassigned column routes to the bare form; stage columns carry the
/// stage id as a query parameter so the new card lands in that column.
#[must_use]
pub fn add_card_path(key: &ColumnKey) -> String {
    match key.stage_id() {
        None => "/tasks/new".to_owned(),
        Some(stage_id) => format!("/tasks/new/?stageId={stage_id}"),
    }
}

/// Reads the `stageId` query parameter back into a stage id.
///
/// Missing, empty, and whitespace-only values all mean the new card starts
/// unassigned.
#[must_use]
pub fn stage_id_param(raw: Option<&str>) -> Option<StageId> {
    raw.and_then(|value| StageId::new(value).ok())
}

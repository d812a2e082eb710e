//! Domain model for the Kanban task board.
//!
//! Pure board logic: validated identifiers, stage and task card records, the
//! column grouper, drag resolution, route building, and the optimistic
//! mutation state machine. No infrastructure concern crosses this boundary.

mod column;
mod drag;
mod error;
mod ids;
mod mutation;
mod routes;
mod stage;
mod task;

pub use column::{
    BoardColumn, ColumnKey, GroupedTasks, SKELETON_CARDS_PER_COLUMN, SKELETON_COLUMNS,
    UNASSIGNED_KEY, group,
};
pub use drag::{DragEvent, StageAssignment, resolve};
pub use error::{BoardDomainError, MutationSettledError};
pub use ids::{MutationId, StageId, TaskId};
pub use mutation::{MutationStatus, StageMutation};
pub use routes::{add_card_path, stage_id_param};
pub use stage::{Stage, WORKFLOW_STAGE_TITLES};
pub use task::{TaskCard, TaskDraft, TaskPatch, UserRef};

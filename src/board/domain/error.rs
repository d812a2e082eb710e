//! Error types for board domain validation.

use super::{MutationId, MutationStatus};
use thiserror::Error;

/// Errors returned while constructing domain board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The stage identifier is empty after trimming.
    #[error("invalid stage identifier '{0}', expected a non-empty value")]
    InvalidStageId(String),

    /// The task identifier is empty after trimming.
    #[error("invalid task identifier '{0}', expected a non-empty value")]
    InvalidTaskId(String),

    /// The stage title is empty after trimming.
    #[error("stage title must not be empty")]
    EmptyStageTitle,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The task patch carries no fields to update.
    #[error("task patch must change at least one field")]
    EmptyTaskPatch,
}

/// Error returned when settling an optimistic mutation a second time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("mutation {mutation_id} is already settled as {status}")]
pub struct MutationSettledError {
    /// The mutation that was settled twice.
    pub mutation_id: MutationId,
    /// The settlement state the mutation already reached.
    pub status: MutationStatus,
}

//! Wire models for the consumed GraphQL endpoint.
//!
//! Rows tolerate the endpoint's loose identifier typing: ids arrive as
//! strings or numbers and are normalized to strings before they become
//! domain identifiers.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

use crate::board::domain::{Stage, StageId, TaskCard, TaskId, UserRef};
use crate::board::ports::TransportError;

/// Identifier scalar that arrives as a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    /// String-typed identifier.
    Text(String),
    /// Numeric identifier.
    Number(u64),
}

impl IdValue {
    /// Normalizes the identifier to its string form.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// One stage row in a list result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRow {
    /// Stage identifier.
    pub id: IdValue,
    /// Stage title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<StageRow> for Stage {
    type Error = TransportError;

    fn try_from(row: StageRow) -> Result<Self, Self::Error> {
        let id = StageId::new(row.id.into_string()).map_err(invalid_row)?;
        Self::new(id, row.title, row.created_at).map_err(invalid_row)
    }
}

/// One user reference in a task row.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRow {
    /// User identifier.
    pub id: IdValue,
    /// User display name.
    pub name: String,
}

impl From<UserRow> for UserRef {
    fn from(row: UserRow) -> Self {
        Self::new(row.id.into_string(), row.name)
    }
}

/// One task row in a list or mutation result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    /// Task identifier.
    pub id: IdValue,
    /// Task title.
    pub title: String,
    /// Task description, if any.
    #[serde(default)]
    pub description: Option<String>,
    /// Assigned stage identifier, if any.
    #[serde(default)]
    pub stage_id: Option<IdValue>,
    /// Due date, if any.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Assigned users.
    #[serde(default)]
    pub users: Vec<UserRow>,
}

impl TryFrom<TaskRow> for TaskCard {
    type Error = TransportError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let id = TaskId::new(row.id.into_string()).map_err(invalid_row)?;
        let stage_id = row
            .stage_id
            .map(|value| StageId::new(value.into_string()))
            .transpose()
            .map_err(invalid_row)?;
        let mut card = Self::new(id, row.title, row.updated_at)
            .map_err(invalid_row)?
            .with_stage(stage_id)
            .with_users(row.users.into_iter().map(UserRef::from));
        if let Some(due_date) = row.due_date {
            card = card.with_due_date(due_date);
        }
        if let Some(description) = row.description {
            card = card.with_description(description);
        }
        Ok(card)
    }
}

/// Connection wrapper for list results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// The listed rows.
    pub nodes: Vec<T>,
    /// Total row count reported by the server.
    #[serde(default)]
    pub total_count: Option<u64>,
}

fn invalid_row(err: impl fmt::Display) -> TransportError {
    TransportError::malformed(err.to_string())
}

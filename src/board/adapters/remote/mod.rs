//! Remote adapter for the consumed GraphQL endpoint.
//!
//! Request building, response envelope handling, and wire-model conversion
//! live here; the transport itself stays behind [`GraphTransport`], injected
//! by the host.

mod config;
mod documents;
mod envelope;
mod gateway;
mod models;
mod transport;

pub use config::{DEFAULT_API_BASE, RemoteEndpoints};
pub use documents::{
    CREATE_TASK_MUTATION, DELETE_TASK_MUTATION, TASK_STAGES_QUERY, TASKS_QUERY,
    UPDATE_TASK_MUTATION, UPDATE_TASK_STAGE_MUTATION,
};
pub use envelope::{decode_root, extract_error};
pub use gateway::RemoteBoardGateway;
pub use models::{Connection, IdValue, StageRow, TaskRow, UserRow};
pub use transport::{GraphRequest, GraphTransport};

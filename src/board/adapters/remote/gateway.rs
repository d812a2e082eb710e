//! Remote board gateway over the consumed GraphQL endpoint.

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;

use super::{
    documents, envelope,
    models::{Connection, StageRow, TaskRow},
    transport::{GraphRequest, GraphTransport},
};
use crate::board::{
    domain::{Stage, StageId, TaskCard, TaskDraft, TaskId, TaskPatch, UserRef},
    ports::{
        BoardGateway, GatewayResult, Pagination, Sorter, StageQuery, StageSortField, TaskQuery,
        TaskSortField, TransportError,
    },
};

/// Board gateway speaking the consumed GraphQL dialect.
///
/// Only request building and response decoding happen here; the transport
/// (HTTP client, authentication, retries) is injected by the host. Server
/// rejections surface as transport errors carrying the reported status code.
#[derive(Clone)]
pub struct RemoteBoardGateway<T: GraphTransport> {
    transport: Arc<T>,
}

impl<T: GraphTransport> RemoteBoardGateway<T> {
    /// Creates a gateway over the given transport.
    #[must_use]
    pub const fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    async fn execute(
        &self,
        document: &'static str,
        variables: Value,
    ) -> Result<Value, TransportError> {
        self.transport
            .execute(GraphRequest {
                document,
                variables,
            })
            .await
    }
}

fn paging_value(pagination: Pagination) -> Value {
    match pagination {
        Pagination::Off => json!({}),
        Pagination::Page { number, size } => json!({
            "offset": number.saturating_sub(1).saturating_mul(size),
            "limit": size,
        }),
    }
}

fn stage_sort_value(sort: Sorter<StageSortField>) -> Value {
    let field = match sort.field {
        StageSortField::CreatedAt => "createdAt",
        StageSortField::Title => "title",
    };
    json!([{ "field": field, "direction": sort.order.as_direction() }])
}

fn task_sort_value(sort: Sorter<TaskSortField>) -> Value {
    let field = match sort.field {
        TaskSortField::DueDate => "dueDate",
        TaskSortField::UpdatedAt => "updatedAt",
        TaskSortField::Title => "title",
    };
    json!([{ "field": field, "direction": sort.order.as_direction() }])
}

fn stage_value(stage_id: Option<&StageId>) -> Value {
    stage_id.map_or(Value::Null, |id| Value::String(id.as_str().to_owned()))
}

fn user_ids(users: &[UserRef]) -> Vec<&str> {
    users.iter().map(UserRef::id).collect()
}

#[async_trait]
impl<T: GraphTransport> BoardGateway for RemoteBoardGateway<T> {
    async fn list_stages(&self, query: &StageQuery) -> GatewayResult<Vec<Stage>> {
        let variables = json!({
            "filter": { "title": { "in": query.titles } },
            "sorting": stage_sort_value(query.sort),
            "paging": paging_value(query.pagination),
        });
        let body = self.execute(documents::TASK_STAGES_QUERY, variables).await?;
        let connection: Connection<StageRow> = envelope::decode_root(&body, "taskStages")?;
        let stages = connection
            .nodes
            .into_iter()
            .map(Stage::try_from)
            .collect::<Result<Vec<_>, TransportError>>()?;
        Ok(stages)
    }

    async fn list_tasks(&self, query: &TaskQuery) -> GatewayResult<Vec<TaskCard>> {
        let variables = json!({
            "filter": {},
            "sorting": task_sort_value(query.sort),
            "paging": paging_value(query.pagination),
        });
        let body = self.execute(documents::TASKS_QUERY, variables).await?;
        let connection: Connection<TaskRow> = envelope::decode_root(&body, "tasks")?;
        let tasks = connection
            .nodes
            .into_iter()
            .map(TaskCard::try_from)
            .collect::<Result<Vec<_>, TransportError>>()?;
        Ok(tasks)
    }

    async fn update_task_stage(
        &self,
        id: &TaskId,
        stage_id: Option<&StageId>,
    ) -> GatewayResult<TaskCard> {
        let variables = json!({
            "input": {
                "id": id.as_str(),
                "update": { "stageId": stage_value(stage_id) },
            },
        });
        let body = self
            .execute(documents::UPDATE_TASK_STAGE_MUTATION, variables)
            .await?;
        let row: TaskRow = envelope::decode_root(&body, "updateOneTask")?;
        Ok(TaskCard::try_from(row)?)
    }

    async fn create_task(&self, draft: &TaskDraft) -> GatewayResult<TaskCard> {
        let variables = json!({
            "input": {
                "task": {
                    "title": draft.title(),
                    "stageId": stage_value(draft.stage_id()),
                    "userIds": user_ids(draft.users()),
                },
            },
        });
        let body = self.execute(documents::CREATE_TASK_MUTATION, variables).await?;
        let row: TaskRow = envelope::decode_root(&body, "createOneTask")?;
        Ok(TaskCard::try_from(row)?)
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> GatewayResult<TaskCard> {
        let mut update = Map::new();
        if let Some(title) = patch.title() {
            update.insert("title".to_owned(), Value::String(title.to_owned()));
        }
        if let Some(description) = patch.description() {
            update.insert("description".to_owned(), Value::String(description.to_owned()));
        }
        if let Some(due_date) = patch.due_date() {
            update.insert("dueDate".to_owned(), json!(due_date));
        }
        if let Some(stage_id) = patch.stage_id() {
            update.insert("stageId".to_owned(), stage_value(stage_id));
        }
        if let Some(users) = patch.users() {
            update.insert("userIds".to_owned(), json!(user_ids(users)));
        }

        let variables = json!({
            "input": { "id": id.as_str(), "update": update },
        });
        let body = self.execute(documents::UPDATE_TASK_MUTATION, variables).await?;
        let row: TaskRow = envelope::decode_root(&body, "updateOneTask")?;
        Ok(TaskCard::try_from(row)?)
    }

    async fn delete_task(&self, id: &TaskId) -> GatewayResult<()> {
        let variables = json!({
            "input": { "id": id.as_str() },
        });
        let body = self.execute(documents::DELETE_TASK_MUTATION, variables).await?;
        envelope::decode_root::<Value>(&body, "deleteOneTask")?;
        Ok(())
    }
}

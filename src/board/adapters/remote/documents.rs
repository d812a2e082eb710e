//! GraphQL documents for the board's queries and mutations.
//!
//! The documents pair with the connection-style results the consumed
//! endpoint returns; variables are built by the remote gateway.

/// Lists workflow stages.
pub const TASK_STAGES_QUERY: &str = r"
    query TaskStages($filter: TaskStageFilter!, $sorting: [TaskStageSort!], $paging: OffsetPaging!) {
        taskStages(filter: $filter, sorting: $sorting, paging: $paging) {
            totalCount
            nodes {
                id
                title
                createdAt
            }
        }
    }
";

/// Lists task cards with their stage assignment and users.
pub const TASKS_QUERY: &str = r"
    query Tasks($filter: TaskFilter!, $sorting: [TaskSort!], $paging: OffsetPaging!) {
        tasks(filter: $filter, sorting: $sorting, paging: $paging) {
            totalCount
            nodes {
                id
                title
                description
                dueDate
                stageId
                updatedAt
                users {
                    id
                    name
                }
            }
        }
    }
";

/// Reassigns one task card to a stage.
pub const UPDATE_TASK_STAGE_MUTATION: &str = r"
    mutation UpdateTaskStage($input: UpdateOneTaskInput!) {
        updateOneTask(input: $input) {
            id
            title
            description
            dueDate
            stageId
            updatedAt
            users {
                id
                name
            }
        }
    }
";

/// Creates one task card.
pub const CREATE_TASK_MUTATION: &str = r"
    mutation CreateTask($input: CreateOneTaskInput!) {
        createOneTask(input: $input) {
            id
            title
            description
            dueDate
            stageId
            updatedAt
            users {
                id
                name
            }
        }
    }
";

/// Applies a partial update to one task card.
pub const UPDATE_TASK_MUTATION: &str = r"
    mutation UpdateTask($input: UpdateOneTaskInput!) {
        updateOneTask(input: $input) {
            id
            title
            description
            dueDate
            stageId
            updatedAt
            users {
                id
                name
            }
        }
    }
";

/// Deletes one task card.
pub const DELETE_TASK_MUTATION: &str = r"
    mutation DeleteTask($input: DeleteOneTaskInput!) {
        deleteOneTask(input: $input) {
            id
        }
    }
";

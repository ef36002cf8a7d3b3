/// Task CRUD and statistics endpoints
///
/// Every endpoint here sits behind the bearer-token middleware and operates
/// only on tasks owned by the authenticated user. A task owned by someone
/// else looks exactly like a task that does not exist.
///
/// # Endpoints
///
/// - `GET /tasks?status=&priority=` - List, filtered and newest-first
/// - `GET /tasks/:id` - Fetch one
/// - `POST /tasks` - Create (always starts pending)
/// - `PUT /tasks/:id` - Partial update
/// - `DELETE /tasks/:id` - Hard delete
/// - `GET /tasks/stats/summary` - Aggregate counts

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use taskflow_shared::{
    auth::middleware::AuthContext,
    models::task::{Task, TaskPriority, TaskStats, TaskStatus},
    store::{NewTask, TaskChanges, TaskFilter},
};
use validator::Validate;

/// Query parameters for task listing
///
/// Values are kept as raw strings: an empty value means "no filter", and a
/// value naming no known status/priority simply matches no tasks.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Exact-match status filter
    pub status: Option<String>,

    /// Exact-match priority filter
    pub priority: Option<String>,
}

impl ListTasksQuery {
    fn into_filter(self) -> TaskFilter {
        TaskFilter {
            status: self.status.filter(|s| !s.is_empty()),
            priority: self.priority.filter(|p| !p.is_empty()),
        }
    }
}

/// Create request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Title, required and non-empty
    #[validate(required(message = "Title is required"), length(min = 1, message = "Title is required"))]
    pub title: Option<String>,

    /// Optional description
    pub description: Option<String>,

    /// Optional priority, defaults to medium
    pub priority: Option<String>,
}

/// Update request; at least one field must be supplied
///
/// `description` distinguishes "absent" from "null": omitting it leaves the
/// description alone, sending `null` clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title, non-empty if supplied
    pub title: Option<String>,

    /// New description, `null` to clear
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    /// New status
    pub status: Option<String>,

    /// New priority
    pub priority: Option<String>,
}

/// Keeps the outer `Some` when a field is present but `null`
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Response carrying one task
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// The task
    pub task: Task,
}

/// Response for task listing
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    /// Matching tasks, newest first
    pub tasks: Vec<Task>,

    /// Number of tasks returned
    pub count: usize,
}

/// Response for task deletion
#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    /// Confirmation message
    pub message: String,
}

/// Response for the statistics endpoint
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Aggregate counts over the caller's tasks
    pub stats: TaskStats,
}

fn parse_status(value: &str) -> Result<TaskStatus, ApiError> {
    TaskStatus::parse(value).ok_or_else(|| {
        ApiError::Validation(
            "Invalid status. Must be pending, in_progress, or completed".to_string(),
        )
    })
}

fn parse_priority(value: &str) -> Result<TaskPriority, ApiError> {
    TaskPriority::parse(value).ok_or_else(|| {
        ApiError::Validation("Invalid priority. Must be low, medium, or high".to_string())
    })
}

/// List the caller's tasks
///
/// # Endpoint
///
/// ```text
/// GET /tasks?status=completed&priority=high
/// Authorization: Bearer <token>
/// ```
///
/// Filters compose with AND semantics; the result is sorted most recent
/// first and accompanied by a count.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<TaskListResponse>> {
    let filter = query.into_filter();
    let tasks = state.store.list_tasks(auth.user_id, &filter).await?;
    let count = tasks.len();

    Ok(Json(TaskListResponse { tasks, count }))
}

/// Fetch a single task
///
/// # Errors
///
/// - `404 Not Found`: no task with this ID is owned by the caller
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<u64>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state
        .store
        .find_task(auth.user_id, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(TaskResponse { task }))
}

/// Create a task
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "title": "Buy milk",
///   "description": "2 liters",
///   "priority": "high"
/// }
/// ```
///
/// New tasks always start pending; the payload does not accept a status.
///
/// # Errors
///
/// - `400 Bad Request`: missing/empty title, or an unknown priority
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate()?;

    let priority = match req.priority.as_deref() {
        Some(value) => parse_priority(value)?,
        None => TaskPriority::default(),
    };

    let task = state
        .store
        .create_task(NewTask {
            user_id: auth.user_id,
            title: req.title.unwrap_or_default(),
            description: req.description,
            priority,
        })
        .await?;

    tracing::debug!(user_id = auth.user_id, task_id = task.id, "Created task");

    Ok((StatusCode::CREATED, Json(TaskResponse { task })))
}

/// Partially update a task
///
/// Only supplied fields change; the updated timestamp always refreshes.
/// The ownership check runs first, so a foreign task reads as missing
/// rather than revealing anything about its contents.
///
/// # Errors
///
/// - `404 Not Found`: no task with this ID is owned by the caller
/// - `400 Bad Request`: unknown status/priority, empty title, or an empty
///   field set
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<u64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    state
        .store
        .find_task(auth.user_id, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let status = match req.status.as_deref() {
        Some(value) => Some(parse_status(value)?),
        None => None,
    };
    let priority = match req.priority.as_deref() {
        Some(value) => Some(parse_priority(value)?),
        None => None,
    };
    if let Some(title) = req.title.as_deref() {
        if title.is_empty() {
            return Err(ApiError::Validation("Title must not be empty".to_string()));
        }
    }

    let changes = TaskChanges {
        title: req.title,
        description: req.description,
        status,
        priority,
    };

    if changes.is_empty() {
        return Err(ApiError::Validation("No fields to update".to_string()));
    }

    let task = state
        .store
        .update_task(auth.user_id, task_id, changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(TaskResponse { task }))
}

/// Delete a task
///
/// # Errors
///
/// - `404 Not Found`: no task with this ID is owned by the caller
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<u64>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    let deleted = state.store.delete_task(auth.user_id, task_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    tracing::debug!(user_id = auth.user_id, task_id, "Deleted task");

    Ok(Json(DeleteTaskResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

/// Aggregate statistics over the caller's tasks
///
/// # Endpoint
///
/// ```text
/// GET /tasks/stats/summary
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// ```json
/// {
///   "stats": {
///     "total": 4,
///     "pending": 1,
///     "in_progress": 1,
///     "completed": 2,
///     "high_priority": 1
///   }
/// }
/// ```
pub async fn task_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<StatsResponse>> {
    let stats = state.store.task_stats(auth.user_id).await?;

    Ok(Json(StatsResponse { stats }))
}

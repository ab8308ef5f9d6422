//! Task handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use taskhub_core::types::{PageResponse, ProjectId, TaskId};
use taskhub_entity::task::{Task, TaskView};

use crate::dto::request::{
    CreateTaskRequest, TaskListParams, UpdateTaskRequest, UpdateTaskStatusRequest,
};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PathId, QueryParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/projects/{project_id}/tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(project_id): PathId<ProjectId>,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ApiError> {
    let task = state
        .services
        .tasks
        .create(&auth, project_id, req.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(task, "Task created successfully")),
    ))
}

/// GET /api/projects/{project_id}/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(project_id): PathId<ProjectId>,
    QueryParams(params): QueryParams<TaskListParams>,
) -> Result<Json<ApiResponse<PageResponse<TaskView>>>, ApiError> {
    let (query, page) = params.split();
    let result = state
        .services
        .tasks
        .list(&auth, project_id, query, page)
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// PATCH /api/tasks/{task_id}/status
pub async fn update_task_status(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId<TaskId>,
    ValidatedJson(req): ValidatedJson<UpdateTaskStatusRequest>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = state
        .services
        .tasks
        .update_status(&auth, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        task,
        "Task status updated successfully",
    )))
}

/// PUT /api/tasks/{task_id}
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId<TaskId>,
    ValidatedJson(req): ValidatedJson<UpdateTaskRequest>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = state.services.tasks.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok_with_message(task, "Task updated successfully")))
}

/// DELETE /api/tasks/{task_id}
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId<TaskId>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.services.tasks.delete(&auth, id).await?;
    Ok(Json(ApiResponse::message("Task deleted successfully")))
}

//! Project handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use taskhub_core::types::{PageResponse, ProjectId};
use taskhub_entity::project::{Project, ProjectDetail, ProjectSummary};

use crate::dto::request::{CreateProjectRequest, ProjectListParams, UpdateProjectRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PathId, QueryParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Project>>), ApiError> {
    let project = state.services.projects.create(&auth, req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            project,
            "Project created successfully",
        )),
    ))
}

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(params): QueryParams<ProjectListParams>,
) -> Result<Json<ApiResponse<PageResponse<ProjectSummary>>>, ApiError> {
    let (query, page) = params.split();
    let result = state.services.projects.list(&auth, query, page).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/projects/{project_id}
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId<ProjectId>,
) -> Result<Json<ApiResponse<ProjectDetail>>, ApiError> {
    let detail = state.services.projects.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// PUT /api/projects/{project_id}
pub async fn update_project(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId<ProjectId>,
    ValidatedJson(req): ValidatedJson<UpdateProjectRequest>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state.services.projects.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok_with_message(
        project,
        "Project updated successfully",
    )))
}

/// DELETE /api/projects/{project_id}
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId<ProjectId>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.services.projects.delete(&auth, id).await?;
    Ok(Json(ApiResponse::message("Project deleted successfully")))
}

//! Tenant member handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use taskhub_core::types::{PageResponse, TenantId, UserId};
use taskhub_entity::user::User;

use crate::dto::request::{AddUserRequest, UpdateUserRequest, UserListParams};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PathId, QueryParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/tenants/{tenant_id}/users
pub async fn add_user(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(tenant_id): PathId<TenantId>,
    ValidatedJson(req): ValidatedJson<AddUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let user = state
        .services
        .users
        .add(&auth, tenant_id, req.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(user, "User added successfully")),
    ))
}

/// GET /api/tenants/{tenant_id}/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(tenant_id): PathId<TenantId>,
    QueryParams(params): QueryParams<UserListParams>,
) -> Result<Json<ApiResponse<PageResponse<User>>>, ApiError> {
    let (query, page) = params.split();
    let result = state
        .services
        .users
        .list(&auth, tenant_id, query, page)
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// PUT /api/users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId<UserId>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.services.users.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok_with_message(user, "User updated successfully")))
}

/// DELETE /api/users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId<UserId>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.services.users.delete(&auth, id).await?;
    Ok(Json(ApiResponse::message("User deleted successfully")))
}

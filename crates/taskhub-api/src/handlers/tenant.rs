//! Tenant handlers.

use axum::Json;
use axum::extract::State;

use taskhub_core::types::{PageResponse, TenantId};
use taskhub_database::repositories::TenantFilter;
use taskhub_entity::tenant::{Tenant, TenantDetail, TenantSummary};

use crate::dto::request::{TenantListParams, UpdateTenantRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PathId, QueryParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/tenants
pub async fn list_tenants(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(params): QueryParams<TenantListParams>,
) -> Result<Json<ApiResponse<PageResponse<TenantSummary>>>, ApiError> {
    let page = params.page_request();
    let filter = TenantFilter {
        search: params.search,
    };
    let result = state.services.tenants.list(&auth, filter, page).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/tenants/{tenant_id}
pub async fn get_tenant(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId<TenantId>,
) -> Result<Json<ApiResponse<TenantDetail>>, ApiError> {
    let detail = state.services.tenants.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// PUT /api/tenants/{tenant_id}
pub async fn update_tenant(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId<TenantId>,
    ValidatedJson(req): ValidatedJson<UpdateTenantRequest>,
) -> Result<Json<ApiResponse<Tenant>>, ApiError> {
    let tenant = state.services.tenants.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok_with_message(
        tenant,
        "Tenant updated successfully",
    )))
}

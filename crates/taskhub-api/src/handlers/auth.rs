//! Auth handlers: tenant registration, login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use taskhub_entity::user::User;

use crate::dto::request::{LoginRequest, RegisterTenantRequest};
use crate::dto::response::{ApiResponse, LoginResponse, RegisterTenantResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ClientIp, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register-tenant
pub async fn register_tenant(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    ValidatedJson(req): ValidatedJson<RegisterTenantRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterTenantResponse>>), ApiError> {
    let (tenant, user) = state
        .services
        .auth
        .register_tenant(req.into(), ip)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            RegisterTenantResponse { tenant, user },
            "Tenant registered successfully",
        )),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let outcome = state.services.auth.authenticate(req.into()).await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        token: outcome.token.token,
        expires_at: outcome.token.expires_at,
        user: outcome.user,
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.services.auth.me(&auth).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout(_auth: AuthUser) -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Logged out successfully"))
}

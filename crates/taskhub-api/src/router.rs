//! Route definitions for the TaskHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with every route, bound to `state`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(tenant_routes())
        .merge(user_routes())
        .merge(project_routes())
        .merge(task_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register-tenant", post(handlers::auth::register_tenant))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/logout", post(handlers::auth::logout))
}

fn tenant_routes() -> Router<AppState> {
    Router::new()
        .route("/tenants", get(handlers::tenant::list_tenants))
        .route(
            "/tenants/{tenant_id}",
            get(handlers::tenant::get_tenant).put(handlers::tenant::update_tenant),
        )
        .route(
            "/tenants/{tenant_id}/users",
            post(handlers::user::add_user).get(handlers::user::list_users),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/users/{user_id}",
        put(handlers::user::update_user).delete(handlers::user::delete_user),
    )
}

fn project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            post(handlers::project::create_project).get(handlers::project::list_projects),
        )
        .route(
            "/projects/{project_id}",
            get(handlers::project::get_project)
                .put(handlers::project::update_project)
                .delete(handlers::project::delete_project),
        )
        .route(
            "/projects/{project_id}/tasks",
            post(handlers::task::create_task).get(handlers::task::list_tasks),
        )
}

fn task_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tasks/{task_id}/status",
            patch(handlers::task::update_task_status),
        )
        .route(
            "/tasks/{task_id}",
            put(handlers::task::update_task).delete(handlers::task::delete_task),
        )
}

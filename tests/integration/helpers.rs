//! Shared test helpers for integration tests.
//!
//! Every `TestApp` runs the full router over its own in-memory store, so
//! tests need no database and do not interfere with each other.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use taskhub_api::{AppState, build_app};
use taskhub_core::config::AppConfig;
use taskhub_database::repositories::AuditLogRepository;
use taskhub_database::{MemoryStore, Repositories};

pub const PASSWORD: &str = "password123";
pub const SUPER_ADMIN_EMAIL: &str = "superadmin@system.com";
pub const SUPER_ADMIN_PASSWORD: &str = "super-secret-1";

/// Test application context
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: MemoryStore,
}

/// A registered tenant and a token for its first admin.
pub struct Tenant {
    pub id: String,
    pub subdomain: String,
    pub admin_id: String,
    pub admin_token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let config: AppConfig = serde_json::from_value(json!({
            "database": { "backend": "memory", "url": "memory://" },
            "auth": { "jwt_secret": "integration-test-secret" }
        }))
        .expect("Failed to build test config");

        let store = MemoryStore::new();
        let state = AppState::new(config, &Repositories::in_memory(store.clone()));
        state
            .services
            .auth
            .ensure_super_admin(SUPER_ADMIN_PASSWORD)
            .await
            .expect("Failed to create super-admin");

        Self {
            router: build_app(state.clone()),
            state,
            store,
        }
    }

    /// Send a request through the router
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.send(build_request(method, path, body, token)).await
    }

    /// Send a request as a direct client connected from `peer`
    pub async fn request_from(
        &self,
        peer: SocketAddr,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = build_request(method, path, body, token);
        req.extensions_mut().insert(ConnectInfo(peer));
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Client addresses recorded in the audit log for one entity
    pub async fn audit_ips(&self, entity_id: &str) -> Vec<Option<String>> {
        let id: Uuid = entity_id.parse().expect("Invalid entity id");
        AuditLogRepository::find_by_entity(&self.store, id)
            .await
            .expect("Failed to read audit log")
            .into_iter()
            .map(|entry| entry.ip_address)
            .collect()
    }

    /// Register a tenant and log its admin in.
    pub async fn register_tenant(&self, name: &str, subdomain: &str, plan: &str) -> Tenant {
        let response = self
            .request(
                "POST",
                "/api/auth/register-tenant",
                Some(json!({
                    "tenantName": name,
                    "subdomain": subdomain,
                    "subscriptionPlan": plan,
                    "adminEmail": format!("admin@{subdomain}.test"),
                    "adminPassword": PASSWORD,
                    "adminFullName": format!("{name} Admin"),
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

        let admin_token = self
            .login(&format!("admin@{subdomain}.test"), PASSWORD, Some(subdomain))
            .await;

        Tenant {
            id: response.data()["tenant"]["id"].as_str().unwrap().to_string(),
            subdomain: subdomain.to_string(),
            admin_id: response.data()["user"]["id"].as_str().unwrap().to_string(),
            admin_token,
        }
    }

    /// Log in and return the bearer token
    pub async fn login(&self, email: &str, password: &str, subdomain: Option<&str>) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({
                    "email": email,
                    "password": password,
                    "tenantSubdomain": subdomain,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.data()["token"].as_str().unwrap().to_string()
    }

    pub async fn super_admin_token(&self) -> String {
        self.login(SUPER_ADMIN_EMAIL, SUPER_ADMIN_PASSWORD, None).await
    }

    /// Add a member as the tenant admin; returns (user id, token).
    pub async fn add_member(&self, tenant: &Tenant, name: &str) -> (String, String) {
        let email = format!("{name}@{}.test", tenant.subdomain);
        let response = self
            .request(
                "POST",
                &format!("/api/tenants/{}/users", tenant.id),
                Some(json!({
                    "email": email,
                    "password": PASSWORD,
                    "fullName": name,
                })),
                Some(&tenant.admin_token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        let id = response.data()["id"].as_str().unwrap().to_string();
        let token = self.login(&email, PASSWORD, Some(&tenant.subdomain)).await;
        (id, token)
    }

    pub async fn create_project(&self, token: &str, name: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/projects",
                Some(json!({ "name": name, "description": format!("{name} description") })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.data()["id"].as_str().unwrap().to_string()
    }

    pub async fn create_task(&self, token: &str, project_id: &str, body: Value) -> String {
        let response = self
            .request(
                "POST",
                &format!("/api/projects/{project_id}/tasks"),
                Some(body),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.data()["id"].as_str().unwrap().to_string()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

fn build_request(method: &str, path: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let body_str = body
        .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
        .unwrap_or_default();

    let mut req = Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/json");

    if let Some(token) = token {
        req = req.header("Authorization", format!("Bearer {token}"));
    }

    req.body(Body::from(body_str))
        .expect("Failed to build request")
}

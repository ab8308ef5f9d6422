//! Integration tests for registration and the authentication flow.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, SUPER_ADMIN_EMAIL, SUPER_ADMIN_PASSWORD, TestApp};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["database"], "connected");
}

#[tokio::test]
async fn test_register_tenant_creates_admin() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/auth/register-tenant",
            Some(json!({
                "tenantName": "Acme",
                "subdomain": "acme",
                "subscriptionPlan": "free",
                "adminEmail": "admin@acme.test",
                "adminPassword": PASSWORD,
                "adminFullName": "Acme Admin",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    let data = response.data();
    assert_eq!(data["tenant"]["subdomain"], "acme");
    assert_eq!(data["tenant"]["maxUsers"], 5);
    assert_eq!(data["tenant"]["maxProjects"], 3);
    assert_eq!(data["user"]["role"], "tenant_admin");
    assert_eq!(data["user"]["tenantId"], data["tenant"]["id"]);
    assert!(data["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_rejects_duplicate_subdomain_and_bad_input() {
    let app = TestApp::new().await;
    app.register_tenant("Acme", "acme", "free").await;

    let duplicate = app
        .request(
            "POST",
            "/api/auth/register-tenant",
            Some(json!({
                "tenantName": "Acme Two",
                "subdomain": "acme",
                "adminEmail": "other@acme.test",
                "adminPassword": PASSWORD,
                "adminFullName": "Other",
            })),
            None,
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["success"], false);

    let invalid = app
        .request(
            "POST",
            "/api/auth/register-tenant",
            Some(json!({
                "tenantName": "",
                "subdomain": "globex",
                "adminEmail": "nope",
                "adminPassword": PASSWORD,
                "adminFullName": "G",
            })),
            None,
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert!(invalid.body["errors"].is_object());
}

#[tokio::test]
async fn test_login_and_me() {
    let app = TestApp::new().await;
    let tenant = app.register_tenant("Acme", "acme", "free").await;

    let me = app
        .request("GET", "/api/auth/me", None, Some(&tenant.admin_token))
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["email"], "admin@acme.test");
    assert_eq!(me.data()["id"], tenant.admin_id.as_str());
}

#[tokio::test]
async fn test_login_failures_are_generic() {
    let app = TestApp::new().await;
    app.register_tenant("Acme", "acme", "free").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "email": "admin@acme.test",
                "password": "wrong-password",
                "tenantSubdomain": "acme",
            })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "email": "nobody@acme.test",
                "password": PASSWORD,
                "tenantSubdomain": "acme",
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.message(), unknown_user.message());

    let unknown_tenant = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "email": "admin@acme.test",
                "password": PASSWORD,
                "tenantSubdomain": "nowhere",
            })),
            None,
        )
        .await;
    assert_eq!(unknown_tenant.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_super_admin_login_ignores_subdomain() {
    let app = TestApp::new().await;
    app.register_tenant("Acme", "acme", "free").await;

    let token = app
        .login(SUPER_ADMIN_EMAIL, SUPER_ADMIN_PASSWORD, Some("acme"))
        .await;
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["role"], "super_admin");
    assert!(me.data()["tenantId"].is_null());
}

#[tokio::test]
async fn test_bad_tokens_are_unauthorized() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.body["success"], false);
}

#[tokio::test]
async fn test_logout_acknowledges() {
    let app = TestApp::new().await;
    let tenant = app.register_tenant("Acme", "acme", "free").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&tenant.admin_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
}

#[tokio::test]
async fn test_direct_client_address_is_audited() {
    let app = TestApp::new().await;
    let peer = "198.51.100.4:52100".parse().unwrap();

    let registered = app
        .request_from(
            peer,
            "POST",
            "/api/auth/register-tenant",
            Some(json!({
                "tenantName": "Acme",
                "subdomain": "acme",
                "adminEmail": "admin@acme.test",
                "adminPassword": PASSWORD,
                "adminFullName": "Acme Admin",
            })),
            None,
        )
        .await;
    assert_eq!(registered.status, StatusCode::CREATED);
    let tenant_id = registered.data()["tenant"]["id"].as_str().unwrap();
    assert_eq!(app.audit_ips(tenant_id).await, vec![Some("198.51.100.4".to_string())]);

    let token = app.login("admin@acme.test", PASSWORD, Some("acme")).await;
    let created = app
        .request_from(
            peer,
            "POST",
            "/api/projects",
            Some(json!({ "name": "Apollo" })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let project_id = created.data()["id"].as_str().unwrap();
    assert_eq!(app.audit_ips(project_id).await, vec![Some("198.51.100.4".to_string())]);
}

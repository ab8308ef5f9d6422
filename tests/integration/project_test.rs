//! Integration tests for projects.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_project_lifecycle() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "free").await;
    let token = acme.admin_token.as_str();

    let id = app.create_project(token, "Website").await;

    let fetched = app
        .request("GET", &format!("/api/projects/{id}"), None, Some(token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.data()["name"], "Website");
    assert_eq!(fetched.data()["description"], "Website description");
    assert_eq!(fetched.data()["status"], "active");
    assert_eq!(fetched.data()["tenantId"], acme.id.as_str());
    assert_eq!(fetched.data()["tasks"], json!([]));

    let listed = app.request("GET", "/api/projects", None, Some(token)).await;
    assert_eq!(listed.data()["totalItems"], 1);
    assert_eq!(listed.data()["items"][0]["id"], id.as_str());
    assert_eq!(listed.data()["items"][0]["taskCount"], 0);

    let updated = app
        .request(
            "PUT",
            &format!("/api/projects/{id}"),
            Some(json!({ "status": "completed" })),
            Some(token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["status"], "completed");
    assert_eq!(updated.data()["name"], "Website");

    let deleted = app
        .request("DELETE", &format!("/api/projects/{id}"), None, Some(token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let listed = app.request("GET", "/api/projects", None, Some(token)).await;
    assert_eq!(listed.data()["totalItems"], 0);

    let missing = app
        .request("GET", &format!("/api/projects/{id}"), None, Some(token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_project_quota_and_super_admin_target() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "free").await;
    for name in ["a", "b", "c"] {
        app.create_project(&acme.admin_token, name).await;
    }

    let over = app
        .request(
            "POST",
            "/api/projects",
            Some(json!({ "name": "d" })),
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(over.status, StatusCode::FORBIDDEN);

    let super_admin = app.super_admin_token().await;
    let no_target = app
        .request(
            "POST",
            "/api/projects",
            Some(json!({ "name": "d" })),
            Some(&super_admin),
        )
        .await;
    assert_eq!(no_target.status, StatusCode::BAD_REQUEST);

    let created = app
        .request(
            "POST",
            "/api/projects",
            Some(json!({ "name": "d", "targetTenantId": acme.id })),
            Some(&super_admin),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["tenantId"], acme.id.as_str());

    let all = app
        .request("GET", "/api/projects?limit=100", None, Some(&super_admin))
        .await;
    assert_eq!(all.data()["totalItems"], 4);
}

#[tokio::test]
async fn test_only_creator_or_admin_edits_project() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "pro").await;
    let (_, ann) = app.add_member(&acme, "ann").await;
    let (_, bob) = app.add_member(&acme, "bob").await;
    let id = app.create_project(&ann, "Ann's").await;

    let by_bob = app
        .request(
            "PUT",
            &format!("/api/projects/{id}"),
            Some(json!({ "name": "Bob's" })),
            Some(&bob),
        )
        .await;
    assert_eq!(by_bob.status, StatusCode::FORBIDDEN);

    let bob_reads = app
        .request("GET", &format!("/api/projects/{id}"), None, Some(&bob))
        .await;
    assert_eq!(bob_reads.status, StatusCode::OK);

    let by_admin = app
        .request(
            "DELETE",
            &format!("/api/projects/{id}"),
            None,
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(by_admin.status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_ids_are_bad_requests() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "free").await;

    for path in [
        "/api/projects/not-a-uuid",
        "/api/tenants/123",
        "/api/projects/xyz/tasks",
    ] {
        let response = app
            .request("GET", path, None, Some(&acme.admin_token))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(response.body["success"], false);
    }
}

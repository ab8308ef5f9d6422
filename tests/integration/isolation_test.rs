//! Cross-tenant isolation: resources of another tenant look absent.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_foreign_resources_are_not_found() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "pro").await;
    let globex = app.register_tenant("Globex", "globex", "pro").await;
    let (acme_user, _) = app.add_member(&acme, "ann").await;

    let project = app.create_project(&acme.admin_token, "Secret").await;
    let task = app
        .create_task(&acme.admin_token, &project, json!({ "title": "hidden" }))
        .await;
    let outsider = globex.admin_token.as_str();

    let probes = [
        ("GET", format!("/api/tenants/{}", acme.id), None),
        ("PUT", format!("/api/tenants/{}", acme.id), Some(json!({ "name": "Mine" }))),
        ("GET", format!("/api/tenants/{}/users", acme.id), None),
        ("PUT", format!("/api/users/{acme_user}"), Some(json!({ "fullName": "x" }))),
        ("DELETE", format!("/api/users/{acme_user}"), None),
        ("GET", format!("/api/projects/{project}"), None),
        ("PUT", format!("/api/projects/{project}"), Some(json!({ "name": "x" }))),
        ("DELETE", format!("/api/projects/{project}"), None),
        ("GET", format!("/api/projects/{project}/tasks"), None),
        (
            "POST",
            format!("/api/projects/{project}/tasks"),
            Some(json!({ "title": "x" })),
        ),
        (
            "PATCH",
            format!("/api/tasks/{task}/status"),
            Some(json!({ "status": "completed" })),
        ),
        ("PUT", format!("/api/tasks/{task}"), Some(json!({ "title": "x" }))),
        ("DELETE", format!("/api/tasks/{task}"), None),
    ];

    for (method, path, body) in probes {
        let response = app.request(method, &path, body, Some(outsider)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{method} {path}");
    }

    let still_there = app
        .request(
            "GET",
            &format!("/api/projects/{project}"),
            None,
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(still_there.status, StatusCode::OK);
    assert_eq!(still_there.data()["tasks"][0]["status"], "todo");
}

#[tokio::test]
async fn test_project_list_ignores_foreign_tenant_filter() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "pro").await;
    let globex = app.register_tenant("Globex", "globex", "pro").await;
    app.create_project(&acme.admin_token, "Acme only").await;

    let response = app
        .request(
            "GET",
            &format!("/api/projects?tenantId={}", acme.id),
            None,
            Some(&globex.admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["totalItems"], 0);
}

#[tokio::test]
async fn test_super_admin_sees_every_tenant() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "pro").await;
    let project = app.create_project(&acme.admin_token, "Acme work").await;
    let super_admin = app.super_admin_token().await;

    let detail = app
        .request(
            "GET",
            &format!("/api/projects/{project}"),
            None,
            Some(&super_admin),
        )
        .await;
    assert_eq!(detail.status, StatusCode::OK);

    let tenant = app
        .request(
            "GET",
            &format!("/api/tenants/{}", acme.id),
            None,
            Some(&super_admin),
        )
        .await;
    assert_eq!(tenant.status, StatusCode::OK);
    assert_eq!(tenant.data()["stats"]["totalProjects"], 1);
}

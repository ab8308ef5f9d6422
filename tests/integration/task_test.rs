//! Integration tests for tasks.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_task_defaults_and_ordering() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "pro").await;
    let token = acme.admin_token.as_str();
    let project = app.create_project(token, "Launch").await;

    app.create_task(token, &project, json!({ "title": "plain" }))
        .await;
    app.create_task(
        token,
        &project,
        json!({ "title": "urgent-late", "priority": "high", "dueDate": "2030-02-01" }),
    )
    .await;
    app.create_task(
        token,
        &project,
        json!({ "title": "urgent-soon", "priority": "high", "dueDate": "2030-01-01" }),
    )
    .await;
    app.create_task(token, &project, json!({ "title": "later", "priority": "low" }))
        .await;

    let list = app
        .request(
            "GET",
            &format!("/api/projects/{project}/tasks"),
            None,
            Some(token),
        )
        .await;
    assert_eq!(list.status, StatusCode::OK);
    let titles: Vec<&str> = list.data()["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["urgent-soon", "urgent-late", "plain", "later"]);

    let plain = &list.data()["items"][2];
    assert_eq!(plain["priority"], "medium");
    assert_eq!(plain["status"], "todo");

    let filtered = app
        .request(
            "GET",
            &format!("/api/projects/{project}/tasks?priority=high&search=SOON"),
            None,
            Some(token),
        )
        .await;
    assert_eq!(filtered.data()["totalItems"], 1);
}

#[tokio::test]
async fn test_status_patch_is_member_level_and_idempotent() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "pro").await;
    let (_, member) = app.add_member(&acme, "ann").await;
    let project = app.create_project(&acme.admin_token, "Launch").await;
    let task = app
        .create_task(&acme.admin_token, &project, json!({ "title": "ship" }))
        .await;

    for _ in 0..2 {
        let response = app
            .request(
                "PATCH",
                &format!("/api/tasks/{task}/status"),
                Some(json!({ "status": "in_progress" })),
                Some(&member),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.data()["status"], "in_progress");
    }

    let full_update = app
        .request(
            "PUT",
            &format!("/api/tasks/{task}"),
            Some(json!({ "title": "renamed" })),
            Some(&member),
        )
        .await;
    assert_eq!(full_update.status, StatusCode::FORBIDDEN);

    let bad_status = app
        .request(
            "PATCH",
            &format!("/api/tasks/{task}/status"),
            Some(json!({ "status": "done" })),
            Some(&member),
        )
        .await;
    assert_eq!(bad_status.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_assignment_rules() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "pro").await;
    let globex = app.register_tenant("Globex", "globex", "pro").await;
    let (ann_id, _) = app.add_member(&acme, "ann").await;
    let project = app.create_project(&acme.admin_token, "Launch").await;

    let foreign = app
        .request(
            "POST",
            &format!("/api/projects/{project}/tasks"),
            Some(json!({ "title": "x", "assignedTo": globex.admin_id })),
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::BAD_REQUEST);

    let task = app
        .create_task(
            &acme.admin_token,
            &project,
            json!({ "title": "x", "assignedTo": ann_id }),
        )
        .await;

    let detail = app
        .request(
            "GET",
            &format!("/api/projects/{project}"),
            None,
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(detail.data()["tasks"][0]["assignee"]["fullName"], "ann");

    let cleared = app
        .request(
            "PUT",
            &format!("/api/tasks/{task}"),
            Some(json!({ "assignedTo": null, "priority": "high" })),
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.data()["assignedTo"].is_null());
    assert_eq!(cleared.data()["priority"], "high");

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/tasks/{task}"),
            None,
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
}

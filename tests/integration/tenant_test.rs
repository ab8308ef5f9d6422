//! Integration tests for tenants and tenant members.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_free_plan_user_cap_counts_admin() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "free").await;

    for name in ["u1", "u2", "u3", "u4"] {
        app.add_member(&acme, name).await;
    }

    let over = app
        .request(
            "POST",
            &format!("/api/tenants/{}/users", acme.id),
            Some(json!({
                "email": "u5@acme.test",
                "password": PASSWORD,
                "fullName": "u5",
            })),
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(over.status, StatusCode::FORBIDDEN);
    assert_eq!(over.body["success"], false);

    let super_admin = app.super_admin_token().await;
    let bypass = app
        .request(
            "POST",
            &format!("/api/tenants/{}/users", acme.id),
            Some(json!({
                "email": "u5@acme.test",
                "password": PASSWORD,
                "fullName": "u5",
            })),
            Some(&super_admin),
        )
        .await;
    assert_eq!(bypass.status, StatusCode::CREATED);

    let list = app
        .request(
            "GET",
            &format!("/api/tenants/{}/users?limit=2&page=3", acme.id),
            None,
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.data()["totalItems"], 6);
    assert_eq!(list.data()["totalPages"], 3);
    assert_eq!(list.data()["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_tenant_detail_and_rename() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "pro").await;

    let detail = app
        .request(
            "GET",
            &format!("/api/tenants/{}", acme.id),
            None,
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.data()["name"], "Acme");
    assert_eq!(detail.data()["stats"]["totalUsers"], 1);

    let renamed = app
        .request(
            "PUT",
            &format!("/api/tenants/{}", acme.id),
            Some(json!({ "name": "Acme Corp" })),
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.data()["name"], "Acme Corp");

    let plan_change = app
        .request(
            "PUT",
            &format!("/api/tenants/{}", acme.id),
            Some(json!({ "subscriptionPlan": "enterprise" })),
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(plan_change.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_tenant_list_is_super_admin_only() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "free").await;
    app.register_tenant("Globex", "globex", "pro").await;

    let denied = app
        .request("GET", "/api/tenants", None, Some(&acme.admin_token))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let super_admin = app.super_admin_token().await;
    let all = app
        .request("GET", "/api/tenants", None, Some(&super_admin))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.data()["totalItems"], 2);

    let searched = app
        .request("GET", "/api/tenants?search=GLOB", None, Some(&super_admin))
        .await;
    assert_eq!(searched.data()["totalItems"], 1);
    assert_eq!(searched.data()["items"][0]["subdomain"], "globex");
}

#[tokio::test]
async fn test_tenant_list_far_past_the_last_page() {
    let app = TestApp::new().await;
    app.register_tenant("Acme", "acme", "free").await;
    let super_admin = app.super_admin_token().await;

    let res = app
        .request(
            "GET",
            "/api/tenants?page=18446744073709551615&limit=100",
            None,
            Some(&super_admin),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(res.data()["totalItems"], 1);
}

#[tokio::test]
async fn test_member_updates_and_deletion() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "pro").await;
    let (ann_id, ann_token) = app.add_member(&acme, "ann").await;

    let own_name = app
        .request(
            "PUT",
            &format!("/api/users/{ann_id}"),
            Some(json!({ "fullName": "Ann Lee" })),
            Some(&ann_token),
        )
        .await;
    assert_eq!(own_name.status, StatusCode::OK);
    assert_eq!(own_name.data()["fullName"], "Ann Lee");

    let self_promote = app
        .request(
            "PUT",
            &format!("/api/users/{ann_id}"),
            Some(json!({ "role": "tenant_admin" })),
            Some(&ann_token),
        )
        .await;
    assert_eq!(self_promote.status, StatusCode::FORBIDDEN);

    let self_delete = app
        .request(
            "DELETE",
            &format!("/api/users/{}", acme.admin_id),
            None,
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(self_delete.status, StatusCode::FORBIDDEN);

    let removed = app
        .request(
            "DELETE",
            &format!("/api/users/{ann_id}"),
            None,
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(removed.status, StatusCode::OK);

    let gone = app.request("GET", "/api/auth/me", None, Some(&ann_token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_member_email_conflicts() {
    let app = TestApp::new().await;
    let acme = app.register_tenant("Acme", "acme", "pro").await;
    app.add_member(&acme, "ann").await;

    let duplicate = app
        .request(
            "POST",
            &format!("/api/tenants/{}/users", acme.id),
            Some(json!({
                "email": "ann@acme.test",
                "password": PASSWORD,
                "fullName": "Ann Again",
            })),
            Some(&acme.admin_token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

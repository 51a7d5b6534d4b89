//! Authorization resolution across tenants, memberships, and shares.

use axum::http::StatusCode;
use serde_json::json;

use ampflux_entity::account::AccountRole;

use super::helpers::TestApp;

#[tokio::test]
async fn test_cross_tenant_viewer_share_scenario() {
    let Some(app) = TestApp::new().await else { return };

    // Account A (company X, admin) creates project P.
    let a = app.register("Alice", "alice@x.io", "Company X").await;
    let project_id = app.create_project(&a, "Grid Model").await;

    // Account B (company Y) is invited with role viewer.
    app.register("Bob", "bob@y.io", "Company Y").await;
    let b = app.login("bob@y.io", "correct-horse-battery").await;

    let share = app
        .post(
            &format!("/projects/{project_id}/share"),
            Some(json!({"email": "bob@y.io", "role": "viewer"})),
            Some(&a.header()),
        )
        .await;
    assert_eq!(share.status, StatusCode::OK, "{:?}", share.body);

    // B can view through the pending share but cannot edit.
    let view = app
        .get(&format!("/projects/{project_id}"), Some(&b.header()))
        .await;
    assert_eq!(view.status, StatusCode::OK);

    let save = app
        .post(
            &format!("/circuits/{project_id}/save_version"),
            Some(json!({"data_json": {"components": [], "connections": []}})),
            Some(&b.header()),
        )
        .await;
    assert_eq!(save.status, StatusCode::FORBIDDEN);

    // Accepting the share materializes membership but not a role upgrade.
    let accept = app
        .post(
            &format!("/projects/{project_id}/accept-share"),
            None,
            Some(&b.header()),
        )
        .await;
    assert_eq!(accept.status, StatusCode::OK);

    let save_again = app
        .post(
            &format!("/circuits/{project_id}/save_version"),
            Some(json!({"data_json": {"components": [], "connections": []}})),
            Some(&b.header()),
        )
        .await;
    assert_eq!(save_again.status, StatusCode::FORBIDDEN);

    let perms = app
        .get(
            &format!("/projects/{project_id}/permissions"),
            Some(&b.header()),
        )
        .await;
    assert_eq!(perms.status, StatusCode::OK);
    assert_eq!(perms.body["can_view"], true);
    assert_eq!(perms.body["can_edit"], false);
    assert_eq!(perms.body["role"], "viewer");
}

#[tokio::test]
async fn test_same_company_account_has_full_access() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Alice", "alice@same.io", "Same Co").await;
    let project_id = app.create_project(&a, "Shared Bench").await;

    let (_, company_id) = app.account_ids("alice@same.io").await;
    app.create_account_in_company(
        "Carol",
        "carol@same.io",
        "correct-horse-battery",
        AccountRole::User,
        company_id,
    )
    .await;
    let c = app.login("carol@same.io", "correct-horse-battery").await;

    // Full owner-equivalent access without any membership row.
    let perms = app
        .get(
            &format!("/projects/{project_id}/permissions"),
            Some(&c.header()),
        )
        .await;
    assert_eq!(perms.body["can_view"], true);
    assert_eq!(perms.body["can_edit"], true);
    assert_eq!(perms.body["role"], "owner");

    let save = app
        .post(
            &format!("/circuits/{project_id}/save_version"),
            Some(json!({"data_json": {"components": [], "connections": []}})),
            Some(&c.header()),
        )
        .await;
    assert_eq!(save.status, StatusCode::OK);

    // But deletion needs ownership or the admin role.
    let delete = app
        .delete(&format!("/projects/{project_id}"), Some(&c.header()))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let delete_as_owner = app
        .delete(&format!("/projects/{project_id}"), Some(&a.header()))
        .await;
    assert_eq!(delete_as_owner.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unrelated_project_collapses_to_not_found() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Alice", "alice@hidden.io", "Hidden Co").await;
    let project_id = app.create_project(&a, "Hidden Project").await;

    app.register("Eve", "eve@other.io", "Other Co").await;
    let e = app.login("eve@other.io", "correct-horse-battery").await;

    // Present-but-inaccessible is indistinguishable from absent.
    let get = app
        .get(&format!("/projects/{project_id}"), Some(&e.header()))
        .await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let delete = app
        .delete(&format!("/projects/{project_id}"), Some(&e.header()))
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let missing = app
        .get(
            &format!("/projects/{}", uuid::Uuid::new_v4()),
            Some(&e.header()),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["message"], get.body["message"]);
}

#[tokio::test]
async fn test_accepted_editor_share_can_edit() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Alice", "alice@edit.io", "Edit Co").await;
    let project_id = app.create_project(&a, "Editable").await;

    app.register("Bob", "bob@edit.io", "Bob Co").await;
    let b = app.login("bob@edit.io", "correct-horse-battery").await;

    app.post(
        &format!("/projects/{project_id}/share"),
        Some(json!({"email": "bob@edit.io", "role": "editor"})),
        Some(&a.header()),
    )
    .await;
    app.post(
        &format!("/projects/{project_id}/accept-share"),
        None,
        Some(&b.header()),
    )
    .await;

    let save = app
        .post(
            &format!("/circuits/{project_id}/save_version"),
            Some(json!({"data_json": {"components": [], "connections": []}})),
            Some(&b.header()),
        )
        .await;
    assert_eq!(save.status, StatusCode::OK, "{:?}", save.body);

    // Edit permission is not manage permission.
    let share = app
        .post(
            &format!("/projects/{project_id}/share"),
            Some(json!({"email": "mallory@edit.io", "role": "viewer"})),
            Some(&b.header()),
        )
        .await;
    assert_eq!(share.status, StatusCode::NOT_FOUND);
}

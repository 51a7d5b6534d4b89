//! Share invitation lifecycle.

use axum::http::StatusCode;
use serde_json::json;

use ampflux_entity::account::AccountRole;

use super::helpers::TestApp;

#[tokio::test]
async fn test_duplicate_share_is_a_conflict() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Alice", "alice@shares.io", "Shares Co").await;
    let project_id = app.create_project(&a, "Shared Twice").await;

    let first = app
        .post(
            &format!("/projects/{project_id}/share"),
            Some(json!({"email": "guest@other.io", "role": "viewer"})),
            Some(&a.header()),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["status"], "pending");

    let second = app
        .post(
            &format!("/projects/{project_id}/share"),
            Some(json!({"email": "guest@other.io", "role": "editor"})),
            Some(&a.header()),
        )
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_accept_is_idempotent_one_membership_row() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Alice", "alice@accept.io", "Accept Co").await;
    let project_id = app.create_project(&a, "Accepted").await;

    app.register("Bob", "bob@accept.io", "Bob Accept Co").await;
    let b = app.login("bob@accept.io", "correct-horse-battery").await;
    let (bob_id, _) = app.account_ids("bob@accept.io").await;

    app.post(
        &format!("/projects/{project_id}/share"),
        Some(json!({"email": "bob@accept.io", "role": "viewer"})),
        Some(&a.header()),
    )
    .await;

    let accept = app
        .post(
            &format!("/projects/{project_id}/accept-share"),
            None,
            Some(&b.header()),
        )
        .await;
    assert_eq!(accept.status, StatusCode::OK);
    assert_eq!(accept.body["status"], "accepted");

    // A second accept finds no pending invitation.
    let again = app
        .post(
            &format!("/projects/{project_id}/accept-share"),
            None,
            Some(&b.header()),
        )
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let memberships: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM project_members WHERE project_id = $1 AND account_id = $2",
    )
    .bind(project_id)
    .bind(bob_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(memberships, 1);
}

#[tokio::test]
async fn test_decline_frees_the_share_slot() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Alice", "alice@decline.io", "Decline Co").await;
    let project_id = app.create_project(&a, "Declined").await;

    app.register("Bob", "bob@decline.io", "Bob Decline Co").await;
    let b = app.login("bob@decline.io", "correct-horse-battery").await;
    let (bob_id, _) = app.account_ids("bob@decline.io").await;

    app.post(
        &format!("/projects/{project_id}/share"),
        Some(json!({"email": "bob@decline.io", "role": "editor"})),
        Some(&a.header()),
    )
    .await;

    let decline = app
        .post(
            &format!("/projects/{project_id}/decline-share"),
            None,
            Some(&b.header()),
        )
        .await;
    assert_eq!(decline.status, StatusCode::OK);
    assert_eq!(decline.body["status"], "rejected");

    // No membership materialized, and access is gone.
    let memberships: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM project_members WHERE project_id = $1 AND account_id = $2",
    )
    .bind(project_id)
    .bind(bob_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(memberships, 0);

    let view = app
        .get(&format!("/projects/{project_id}"), Some(&b.header()))
        .await;
    assert_eq!(view.status, StatusCode::NOT_FOUND);

    // A rejected share frees the slot for a fresh invitation.
    let reshare = app
        .post(
            &format!("/projects/{project_id}/share"),
            Some(json!({"email": "bob@decline.io", "role": "viewer"})),
            Some(&a.header()),
        )
        .await;
    assert_eq!(reshare.status, StatusCode::OK);
}

#[tokio::test]
async fn test_shared_with_me_lists_pending_and_accepted() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Alice", "alice@listing.io", "Listing Co").await;
    let p1 = app.create_project(&a, "Pending Project").await;
    let p2 = app.create_project(&a, "Accepted Project").await;

    app.register("Bob", "bob@listing.io", "Bob Listing Co").await;
    let b = app.login("bob@listing.io", "correct-horse-battery").await;

    for (project, role) in [(p1, "viewer"), (p2, "editor")] {
        app.post(
            &format!("/projects/{project}/share"),
            Some(json!({"email": "bob@listing.io", "role": role})),
            Some(&a.header()),
        )
        .await;
    }
    app.post(&format!("/projects/{p2}/accept-share"), None, Some(&b.header()))
        .await;

    let listing = app.get("/projects/shared/with-me", Some(&b.header())).await;
    assert_eq!(listing.status, StatusCode::OK);

    let items = listing.body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        assert_eq!(item["shared_by_email"], "alice@listing.io");
        assert!(item["project"]["name"].is_string());
    }
}

#[tokio::test]
async fn test_non_manager_cannot_share() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Alice", "alice@gate.io", "Gate Co").await;
    let project_id = app.create_project(&a, "Gated").await;

    let (_, company_id) = app.account_ids("alice@gate.io").await;
    app.create_account_in_company(
        "Carol",
        "carol@gate.io",
        "correct-horse-battery",
        AccountRole::User,
        company_id,
    )
    .await;
    let c = app.login("carol@gate.io", "correct-horse-battery").await;

    // Same-company edit access, but not owner and not admin.
    let share = app
        .post(
            &format!("/projects/{project_id}/share"),
            Some(json!({"email": "guest@other.io", "role": "viewer"})),
            Some(&c.header()),
        )
        .await;
    assert_eq!(share.status, StatusCode::FORBIDDEN);
}

//! Registration, login, refresh, and logout flows.

use axum::http::StatusCode;
use serde_json::json;

use super::helpers::TestApp;

#[tokio::test]
async fn test_register_login_refresh_subject_continuity() {
    let Some(app) = TestApp::new().await else { return };

    app.register("Ada", "ada@volt.io", "Volt Industries").await;
    let cookies = app.login("ada@volt.io", "correct-horse-battery").await;

    let me = app.get("/users/me", Some(&cookies.access_only())).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], "ada@volt.io");
    let original_id = me.body["id"].clone();

    // Refresh must mint a new access token whose subject matches.
    let refreshed = app
        .post("/auth/refresh", None, Some(&cookies.refresh_only()))
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);
    let new_access = refreshed
        .cookie("access_token")
        .expect("refresh must set a new access cookie");
    assert_ne!(new_access, cookies.access);

    let me_again = app
        .get("/users/me", Some(&format!("access_token={new_access}")))
        .await;
    assert_eq!(me_again.status, StatusCode::OK);
    assert_eq!(me_again.body["id"], original_id);
}

#[tokio::test]
async fn test_duplicate_registration_has_no_side_effects() {
    let Some(app) = TestApp::new().await else { return };

    app.register("Ada", "dup@volt.io", "Dup Industries").await;

    let response = app
        .post(
            "/auth/register",
            Some(json!({
                "name": "Impostor",
                "email": "dup@volt.io",
                "password": "another-password",
                "company_name": "Impostor Industries",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "CONFLICT");

    let accounts: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE email = 'dup@volt.io'")
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(accounts, 1);

    // The failed registration must not have created a company either.
    let companies: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM companies WHERE name LIKE 'Impostor%'")
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(companies, 0);
}

#[tokio::test]
async fn test_company_name_collision_gets_a_suffix() {
    let Some(app) = TestApp::new().await else { return };

    app.register("Ada", "first@volt.io", "Ohm Works").await;
    app.register("Grace", "second@volt.io", "Ohm Works").await;

    let names: Vec<String> =
        sqlx::query_scalar("SELECT name FROM companies WHERE name LIKE 'Ohm Works%' ORDER BY created_at")
            .fetch_all(&app.db_pool)
            .await
            .unwrap();

    assert_eq!(names.len(), 2);
    assert_eq!(names[0], "Ohm Works");
    assert_ne!(names[1], "Ohm Works");
    assert!(names[1].starts_with("Ohm Works ("));
}

#[tokio::test]
async fn test_invalid_credentials_are_uniform() {
    let Some(app) = TestApp::new().await else { return };

    app.register("Ada", "uniform@volt.io", "Uniform Co").await;

    let wrong_password = app
        .post(
            "/auth/login",
            Some(json!({"email": "uniform@volt.io", "password": "wrong-password"})),
            None,
        )
        .await;
    let unknown_email = app
        .post(
            "/auth/login",
            Some(json!({"email": "nobody@volt.io", "password": "wrong-password"})),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["message"], unknown_email.body["message"]);
}

#[tokio::test]
async fn test_logout_revokes_both_tokens_and_is_idempotent() {
    let Some(app) = TestApp::new().await else { return };

    app.register("Ada", "logout@volt.io", "Logout Co").await;
    let cookies = app.login("logout@volt.io", "correct-horse-battery").await;

    let logout = app.post("/auth/logout", None, Some(&cookies.header())).await;
    assert_eq!(logout.status, StatusCode::OK);

    // Revoked access token fails before its natural expiry.
    let me = app.get("/users/me", Some(&cookies.access_only())).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    // Revoked refresh token fails too.
    let refreshed = app
        .post("/auth/refresh", None, Some(&cookies.refresh_only()))
        .await;
    assert_eq!(refreshed.status, StatusCode::UNAUTHORIZED);

    // Logout without any cookie is still a success.
    let again = app.post("/auth/logout", None, None).await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_auth_failures_share_one_opaque_response() {
    let Some(app) = TestApp::new().await else { return };

    app.register("Ada", "opaque@volt.io", "Opaque Co").await;
    let cookies = app.login("opaque@volt.io", "correct-horse-battery").await;

    let missing = app.get("/users/me", None).await;
    let garbage = app.get("/users/me", Some("access_token=garbage")).await;
    // Refresh token presented where an access token is expected.
    let wrong_kind = app
        .get(
            "/users/me",
            Some(&format!("access_token={}", cookies.refresh)),
        )
        .await;

    for response in [&missing, &garbage, &wrong_kind] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["message"], missing.body["message"]);
    }
}

#[tokio::test]
async fn test_access_token_rejected_by_refresh_endpoint() {
    let Some(app) = TestApp::new().await else { return };

    app.register("Ada", "kinds@volt.io", "Kinds Co").await;
    let cookies = app.login("kinds@volt.io", "correct-horse-battery").await;

    let response = app
        .post(
            "/auth/refresh",
            None,
            Some(&format!("refresh_token={}", cookies.access)),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

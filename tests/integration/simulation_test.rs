//! Simulation submission and the poll contract.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{Value, json};

use super::helpers::{AuthCookies, TestApp};

/// Poll until the task leaves `pending` or the budget runs out.
async fn poll_until_settled(app: &TestApp, cookies: &AuthCookies, task_id: &str) -> Value {
    for _ in 0..30 {
        let response = app
            .get(
                &format!("/circuits/simulation_result/{task_id}"),
                Some(&cookies.header()),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        if response.body["status"] != "pending" {
            return response.body;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    panic!("Simulation did not settle in time");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_simulate_and_poll_success() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Ada", "ada@sim.io", "Sim Co").await;
    let project_id = app.create_project(&a, "Fault Study").await;

    let submit = app
        .post(
            &format!("/circuits/{project_id}/simulate"),
            Some(json!({
                "circuit_data": r#"{"voltage": 120, "resistances": [10, 20, 30]}"#,
            })),
            Some(&a.header()),
        )
        .await;
    assert_eq!(submit.status, StatusCode::OK, "{:?}", submit.body);
    assert_eq!(submit.body["status"], "pending");
    let task_id = submit.body["task_id"].as_str().unwrap().to_string();

    let settled = poll_until_settled(&app, &a, &task_id).await;
    assert_eq!(settled["status"], "success", "{settled:?}");
    assert_eq!(settled["result"]["fault_current"], 2.0);
    assert_eq!(settled["result"]["total_resistance"], 60.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_zero_resistance_reports_error_result() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Ada", "ada@zero.io", "Zero Co").await;
    let project_id = app.create_project(&a, "Dead Short").await;

    let submit = app
        .post(
            &format!("/circuits/{project_id}/simulate"),
            Some(json!({
                "circuit_data": r#"{"voltage": 120, "resistances": [0, 0]}"#,
            })),
            Some(&a.header()),
        )
        .await;
    assert_eq!(submit.status, StatusCode::OK);
    let task_id = submit.body["task_id"].as_str().unwrap().to_string();

    // The failure comes back through the poll contract, not as a 500.
    let settled = poll_until_settled(&app, &a, &task_id).await;
    assert_eq!(settled["status"], "error");
    assert_eq!(settled["error"], "Total resistance cannot be zero.");
}

#[tokio::test]
async fn test_malformed_circuit_data_is_a_structured_error() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Ada", "ada@bad.io", "Bad Input Co").await;
    let project_id = app.create_project(&a, "Bad Input").await;

    let submit = app
        .post(
            &format!("/circuits/{project_id}/simulate"),
            Some(json!({"circuit_data": "not json at all"})),
            Some(&a.header()),
        )
        .await;
    assert_eq!(submit.status, StatusCode::OK);
    assert_eq!(submit.body["status"], "error");

    let non_numeric = app
        .post(
            &format!("/circuits/{project_id}/simulate"),
            Some(json!({
                "circuit_data": r#"{"voltage": "plenty", "resistances": [1]}"#,
            })),
            Some(&a.header()),
        )
        .await;
    assert_eq!(non_numeric.status, StatusCode::OK);
    assert_eq!(non_numeric.body["status"], "error");

    // Nothing was dispatched or persisted for either attempt.
    let sims: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM simulations WHERE project_id = $1")
        .bind(project_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(sims, 0);
}

#[tokio::test]
async fn test_viewer_cannot_simulate() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Alice", "alice@simview.io", "SimView Co").await;
    let project_id = app.create_project(&a, "View Only").await;

    app.register("Bob", "bob@simview.io", "Bob SimView Co").await;
    let b = app.login("bob@simview.io", "correct-horse-battery").await;

    app.post(
        &format!("/projects/{project_id}/share"),
        Some(json!({"email": "bob@simview.io", "role": "viewer"})),
        Some(&a.header()),
    )
    .await;

    let submit = app
        .post(
            &format!("/circuits/{project_id}/simulate"),
            Some(json!({
                "circuit_data": r#"{"voltage": 120, "resistances": [10]}"#,
            })),
            Some(&b.header()),
        )
        .await;
    assert_eq!(submit.status, StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_simulation_listing_keeps_pending_placeholder() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Ada", "ada@records.io", "Records Co").await;
    let project_id = app.create_project(&a, "Recorded").await;

    let submit = app
        .post(
            &format!("/circuits/{project_id}/simulate"),
            Some(json!({
                "circuit_data": r#"{"voltage": 12, "resistances": [4, 2]}"#,
            })),
            Some(&a.header()),
        )
        .await;
    let task_id = submit.body["task_id"].as_str().unwrap().to_string();
    poll_until_settled(&app, &a, &task_id).await;

    // The persisted record still carries the pending placeholder; live
    // status is only served by the poll endpoint.
    let listing = app
        .get(
            &format!("/circuits/{project_id}/simulations"),
            Some(&a.header()),
        )
        .await;
    assert_eq!(listing.status, StatusCode::OK);
    let items = listing.body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["result"]["status"], "pending");
    assert_eq!(items[0]["task_id"], task_id.as_str());
}

//! Circuit version numbering.

use axum::http::StatusCode;
use serde_json::json;

use super::helpers::TestApp;

#[tokio::test]
async fn test_version_numbers_start_at_one_and_increment() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Ada", "ada@versions.io", "Versions Co").await;
    let project_id = app.create_project(&a, "Versioned").await;

    for expected in 1..=5 {
        let save = app
            .post(
                &format!("/circuits/{project_id}/save_version"),
                Some(json!({"data_json": {"components": [], "connections": [], "rev": expected}})),
                Some(&a.header()),
            )
            .await;
        assert_eq!(save.status, StatusCode::OK, "{:?}", save.body);
        assert_eq!(save.body["version_number"], expected);
    }

    // Listing is newest first and per-project.
    let listing = app
        .get(&format!("/circuits/{project_id}/versions"), Some(&a.header()))
        .await;
    let numbers: Vec<i64> = listing
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["version_number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn test_version_numbers_are_independent_across_projects() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Ada", "ada@indep.io", "Indep Co").await;
    let p1 = app.create_project(&a, "First").await;
    let p2 = app.create_project(&a, "Second").await;

    for project in [p1, p2] {
        let save = app
            .post(
                &format!("/circuits/{project}/save_version"),
                Some(json!({"data_json": {"components": [], "connections": []}})),
                Some(&a.header()),
            )
            .await;
        assert_eq!(save.body["version_number"], 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_yield_gapless_sequence() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Ada", "ada@race.io", "Race Co").await;
    let project_id = app.create_project(&a, "Contended").await;

    let saves = (0..10).map(|i| {
        let app = &app;
        let cookies = a.header();
        async move {
            let response = app
                .post(
                    &format!("/circuits/{project_id}/save_version"),
                    Some(json!({"data_json": {"components": [], "connections": [], "writer": i}})),
                    Some(&cookies),
                )
                .await;
            assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
            response.body["version_number"].as_i64().unwrap()
        }
    });

    let mut numbers = futures::future::join_all(saves).await;
    numbers.sort_unstable();

    // Exactly {1..N}: no duplicates, no gaps.
    assert_eq!(numbers, (1..=10).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_save_version_bumps_project_updated_at() {
    let Some(app) = TestApp::new().await else { return };

    let a = app.register("Ada", "ada@touch.io", "Touch Co").await;
    let project_id = app.create_project(&a, "Touched").await;

    let before = app
        .get(&format!("/projects/{project_id}"), Some(&a.header()))
        .await;

    app.post(
        &format!("/circuits/{project_id}/save_version"),
        Some(json!({"data_json": {"components": [], "connections": []}})),
        Some(&a.header()),
    )
    .await;

    let after = app
        .get(&format!("/projects/{project_id}"), Some(&a.header()))
        .await;

    let parse = |v: &serde_json::Value| {
        v.as_str()
            .unwrap()
            .parse::<chrono::DateTime<chrono::Utc>>()
            .unwrap()
    };
    assert!(parse(&after.body["updated_at"]) > parse(&before.body["updated_at"]));
}

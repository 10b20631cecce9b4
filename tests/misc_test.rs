//! Miscellaneous integration tests (unicode, health check, file-backed pool).

mod common;

use axum::http::StatusCode;
use budget_planner::config::Config;
use budget_planner::server::build_app;
use common::TestClient;
use serde_json::json;
use std::path::PathBuf;

/// Test health endpoint.
#[tokio::test]
async fn test_health_endpoint() {
    let client = TestClient::new();
    let (status, body) = client.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

/// Test unicode in category and entry names.
#[tokio::test]
async fn test_unicode_names() {
    let client = TestClient::new();

    let id = client.create_category("東京の生活費", "EXPENSE").await;
    client
        .create_entry(&id, "Café François ☕", json!("4.50"), "WEEKLY")
        .await;

    let (status, body) = client.get_json("/api/budget-categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "東京の生活費");
    assert_eq!(body[0]["entries"][0]["name"], "Café François ☕");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let client = TestClient::new();
    let (status, _) = client.get("/api/budgets").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Data written through one app instance is visible to the next one opened on
/// the same file.
#[tokio::test]
async fn test_file_database_persists_between_builds() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        host: "127.0.0.1".into(),
        port: 0,
        database_path: dir.path().join("nested").join("budget.db"),
        migrations_path: PathBuf::from("migrations"),
    };

    {
        let (state, _app) = build_app(&config).unwrap();
        let conn = state.db.get().unwrap();
        budget_planner::services::defaults::seed_default_categories(&conn).unwrap();
    }

    let (state, _app) = build_app(&config).unwrap();
    let conn = state.db.get().unwrap();
    assert_eq!(
        budget_planner::db::queries::budget_categories::count_categories(&conn).unwrap(),
        12
    );
}

//! Shared test utilities for integration tests.
//!
//! This module provides a `TestClient` that drives the JSON API against a fresh
//! in-memory database. Methods are intentionally broad to support the various
//! test files.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use budget_planner::db::{create_in_memory_pool, migrations};
use budget_planner::handlers;
use budget_planner::state::AppState;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::path::Path;
use tower::ServiceExt;

pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// Create a new test client with a fresh in-memory database.
    pub fn new() -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        {
            let conn = pool.get().expect("Failed to get connection");
            migrations::run_migrations(&conn, Path::new("migrations"))
                .expect("Failed to run migrations");
        }

        Self {
            state: AppState { db: pool },
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router().oneshot(request).await.unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        (status, parse(&body))
    }

    pub async fn post_json(&self, uri: &str, payload: &Value) -> (StatusCode, Value) {
        self.send_json("POST", uri, payload).await
    }

    pub async fn put_json(&self, uri: &str, payload: &Value) -> (StatusCode, Value) {
        self.send_json("PUT", uri, payload).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self
            .send(
                Request::builder()
                    .method("DELETE")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        (status, parse(&body))
    }

    /// POST a raw body with the given content type.
    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: &str,
        body: impl Into<Body>,
    ) -> (StatusCode, String) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", content_type)
                .body(body.into())
                .unwrap(),
        )
        .await
    }

    async fn send_json(&self, method: &str, uri: &str, payload: &Value) -> (StatusCode, Value) {
        let (status, body) = self
            .send(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await;
        (status, parse(&body))
    }

    // =========================================================================
    // Helper methods for creating entities through the API
    // =========================================================================

    /// Create a category and return its id.
    pub async fn create_category(&self, name: &str, category_type: &str) -> String {
        let (status, body) = self
            .post_json(
                "/api/budget-categories",
                &json!({ "name": name, "description": "", "type": category_type }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create category failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Create an entry inside a category and return its id.
    pub async fn create_entry(
        &self,
        category_id: &str,
        name: &str,
        amount: Value,
        frequency: &str,
    ) -> String {
        let (status, body) = self
            .post_json(
                "/api/budget-entries",
                &json!({
                    "name": name,
                    "amount": amount,
                    "frequency": frequency,
                    "budget_category_id": category_id,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create entry failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or(Value::Null)
}

/// Find the summary row of the given type in a summary response.
pub fn summary_row<'a>(summaries: &'a Value, kind: &str) -> &'a Value {
    summaries
        .as_array()
        .and_then(|rows| rows.iter().find(|row| row["type"] == kind))
        .unwrap_or_else(|| panic!("no {kind} row in {summaries}"))
}

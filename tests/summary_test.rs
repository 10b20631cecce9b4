//! Integration tests for the income/expense/surplus summary endpoints.

mod common;

use axum::http::StatusCode;
use common::{summary_row, TestClient};
use serde_json::json;

async fn seeded_client() -> TestClient {
    let client = TestClient::new();
    let salary = client.create_category("Salary", "INCOME").await;
    let housing = client.create_category("Housing", "EXPENSE").await;
    client.create_category("Pets", "EXPENSE").await;

    client
        .create_entry(&salary, "Paycheck", json!(3000), "MONTHLY")
        .await;
    client
        .create_entry(&housing, "Rent", json!(1200), "MONTHLY")
        .await;
    client
        .create_entry(&housing, "Groceries", json!("100"), "WEEKLY")
        .await;

    let (status, _) = client
        .post_json(
            "/api/budget-entries",
            &json!({ "name": "Gift", "amount": 50, "frequency": "YEARLY", "type": "INCOME" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    client
}

#[tokio::test]
async fn test_stored_summary_by_category() {
    let client = seeded_client().await;

    let (status, body) = client.get_json("/api/summary").await;
    assert_eq!(status, StatusCode::OK);

    let kinds: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["INCOME", "EXPENSE", "SURPLUS"]);

    assert_eq!(body[0]["amount_cents"], 300000);
    assert_eq!(body[0]["entry_count"], 1);
    assert_eq!(body[1]["amount_cents"], 130000);
    assert_eq!(body[1]["entry_count"], 2);
    assert_eq!(body[2]["amount_cents"], 170000);
    assert_eq!(body[2]["amount"], "1700.00");
    assert_eq!(body[2]["entry_count"], 0);
}

#[tokio::test]
async fn test_stored_summary_by_entry_includes_detached_entries() {
    let client = seeded_client().await;

    let (status, body) = client.get_json("/api/summary?by=entry").await;
    assert_eq!(status, StatusCode::OK);

    let income = summary_row(&body, "INCOME");
    assert_eq!(income["amount_cents"], 305000);
    assert_eq!(income["entry_count"], 2);
    assert_eq!(summary_row(&body, "SURPLUS")["amount_cents"], 175000);
}

#[tokio::test]
async fn test_stored_summary_normalized_to_month() {
    let client = seeded_client().await;

    let (status, body) = client
        .get_json("/api/summary?by=category&period=monthly")
        .await;
    assert_eq!(status, StatusCode::OK);

    // 100.00 weekly is 52 * 100 / 12 = 433.33 a month.
    assert_eq!(summary_row(&body, "EXPENSE")["amount_cents"], 163333);
    assert_eq!(summary_row(&body, "INCOME")["amount_cents"], 300000);
    assert_eq!(summary_row(&body, "SURPLUS")["amount"], "1366.67");

    let (_, yearly) = client.get_json("/api/summary?period=yearly").await;
    assert_eq!(summary_row(&yearly, "EXPENSE")["amount_cents"], 1960000);
}

#[tokio::test]
async fn test_stored_summary_rejects_unknown_params() {
    let client = TestClient::new();

    let (status, body) = client.get_json("/api/summary?period=daily").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = client.get_json("/api/summary?by=account").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_store_summarizes_to_zero() {
    let client = TestClient::new();

    for uri in ["/api/summary", "/api/summary?by=entry"] {
        let (status, body) = client.get_json(uri).await;
        assert_eq!(status, StatusCode::OK);
        for row in body.as_array().unwrap() {
            assert_eq!(row["amount_cents"], 0);
            assert_eq!(row["amount"], "0.00");
            assert_eq!(row["entry_count"], 0);
        }
    }
}

#[tokio::test]
async fn test_compute_from_posted_entries() {
    let client = TestClient::new();

    let (status, body) = client
        .post_json(
            "/api/summary",
            &json!({
                "entries": [
                    { "type": "INCOME", "amount": 1000 },
                    { "type": "EXPENSE", "amount": "250.50" },
                    { "type": "EXPENSE", "amount": 100 },
                    { "type": "SAVINGS", "amount": 999 },
                    { "type": "income", "amount": 999 },
                    { "type": "EXPENSE", "amount": "abc" },
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let income = summary_row(&body, "INCOME");
    assert_eq!(income["amount_cents"], 100000);
    assert_eq!(income["entry_count"], 1);

    let expense = summary_row(&body, "EXPENSE");
    assert_eq!(expense["amount_cents"], 35050);
    assert_eq!(expense["entry_count"], 3);

    assert_eq!(summary_row(&body, "SURPLUS")["amount_cents"], 64950);
}

#[tokio::test]
async fn test_compute_from_posted_categories_wins_over_entries() {
    let client = TestClient::new();

    let (status, body) = client
        .post_json(
            "/api/summary?period=monthly",
            &json!({
                "categories": [
                    {
                        "type": "INCOME",
                        "entries": [{ "type": "EXPENSE", "amount": 2400, "frequency": "YEARLY" }]
                    },
                    { "type": "EXPENSE" },
                    {
                        "type": "EXPENSE",
                        "entries": [{ "amount": 10, "frequency": "SOMETIMES" }]
                    },
                ],
                "entries": [{ "type": "INCOME", "amount": 1_000_000 }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let income = summary_row(&body, "INCOME");
    assert_eq!(income["amount_cents"], 20000);
    assert_eq!(income["entry_count"], 1);

    let expense = summary_row(&body, "EXPENSE");
    assert_eq!(expense["amount_cents"], 1000);
    assert_eq!(expense["entry_count"], 1);
}

#[tokio::test]
async fn test_compute_with_empty_body_is_all_zero() {
    let client = TestClient::new();

    let (status, body) = client.post_json("/api/summary", &json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "type": "INCOME", "amount_cents": 0, "amount": "0.00", "entry_count": 0 },
            { "type": "EXPENSE", "amount_cents": 0, "amount": "0.00", "entry_count": 0 },
            { "type": "SURPLUS", "amount_cents": 0, "amount": "0.00", "entry_count": 0 },
        ])
    );
}

#[tokio::test]
async fn test_compute_rejects_malformed_json() {
    let client = TestClient::new();

    let (status, _) = client
        .post_raw("/api/summary", "application/json", "{not json")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

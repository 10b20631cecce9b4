pub mod budget_categories;
pub mod budget_entries;
pub mod summary;
pub mod transfer;

use axum::routing::{get, post};
use axum::Router;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Budget categories
        .route(
            "/api/budget-categories",
            get(budget_categories::read_all).post(budget_categories::create),
        )
        .route(
            "/api/budget-categories/defaults",
            post(budget_categories::load_defaults),
        )
        .route(
            "/api/budget-categories/:id",
            get(budget_categories::read)
                .put(budget_categories::update)
                .delete(budget_categories::delete),
        )
        // Budget entries
        .route(
            "/api/budget-entries",
            get(budget_entries::read_all).post(budget_entries::create),
        )
        .route(
            "/api/budget-entries/:id",
            get(budget_entries::read)
                .put(budget_entries::update)
                .delete(budget_entries::delete),
        )
        // Summaries
        .route(
            "/api/summary",
            get(summary::stored).post(summary::compute),
        )
        // Import / export
        .route("/api/export", get(transfer::export))
        .route("/api/import", post(transfer::import))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}

/// Trim a submitted name and reject it if nothing is left.
fn require_name(name: &str, what: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} name must not be empty", what)));
    }
    Ok(trimmed.to_string())
}

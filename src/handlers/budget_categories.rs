use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::db::queries::budget_categories;
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::require_name;
use crate::models::{BudgetCategoryUpdate, CategoryWithEntries, NewBudgetCategory};
use crate::services::defaults;
use crate::state::AppState;

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Budget category not found: {}", id))
}

pub async fn read_all(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryWithEntries>>> {
    let conn = state.db.get()?;
    let categories = budget_categories::list_categories_with_entries(&conn)?;
    Ok(Json(categories))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CategoryWithEntries>> {
    let conn = state.db.get()?;
    let category =
        budget_categories::get_category_with_entries(&conn, &id)?.ok_or_else(|| not_found(&id))?;
    Ok(Json(category))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(mut input): ApiJson<NewBudgetCategory>,
) -> AppResult<(StatusCode, Json<CategoryWithEntries>)> {
    input.name = require_name(&input.name, "Category")?;

    let conn = state.db.get()?;
    let id = budget_categories::create_category(&conn, &input)?;
    info!(category_id = %id, category_type = %input.category_type, "Budget category created");

    let category = budget_categories::get_category_with_entries(&conn, &id)?
        .ok_or_else(|| AppError::Internal("Failed to retrieve created category".into()))?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(mut input): ApiJson<BudgetCategoryUpdate>,
) -> AppResult<Json<CategoryWithEntries>> {
    if let Some(name) = &input.name {
        input.name = Some(require_name(name, "Category")?);
    }

    let mut conn = state.db.get()?;
    let tx = conn.transaction()?;

    if !budget_categories::update_category(&tx, &id, &input)? {
        return Err(not_found(&id));
    }
    let category = budget_categories::get_category_with_entries(&tx, &id)?
        .ok_or_else(|| AppError::Internal("Failed to retrieve updated category".into()))?;

    tx.commit()?;
    Ok(Json(category))
}

/// Delete a category and return it as it was, entries included.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CategoryWithEntries>> {
    let mut conn = state.db.get()?;
    let tx = conn.transaction()?;

    let category =
        budget_categories::get_category_with_entries(&tx, &id)?.ok_or_else(|| not_found(&id))?;
    budget_categories::delete_category(&tx, &id)?;
    info!(
        category_id = %id,
        entries = category.entries.len(),
        "Budget category deleted"
    );

    tx.commit()?;
    Ok(Json(category))
}

/// Seed the standard category set when there are no categories yet.
pub async fn load_defaults(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let mut conn = state.db.get()?;
    let tx = conn.transaction()?;

    let created = defaults::seed_default_categories(&tx)?;

    tx.commit()?;
    Ok(Json(json!({ "created": created })))
}

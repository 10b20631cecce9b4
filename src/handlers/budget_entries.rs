use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use rusqlite::Connection;
use tracing::info;

use crate::db::queries::{budget_categories, budget_entries};
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::require_name;
use crate::models::{BudgetEntry, BudgetEntryUpdate, BudgetType, NewBudgetEntry};
use crate::state::AppState;

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Budget entry not found: {}", id))
}

/// Work out the type a new entry gets. An entry attached to a category takes
/// the category's type; an explicit type that disagrees is rejected. A
/// detached entry must say what it is.
fn resolve_new_entry_type(conn: &Connection, entry: &NewBudgetEntry) -> AppResult<BudgetType> {
    match &entry.budget_category_id {
        Some(category_id) => {
            let category = budget_categories::get_category(conn, category_id)?.ok_or_else(|| {
                AppError::Validation(format!("Budget category not found: {}", category_id))
            })?;
            check_matches_category(entry.entry_type, category.category_type)?;
            Ok(category.category_type)
        }
        None => entry.entry_type.ok_or_else(|| {
            AppError::Validation("type is required for an entry without a budget category".into())
        }),
    }
}

fn check_matches_category(
    requested: Option<BudgetType>,
    category_type: BudgetType,
) -> AppResult<()> {
    match requested {
        Some(kind) if kind != category_type => Err(AppError::Validation(format!(
            "Entry type {} does not match its category type {}",
            kind, category_type
        ))),
        _ => Ok(()),
    }
}

pub async fn read_all(State(state): State<AppState>) -> AppResult<Json<Vec<BudgetEntry>>> {
    let conn = state.db.get()?;
    let entries = budget_entries::list_entries(&conn)?;
    Ok(Json(entries))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BudgetEntry>> {
    let conn = state.db.get()?;
    let entry = budget_entries::get_entry(&conn, &id)?.ok_or_else(|| not_found(&id))?;
    Ok(Json(entry))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(mut input): ApiJson<NewBudgetEntry>,
) -> AppResult<(StatusCode, Json<BudgetEntry>)> {
    input.name = require_name(&input.name, "Entry")?;

    let mut conn = state.db.get()?;
    let tx = conn.transaction()?;

    let entry_type = resolve_new_entry_type(&tx, &input)?;
    let id = budget_entries::create_entry(&tx, &input, entry_type)?;
    info!(
        entry_id = %id,
        category_id = ?input.budget_category_id,
        entry_type = %entry_type,
        "Budget entry created"
    );

    let entry = budget_entries::get_entry(&tx, &id)?
        .ok_or_else(|| AppError::Internal("Failed to retrieve created entry".into()))?;

    tx.commit()?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(mut input): ApiJson<BudgetEntryUpdate>,
) -> AppResult<Json<BudgetEntry>> {
    if let Some(name) = &input.name {
        input.name = Some(require_name(name, "Entry")?);
    }

    let mut conn = state.db.get()?;
    let tx = conn.transaction()?;

    let existing = budget_entries::get_entry(&tx, &id)?.ok_or_else(|| not_found(&id))?;
    let category_type = match &existing.budget_category_id {
        Some(category_id) => {
            budget_categories::get_category(&tx, category_id)?.map(|c| c.category_type)
        }
        None => None,
    };

    let entry_type = match category_type {
        Some(category_type) => {
            check_matches_category(input.entry_type, category_type)?;
            category_type
        }
        None => input.entry_type.unwrap_or(existing.entry_type),
    };

    budget_entries::update_entry(&tx, &id, &input, entry_type)?;
    let entry = budget_entries::get_entry(&tx, &id)?
        .ok_or_else(|| AppError::Internal("Failed to retrieve updated entry".into()))?;

    tx.commit()?;
    Ok(Json(entry))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BudgetEntry>> {
    let mut conn = state.db.get()?;
    let tx = conn.transaction()?;

    let entry = budget_entries::get_entry(&tx, &id)?.ok_or_else(|| not_found(&id))?;
    budget_entries::delete_entry(&tx, &id)?;
    info!(entry_id = %id, "Budget entry deleted");

    tx.commit()?;
    Ok(Json(entry))
}

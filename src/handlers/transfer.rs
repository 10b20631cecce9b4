use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Json};
use tracing::info;

use crate::db::queries::{budget_categories, budget_entries};
use crate::error::AppResult;
use crate::services::transfer::{self, ImportReport};
use crate::state::AppState;

pub async fn export(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let conn = state.db.get()?;

    let categories = budget_categories::list_categories_with_entries(&conn)?;
    let detached: Vec<_> = budget_entries::list_entries(&conn)?
        .into_iter()
        .filter(|entry| entry.budget_category_id.is_none())
        .collect();

    let csv = transfer::export_csv(&categories, &detached)?;
    let filename = format!(
        "attachment; filename=\"budget-{}.csv\"",
        chrono::Local::now().format("%Y-%m-%d")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, filename),
        ],
        csv,
    ))
}

/// Import a CSV body. Bad rows are skipped and reported; everything else is
/// written in a single transaction.
pub async fn import(State(state): State<AppState>, body: Bytes) -> AppResult<Json<ImportReport>> {
    let parsed = transfer::parse_import(&body)?;

    let mut conn = state.db.get()?;
    let tx = conn.transaction()?;
    let report = transfer::apply_import(&tx, parsed)?;
    tx.commit()?;

    info!(
        categories_created = report.categories_created,
        entries_created = report.entries_created,
        skipped = report.errors.len(),
        "Budget CSV imported"
    );
    Ok(Json(report))
}

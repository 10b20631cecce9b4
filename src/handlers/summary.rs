use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;

use crate::db::queries::{budget_categories, budget_entries};
use crate::error::AppResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::models::{BudgetSummary, Period, SummaryRequest, SummarySource};
use crate::services::summary::{summarize_categories, summarize_entries};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SummaryParams {
    #[serde(default)]
    pub by: SummarySource,
    #[serde(default)]
    pub period: Period,
}

/// Summaries over everything currently stored.
pub async fn stored(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SummaryParams>,
) -> AppResult<Json<[BudgetSummary; 3]>> {
    let conn = state.db.get()?;

    let summaries = match params.by {
        SummarySource::Category => {
            let categories = budget_categories::list_categories_with_entries(&conn)?;
            summarize_categories(Some(categories.as_slice()), params.period)
        }
        SummarySource::Entry => {
            let entries = budget_entries::list_entries(&conn)?;
            summarize_entries(Some(entries.as_slice()), params.period)
        }
    };

    Ok(Json(summaries))
}

/// Summaries over a posted collection. Nothing is read from or written to
/// the database.
pub async fn compute(
    ApiQuery(params): ApiQuery<SummaryParams>,
    ApiJson(request): ApiJson<SummaryRequest>,
) -> Json<[BudgetSummary; 3]> {
    let summaries = match (&request.categories, &request.entries) {
        (Some(categories), _) => summarize_categories(Some(categories.as_slice()), params.period),
        (None, entries) => summarize_entries(entries.as_deref(), params.period),
    };
    Json(summaries)
}

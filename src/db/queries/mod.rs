pub mod budget_categories;
pub mod budget_entries;

use rusqlite::types::Type;
use rusqlite::Row;

use crate::models::{BudgetType, Frequency};

fn invalid_text(idx: usize, raw: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        format!("unexpected value: {}", raw).into(),
    )
}

pub(crate) fn budget_type_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<BudgetType> {
    let raw: String = row.get(idx)?;
    BudgetType::parse(&raw).ok_or_else(|| invalid_text(idx, raw))
}

pub(crate) fn frequency_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Frequency> {
    let raw: String = row.get(idx)?;
    Frequency::parse(&raw).ok_or_else(|| invalid_text(idx, raw))
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

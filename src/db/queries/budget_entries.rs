use crate::amount::format_cents;
use crate::db::queries::{budget_type_at, frequency_at, new_id};
use crate::models::category::BudgetType;
use crate::models::entry::{BudgetEntry, BudgetEntryUpdate, NewBudgetEntry};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

const COLUMNS: &str =
    "id, name, amount_cents, frequency, type, budget_category_id, created_at, updated_at";

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<BudgetEntry> {
    let amount_cents: i64 = row.get(2)?;
    Ok(BudgetEntry {
        id: row.get(0)?,
        name: row.get(1)?,
        amount_cents,
        amount: format_cents(amount_cents),
        frequency: frequency_at(row, 3)?,
        entry_type: budget_type_at(row, 4)?,
        budget_category_id: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// All entries in the order they were created.
pub fn list_entries(conn: &Connection) -> rusqlite::Result<Vec<BudgetEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM budget_entries ORDER BY rowid",
        COLUMNS
    ))?;

    let entries = stmt
        .query_map([], entry_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(entries)
}

pub fn list_entries_for_category(
    conn: &Connection,
    category_id: &str,
) -> rusqlite::Result<Vec<BudgetEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM budget_entries WHERE budget_category_id = ? ORDER BY rowid",
        COLUMNS
    ))?;

    let entries = stmt
        .query_map([category_id], entry_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(entries)
}

pub fn get_entry(conn: &Connection, id: &str) -> rusqlite::Result<Option<BudgetEntry>> {
    conn.query_row(
        &format!("SELECT {} FROM budget_entries WHERE id = ?", COLUMNS),
        [id],
        entry_from_row,
    )
    .optional()
}

/// Insert an entry with an already resolved type.
pub fn create_entry(
    conn: &Connection,
    entry: &NewBudgetEntry,
    entry_type: BudgetType,
) -> rusqlite::Result<String> {
    let id = new_id();
    conn.execute(
        "INSERT INTO budget_entries (id, name, amount_cents, frequency, type, budget_category_id)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            id,
            entry.name,
            entry.amount_cents,
            entry.frequency.as_str(),
            entry_type.as_str(),
            entry.budget_category_id
        ],
    )?;
    debug!(
        entry_id = %id,
        name = %entry.name,
        amount_cents = entry.amount_cents,
        frequency = %entry.frequency,
        "Created budget entry"
    );
    Ok(id)
}

/// Apply an update with an already resolved type. Omitted name/amount keep
/// their current values.
pub fn update_entry(
    conn: &Connection,
    id: &str,
    update: &BudgetEntryUpdate,
    entry_type: BudgetType,
) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE budget_entries
         SET name = COALESCE(?, name),
             amount_cents = COALESCE(?, amount_cents),
             frequency = ?,
             type = ?,
             updated_at = datetime('now')
         WHERE id = ?",
        params![
            update.name,
            update.amount_cents,
            update.frequency.as_str(),
            entry_type.as_str(),
            id
        ],
    )?;
    if rows > 0 {
        debug!(entry_id = %id, "Updated budget entry");
    }
    Ok(rows > 0)
}

pub fn delete_entry(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM budget_entries WHERE id = ?", [id])?;
    if rows > 0 {
        debug!(entry_id = %id, "Deleted budget entry");
    }
    Ok(rows > 0)
}

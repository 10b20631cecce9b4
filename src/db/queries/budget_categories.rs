use std::collections::HashMap;

use crate::db::queries::{budget_entries, budget_type_at, new_id};
use crate::models::category::{
    BudgetCategory, BudgetCategoryUpdate, BudgetType, CategoryWithEntries, NewBudgetCategory,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

const COLUMNS: &str = "id, name, description, type, created_at, updated_at";

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<BudgetCategory> {
    Ok(BudgetCategory {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category_type: budget_type_at(row, 3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// All categories, income first, then by name.
pub fn list_categories(conn: &Connection) -> rusqlite::Result<Vec<BudgetCategory>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {}
         FROM budget_categories
         ORDER BY CASE type WHEN 'INCOME' THEN 0 ELSE 1 END, name, rowid",
        COLUMNS
    ))?;

    let categories = stmt
        .query_map([], category_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(categories)
}

/// All categories with their entries nested, in [`list_categories`] order.
pub fn list_categories_with_entries(
    conn: &Connection,
) -> rusqlite::Result<Vec<CategoryWithEntries>> {
    let categories = list_categories(conn)?;

    let mut by_category: HashMap<String, Vec<_>> = HashMap::new();
    for entry in budget_entries::list_entries(conn)? {
        if let Some(category_id) = entry.budget_category_id.clone() {
            by_category.entry(category_id).or_default().push(entry);
        }
    }

    Ok(categories
        .into_iter()
        .map(|category| {
            let entries = by_category.remove(&category.id).unwrap_or_default();
            CategoryWithEntries::new(category, entries)
        })
        .collect())
}

pub fn get_category(conn: &Connection, id: &str) -> rusqlite::Result<Option<BudgetCategory>> {
    conn.query_row(
        &format!("SELECT {} FROM budget_categories WHERE id = ?", COLUMNS),
        [id],
        category_from_row,
    )
    .optional()
}

pub fn get_category_with_entries(
    conn: &Connection,
    id: &str,
) -> rusqlite::Result<Option<CategoryWithEntries>> {
    let Some(category) = get_category(conn, id)? else {
        return Ok(None);
    };
    let entries = budget_entries::list_entries_for_category(conn, id)?;
    Ok(Some(CategoryWithEntries::new(category, entries)))
}

pub fn get_category_by_name(
    conn: &Connection,
    name: &str,
) -> rusqlite::Result<Option<BudgetCategory>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM budget_categories WHERE name = ? ORDER BY rowid LIMIT 1",
            COLUMNS
        ),
        [name],
        category_from_row,
    )
    .optional()
}

pub fn count_categories(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM budget_categories", [], |row| {
        row.get(0)
    })
}

pub fn create_category(
    conn: &Connection,
    category: &NewBudgetCategory,
) -> rusqlite::Result<String> {
    let id = new_id();
    conn.execute(
        "INSERT INTO budget_categories (id, name, description, type) VALUES (?, ?, ?, ?)",
        params![
            id,
            category.name,
            category.description,
            category.category_type.as_str()
        ],
    )?;
    debug!(category_id = %id, name = %category.name, "Created budget category");
    Ok(id)
}

/// Apply an update. Omitted name/description keep their current values.
/// When the type changes, the category's entries are retyped too, so callers
/// should run this inside a transaction.
pub fn update_category(
    conn: &Connection,
    id: &str,
    update: &BudgetCategoryUpdate,
) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE budget_categories
         SET name = COALESCE(?, name),
             description = COALESCE(?, description),
             type = ?,
             updated_at = datetime('now')
         WHERE id = ?",
        params![
            update.name,
            update.description,
            update.category_type.as_str(),
            id
        ],
    )?;
    if rows == 0 {
        return Ok(false);
    }

    let retyped = retype_entries(conn, id, update.category_type)?;
    debug!(
        category_id = %id,
        category_type = %update.category_type,
        retyped_entries = retyped,
        "Updated budget category"
    );
    Ok(true)
}

fn retype_entries(
    conn: &Connection,
    category_id: &str,
    kind: BudgetType,
) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE budget_entries SET type = ?, updated_at = datetime('now')
         WHERE budget_category_id = ? AND type != ?",
        params![kind.as_str(), category_id, kind.as_str()],
    )
}

/// Delete a category. Its entries go with it through the foreign key.
pub fn delete_category(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM budget_categories WHERE id = ?", [id])?;
    if rows > 0 {
        debug!(category_id = %id, "Deleted budget category");
    }
    Ok(rows > 0)
}

//! CSV export and import of categories together with their entries.
//!
//! One row per entry. A category without entries gets a single row with the
//! entry columns left empty; an entry without a category leaves the category
//! columns empty.

use std::collections::HashMap;

use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::amount::parse_cents;
use crate::db::queries::{budget_categories, budget_entries};
use crate::error::AppError;
use crate::models::{
    BudgetEntry, BudgetType, CategoryWithEntries, Frequency, NewBudgetCategory, NewBudgetEntry,
};

pub const HEADERS: [&str; 6] = ["category", "description", "type", "entry", "amount", "frequency"];

pub fn export_csv(
    categories: &[CategoryWithEntries],
    detached: &[BudgetEntry],
) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;

    for item in categories {
        let category = &item.category;
        if item.entries.is_empty() {
            writer.write_record([
                category.name.as_str(),
                category.description.as_str(),
                category.category_type.as_str(),
                "",
                "",
                "",
            ])?;
        }
        for entry in &item.entries {
            writer.write_record([
                category.name.as_str(),
                category.description.as_str(),
                category.category_type.as_str(),
                entry.name.as_str(),
                entry.amount.as_str(),
                entry.frequency.as_str(),
            ])?;
        }
    }

    for entry in detached {
        writer.write_record([
            "",
            "",
            entry.entry_type.as_str(),
            entry.name.as_str(),
            entry.amount.as_str(),
            entry.frequency.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to write CSV: {}", e)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportError {
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCategory {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    pub name: String,
    pub amount_cents: i64,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub row_number: usize,
    pub budget_type: BudgetType,
    pub category: Option<ImportCategory>,
    pub entry: Option<ImportEntry>,
}

#[derive(Debug, Default)]
pub struct ParsedImport {
    pub rows: Vec<ImportRow>,
    pub errors: Vec<ImportError>,
}

#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    pub categories_created: usize,
    pub entries_created: usize,
    pub errors: Vec<ImportError>,
}

pub fn parse_import(content: &[u8]) -> Result<ParsedImport, AppError> {
    trace!(content_size = content.len(), "Starting budget CSV parsing");

    let content_str =
        std::str::from_utf8(content).map_err(|e| AppError::CsvParse(e.to_string()))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content_str.as_bytes());

    let headers = reader.headers()?.clone();

    let category_col = find_column(&headers, "category")
        .ok_or_else(|| AppError::CsvParse("No category column found in CSV".into()))?;
    let type_col = find_column(&headers, "type")
        .ok_or_else(|| AppError::CsvParse("No type column found in CSV".into()))?;
    let entry_col = find_column(&headers, "entry")
        .ok_or_else(|| AppError::CsvParse("No entry column found in CSV".into()))?;
    let amount_col = find_column(&headers, "amount");
    let frequency_col = find_column(&headers, "frequency");
    let description_col = find_column(&headers, "description");

    let mut parsed = ParsedImport::default();

    for (row_idx, result) in reader.records().enumerate() {
        let row_number = row_idx + 2;
        let mut reject = |message: String| {
            parsed.errors.push(ImportError {
                row: row_number,
                message,
            })
        };

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                reject(e.to_string());
                continue;
            }
        };

        let field = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or("").trim();

        let raw_type = field(Some(type_col));
        let Some(budget_type) = BudgetType::parse(raw_type) else {
            reject(format!("Unknown type '{}'", raw_type));
            continue;
        };

        let category_name = field(Some(category_col));
        let category = (!category_name.is_empty()).then(|| ImportCategory {
            name: category_name.to_string(),
            description: field(description_col).to_string(),
        });

        let entry_name = field(Some(entry_col));
        let entry = if entry_name.is_empty() {
            None
        } else {
            let raw_amount = field(amount_col);
            let Some(amount_cents) = parse_cents(raw_amount) else {
                reject(format!("Invalid amount '{}'", raw_amount));
                continue;
            };
            let raw_frequency = field(frequency_col);
            let Some(frequency) = Frequency::parse(raw_frequency) else {
                reject(format!("Unknown frequency '{}'", raw_frequency));
                continue;
            };
            Some(ImportEntry {
                name: entry_name.to_string(),
                amount_cents,
                frequency,
            })
        };

        if category.is_none() && entry.is_none() {
            reject("Row has neither a category nor an entry".into());
            continue;
        }

        parsed.rows.push(ImportRow {
            row_number,
            budget_type,
            category,
            entry,
        });
    }

    debug!(
        rows = parsed.rows.len(),
        errors = parsed.errors.len(),
        "Budget CSV parsed"
    );
    Ok(parsed)
}

/// Write parsed rows. Categories are matched by name and created when
/// missing; a row whose type disagrees with an existing category is skipped.
/// Callers should run this inside a transaction.
pub fn apply_import(conn: &Connection, parsed: ParsedImport) -> rusqlite::Result<ImportReport> {
    let mut report = ImportReport {
        errors: parsed.errors,
        ..Default::default()
    };
    let mut known: HashMap<String, (String, BudgetType)> = HashMap::new();

    for row in parsed.rows {
        let category_id = match &row.category {
            None => None,
            Some(category) => {
                if !known.contains_key(&category.name) {
                    let existing = budget_categories::get_category_by_name(conn, &category.name)?;
                    let resolved = match existing {
                        Some(existing) => (existing.id, existing.category_type),
                        None => {
                            let id = budget_categories::create_category(
                                conn,
                                &NewBudgetCategory {
                                    name: category.name.clone(),
                                    description: category.description.clone(),
                                    category_type: row.budget_type,
                                },
                            )?;
                            report.categories_created += 1;
                            (id, row.budget_type)
                        }
                    };
                    known.insert(category.name.clone(), resolved);
                }

                let (id, category_type) = &known[&category.name];
                if *category_type != row.budget_type {
                    let message = format!(
                        "Type {} does not match category '{}' of type {}",
                        row.budget_type, category.name, category_type
                    );
                    warn!(row = row.row_number, %message, "Skipping import row");
                    report.errors.push(ImportError {
                        row: row.row_number,
                        message,
                    });
                    continue;
                }
                Some(id.clone())
            }
        };

        if let Some(entry) = row.entry {
            budget_entries::create_entry(
                conn,
                &NewBudgetEntry {
                    name: entry.name,
                    amount_cents: entry.amount_cents,
                    frequency: entry.frequency,
                    entry_type: Some(row.budget_type),
                    budget_category_id: category_id,
                },
                row.budget_type,
            )?;
            report.entries_created += 1;
        }
    }

    for error in &report.errors {
        warn!(row = error.row, message = %error.message, "Import row rejected");
    }

    Ok(report)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}

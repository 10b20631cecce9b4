use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::amount::format_cents;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SummaryKind {
    Income,
    Expense,
    Surplus,
}

/// A derived total for one of income, expense or surplus. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    #[serde(rename = "type")]
    pub kind: SummaryKind,
    pub amount_cents: i128,
    pub amount: String,
    pub entry_count: usize,
}

impl BudgetSummary {
    pub fn new(kind: SummaryKind, amount_cents: i128, entry_count: usize) -> Self {
        Self {
            kind,
            amount_cents,
            amount: format_cents(amount_cents),
            entry_count,
        }
    }
}

/// Period that entry amounts are converted to before summing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Sum amounts as entered, ignoring frequency.
    #[default]
    Raw,
    Monthly,
    Yearly,
}

/// Which stored collection a summary is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarySource {
    #[default]
    Category,
    Entry,
}

/// Loosely typed entry as posted by a client. Type, amount and frequency are
/// kept as raw JSON so that unknown types and malformed amounts can be
/// tolerated instead of rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntry {
    #[serde(rename = "type", default)]
    pub entry_type: Value,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub frequency: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCategory {
    #[serde(rename = "type", default)]
    pub category_type: Value,
    #[serde(default)]
    pub entries: Option<Vec<RawEntry>>,
}

/// Body of a stateless summary request. `categories` wins when both are set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub categories: Option<Vec<RawCategory>>,
    #[serde(default)]
    pub entries: Option<Vec<RawEntry>>,
}

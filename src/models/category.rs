use serde::{Deserialize, Serialize};

use crate::amount::format_cents;
use crate::models::entry::BudgetEntry;

/// Whether a category (and its entries) brings money in or sends it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BudgetType {
    Income,
    Expense,
}

impl BudgetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetType::Income => "INCOME",
            BudgetType::Expense => "EXPENSE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Some(BudgetType::Income),
            "EXPENSE" => Some(BudgetType::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for BudgetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub category_type: BudgetType,
    pub created_at: String,
    pub updated_at: String,
}

/// A category together with the entries that belong to it.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithEntries {
    #[serde(flatten)]
    pub category: BudgetCategory,
    pub entries: Vec<BudgetEntry>,
    /// Summed in `i128` so that no number of entries can overflow.
    pub total_cents: i128,
    pub total: String,
}

impl CategoryWithEntries {
    pub fn new(category: BudgetCategory, entries: Vec<BudgetEntry>) -> Self {
        let total_cents = entries.iter().map(|e| i128::from(e.amount_cents)).sum();
        Self {
            category,
            entries,
            total_cents,
            total: format_cents(total_cents),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBudgetCategory {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub category_type: BudgetType,
}

/// Fields accepted when updating a category. Omitted name/description keep
/// their stored values; the type is always replaced.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetCategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub category_type: BudgetType,
}

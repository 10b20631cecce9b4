use serde::{Deserialize, Serialize};

use crate::models::category::BudgetType;

/// How often a recurring entry occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Bimonthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 6] = [
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Bimonthly,
        Frequency::Quarterly,
        Frequency::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "WEEKLY",
            Frequency::Biweekly => "BIWEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Bimonthly => "BIMONTHLY",
            Frequency::Quarterly => "QUARTERLY",
            Frequency::Yearly => "YEARLY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    /// Number of occurrences in a year. Bimonthly is every two months.
    pub fn periods_per_year(&self) -> i64 {
        match self {
            Frequency::Weekly => 52,
            Frequency::Biweekly => 26,
            Frequency::Monthly => 12,
            Frequency::Bimonthly => 6,
            Frequency::Quarterly => 4,
            Frequency::Yearly => 1,
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub id: String,
    pub name: String,
    pub amount_cents: i64,
    /// `amount_cents` rendered in major units, e.g. `"12.34"`.
    pub amount: String,
    pub frequency: Frequency,
    #[serde(rename = "type")]
    pub entry_type: BudgetType,
    pub budget_category_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBudgetEntry {
    pub name: String,
    #[serde(rename = "amount", deserialize_with = "crate::amount::deserialize_cents")]
    pub amount_cents: i64,
    pub frequency: Frequency,
    /// Inherited from the owning category when omitted.
    #[serde(rename = "type", default)]
    pub entry_type: Option<BudgetType>,
    #[serde(default)]
    pub budget_category_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BudgetEntryUpdate {
    pub name: Option<String>,
    #[serde(
        rename = "amount",
        default,
        deserialize_with = "crate::amount::deserialize_optional_cents"
    )]
    pub amount_cents: Option<i64>,
    pub frequency: Frequency,
    #[serde(rename = "type", default)]
    pub entry_type: Option<BudgetType>,
}

//! Income, expense and surplus totals.
//!
//! Everything here is a pure function of its input. The same collection always
//! produces the same three summaries, in the order income, expense, surplus.

use serde_json::Value;

use crate::models::{
    BudgetEntry, BudgetSummary, BudgetType, CategoryWithEntries, Frequency, Period, RawCategory,
    RawEntry, SummaryKind,
};

/// An entry as seen by the aggregation.
pub trait SummaryEntry {
    /// `None` when the type is not one of income or expense.
    fn budget_type(&self) -> Option<BudgetType>;
    fn amount_cents(&self) -> i64;
    fn frequency(&self) -> Option<Frequency>;
}

/// A category carrying its entries. Entries are counted under the category's
/// type, not their own.
pub trait SummaryCategory {
    type Entry: SummaryEntry;

    fn budget_type(&self) -> Option<BudgetType>;
    fn entries(&self) -> &[Self::Entry];
}

impl SummaryEntry for BudgetEntry {
    fn budget_type(&self) -> Option<BudgetType> {
        Some(self.entry_type)
    }

    fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    fn frequency(&self) -> Option<Frequency> {
        Some(self.frequency)
    }
}

impl SummaryCategory for CategoryWithEntries {
    type Entry = BudgetEntry;

    fn budget_type(&self) -> Option<BudgetType> {
        Some(self.category.category_type)
    }

    fn entries(&self) -> &[BudgetEntry] {
        &self.entries
    }
}

impl SummaryEntry for RawEntry {
    fn budget_type(&self) -> Option<BudgetType> {
        strict_type(&self.entry_type)
    }

    fn amount_cents(&self) -> i64 {
        crate::amount::lossy_cents(&self.amount)
    }

    fn frequency(&self) -> Option<Frequency> {
        serde_json::from_value(self.frequency.clone()).ok()
    }
}

impl SummaryCategory for RawCategory {
    type Entry = RawEntry;

    fn budget_type(&self) -> Option<BudgetType> {
        strict_type(&self.category_type)
    }

    fn entries(&self) -> &[RawEntry] {
        self.entries.as_deref().unwrap_or_default()
    }
}

/// Only the exact strings `"INCOME"` and `"EXPENSE"` count.
fn strict_type(value: &Value) -> Option<BudgetType> {
    match value {
        Value::String(_) => serde_json::from_value(value.clone()).ok(),
        _ => None,
    }
}

/// Running sums. Each term is an `i64` amount scaled by at most 52, so an
/// `i128` accumulator stays exact for any realistic number of entries.
#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    income_cents: i128,
    income_count: usize,
    expense_cents: i128,
    expense_count: usize,
}

impl Totals {
    fn add(&mut self, kind: Option<BudgetType>, cents: i128) {
        match kind {
            Some(BudgetType::Income) => {
                self.income_cents += cents;
                self.income_count += 1;
            }
            Some(BudgetType::Expense) => {
                self.expense_cents += cents;
                self.expense_count += 1;
            }
            None => {}
        }
    }

    fn into_summaries(self) -> [BudgetSummary; 3] {
        [
            BudgetSummary::new(SummaryKind::Income, self.income_cents, self.income_count),
            BudgetSummary::new(SummaryKind::Expense, self.expense_cents, self.expense_count),
            BudgetSummary::new(
                SummaryKind::Surplus,
                self.income_cents - self.expense_cents,
                0,
            ),
        ]
    }
}

/// Summarize a flat list of entries, each counted under its own type.
///
/// `None` is treated as an empty list.
pub fn summarize_entries<E: SummaryEntry>(
    entries: Option<&[E]>,
    period: Period,
) -> [BudgetSummary; 3] {
    let mut totals = Totals::default();
    for entry in entries.unwrap_or_default() {
        let cents = normalize_cents(entry.amount_cents(), entry.frequency(), period);
        totals.add(entry.budget_type(), cents);
    }
    totals.into_summaries()
}

/// Summarize categories by adding up the entries nested in each of them.
///
/// `None` is treated as an empty list.
pub fn summarize_categories<C: SummaryCategory>(
    categories: Option<&[C]>,
    period: Period,
) -> [BudgetSummary; 3] {
    let mut totals = Totals::default();
    for category in categories.unwrap_or_default() {
        let kind = category.budget_type();
        for entry in category.entries() {
            let cents = normalize_cents(entry.amount_cents(), entry.frequency(), period);
            totals.add(kind, cents);
        }
    }
    totals.into_summaries()
}

/// Convert an amount occurring at `frequency` into its equivalent over
/// `period`. Unknown frequencies are treated as monthly. Monthly results are
/// rounded half away from zero to the cent.
pub fn normalize_cents(amount_cents: i64, frequency: Option<Frequency>, period: Period) -> i128 {
    let amount = i128::from(amount_cents);
    let per_year = i128::from(frequency.unwrap_or(Frequency::Monthly).periods_per_year());
    match period {
        Period::Raw => amount,
        Period::Yearly => amount * per_year,
        Period::Monthly => div_round(amount * per_year, 12),
    }
}

fn div_round(n: i128, d: i128) -> i128 {
    let q = n / d;
    let r = n % d;
    if 2 * r.abs() >= d {
        q + n.signum()
    } else {
        q
    }
}

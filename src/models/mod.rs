pub mod category;
pub mod entry;
pub mod summary;

pub use category::{
    BudgetCategory, BudgetCategoryUpdate, BudgetType, CategoryWithEntries, NewBudgetCategory,
};
pub use entry::{BudgetEntry, BudgetEntryUpdate, Frequency, NewBudgetEntry};
pub use summary::{
    BudgetSummary, Period, RawCategory, RawEntry, SummaryKind, SummaryRequest, SummarySource,
};

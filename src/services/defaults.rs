use rusqlite::Connection;
use tracing::info;

use crate::db::queries::budget_categories;
use crate::models::{BudgetType, NewBudgetCategory};

/// The starter set offered to a new user: one income category and the
/// commonly forgotten monthly expense groups.
pub const DEFAULT_CATEGORIES: &[(&str, &str, BudgetType)] = &[
    ("Income", "Paycheck, side hustles, etc.", BudgetType::Income),
    ("Food", "Groceries but exclude restaurants", BudgetType::Expense),
    ("Health and Fitness", "Gym and medical expenses", BudgetType::Expense),
    ("Housing", "Rent or mortgage", BudgetType::Expense),
    ("Insurance", "Car, health, home, life insurance", BudgetType::Expense),
    (
        "Lifestyle and Entertainment",
        "Dining out, movies, concerts, hobbies, streaming services, subscriptions, travel",
        BudgetType::Expense,
    ),
    (
        "Personal",
        "Clothing, haircuts, personal care, pocket change",
        BudgetType::Expense,
    ),
    ("Pets", "Food, vet, grooming", BudgetType::Expense),
    (
        "Transportation",
        "Gas, public transportation, car maintenance, car payment",
        BudgetType::Expense,
    ),
    (
        "Utilities",
        "Gas, electric, water, internet, phone, trash",
        BudgetType::Expense,
    ),
    ("Giving", "Donations", BudgetType::Expense),
    (
        "Savings",
        "Emergency fund, retirement, and large purchases",
        BudgetType::Expense,
    ),
];

/// Create the default categories if there are none yet. Returns how many were
/// created, which is zero when categories already exist.
pub fn seed_default_categories(conn: &Connection) -> rusqlite::Result<usize> {
    if budget_categories::count_categories(conn)? > 0 {
        return Ok(0);
    }

    for (name, description, category_type) in DEFAULT_CATEGORIES {
        budget_categories::create_category(
            conn,
            &NewBudgetCategory {
                name: name.to_string(),
                description: description.to_string(),
                category_type: *category_type,
            },
        )?;
    }

    info!(count = DEFAULT_CATEGORIES.len(), "Seeded default budget categories");
    Ok(DEFAULT_CATEGORIES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use std::path::Path;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, Path::new("migrations")).unwrap();
        conn
    }

    #[test]
    fn test_seed_creates_defaults_once() {
        let conn = conn();
        assert_eq!(seed_default_categories(&conn).unwrap(), 12);
        assert_eq!(seed_default_categories(&conn).unwrap(), 0);
        assert_eq!(budget_categories::count_categories(&conn).unwrap(), 12);
    }

    #[test]
    fn test_seed_lists_income_first() {
        let conn = conn();
        seed_default_categories(&conn).unwrap();

        let categories = budget_categories::list_categories(&conn).unwrap();
        assert_eq!(categories[0].name, "Income");
        assert_eq!(categories[0].category_type, BudgetType::Income);
        assert_eq!(categories[1].name, "Food");
        assert_eq!(categories[11].name, "Utilities");
    }
}

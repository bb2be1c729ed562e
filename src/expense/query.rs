//! Sorting and totaling over expense records.
//!
//! Both operate on the typed record values, never on rendered cell text, so
//! their results cannot drift from what the table displays.

use serde::Deserialize;

use super::models::Expense;

/// The orderings the expenses page offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SortKey {
    /// Largest amounts first.
    Amount,
    /// Earliest dates first.
    Date,
}

impl SortKey {
    pub(crate) fn as_query_value(self) -> &'static str {
        match self {
            SortKey::Amount => "amount",
            SortKey::Date => "date",
        }
    }
}

/// Reorder `expenses` in place by `key`.
///
/// Without a sort key the records stay in the order the backend supplied.
pub(crate) fn sort_expenses(expenses: &mut [Expense], key: SortKey) {
    match key {
        SortKey::Amount => expenses.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
        SortKey::Date => expenses.sort_by_key(|expense| expense.date),
    }
}

/// The sum of the `amount` field over `expenses`.
pub(crate) fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

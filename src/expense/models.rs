//! The expense record and its table-row view-model.

use serde::Deserialize;
use time::Date;

use crate::endpoints;

/// One expense record, as served by the backend.
///
/// The backend is the sole owner of these records. The view never mutates
/// them, it only renders the latest snapshot; the one mutation a user can
/// trigger, deletion, is delegated entirely to the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Expense {
    /// The ID of the expense, used only to address the backend's delete endpoint.
    pub id: i64,
    /// A text description of what the money was spent on.
    pub description: String,
    /// The amount of money spent.
    pub amount: f64,
    /// The day the expense happened.
    pub date: Date,
    /// An optional free-text category label.
    pub category: Option<String>,
}

/// Renders an expense as a table row.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExpenseTableRow {
    /// A text description of what the money was spent on.
    pub(crate) description: String,
    /// The amount of money spent.
    pub(crate) amount: f64,
    /// The day the expense happened.
    pub(crate) date: Date,
    /// An optional free-text category label, rendered as an empty cell when absent.
    pub(crate) category: Option<String>,
    /// Whether the row is visible under the active date filter. Hidden rows
    /// are still rendered, with their display suppressed.
    pub(crate) visible: bool,
    /// The backend endpoint the row's delete form posts to.
    pub(crate) delete_url: String,
}

impl ExpenseTableRow {
    pub(crate) fn new_from_expense(
        expense: Expense,
        backend_url: &str,
        filter_date: Option<Date>,
    ) -> Self {
        let visible = filter_date.is_none_or(|date| date == expense.date);

        Self {
            description: expense.description,
            amount: expense.amount,
            date: expense.date,
            category: expense.category,
            visible,
            delete_url: endpoints::delete_expense_url(backend_url, expense.id),
        }
    }
}

//! Fetching and rendering of the expense records owned by the backend.
//!
//! Every page served by this module follows the same cycle: fetch the
//! backend's current records, derive the requested view from the typed
//! records, render the whole page. Nothing is cached between cycles.

mod client;
mod expenses_page;
mod models;
mod new_expense_page;
mod query;
mod view;

pub use client::ExpenseClient;
pub use expenses_page::get_expenses_page;
pub use models::Expense;
pub use new_expense_page::get_new_expense_page;

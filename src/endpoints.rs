//! The application's page URIs and the paths of the backend it renders.

/// The root route which redirects to the expenses page.
pub const ROOT: &str = "/";
/// The page that displays the expense table.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page with the form for recording a new expense.
pub const NEW_EXPENSE_VIEW: &str = "/expenses/new";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The backend resource that lists the current expense records as JSON.
pub const BACKEND_EXPENSES: &str = "/expenses";
/// The backend endpoint that accepts a new expense as a form submission.
pub const BACKEND_ADD: &str = "/add";

/// Join one of the backend's paths onto its base URL.
pub fn backend_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// The backend endpoint that deletes the expense with `id`.
///
/// The delete control posts here directly, so the URL must be absolute.
pub fn delete_expense_url(base_url: &str, id: i64) -> String {
    format!("{}/delete/{id}", base_url.trim_end_matches('/'))
}

//! Implements a struct that holds the state of the server.

use crate::{Error, expense::ExpenseClient};

/// The state of the server.
///
/// The server owns no records: all state is the address of the backend
/// service and the client used to read its current snapshot.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The base URL of the backend service that owns the expense records.
    pub backend_url: String,

    /// The client used to fetch the current expense records.
    pub expense_client: ExpenseClient,
}

impl AppState {
    /// Create a new [AppState] for the backend at `backend_url`.
    ///
    /// Trailing slashes are trimmed so that the rest of the application can
    /// join the backend's paths onto the base URL directly.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(backend_url: &str) -> Result<Self, Error> {
        let backend_url = backend_url.trim_end_matches('/').to_owned();
        let expense_client = ExpenseClient::new(&backend_url)?;

        Ok(Self {
            backend_url,
            expense_client,
        })
    }
}

#[cfg(test)]
mod app_state_tests {
    use super::AppState;

    #[test]
    fn trims_trailing_slash_from_backend_url() {
        let state = AppState::new("http://localhost:5000/").unwrap();

        assert_eq!(state.backend_url, "http://localhost:5000");
    }
}

//! The client that fetches the current expense records from the backend.

use crate::{Error, endpoints};

use super::models::Expense;

/// Fetches the backend's current expense records.
///
/// Each call is an independent snapshot read: nothing is cached between
/// calls, and there are no retries and no timeouts. Failures are reported to
/// the caller, which is expected to log them and carry on without records.
#[derive(Debug, Clone)]
pub struct ExpenseClient {
    http: reqwest::Client,
    expenses_url: String,
}

impl ExpenseClient {
    /// Create a client for the backend at `backend_url`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(backend_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|error| Error::HttpClient(error.to_string()))?;

        Ok(Self {
            http,
            expenses_url: endpoints::backend_url(backend_url, endpoints::BACKEND_EXPENSES),
        })
    }

    /// Fetch the current expense records, in the order the backend supplies
    /// them.
    ///
    /// # Errors
    /// Returns an error if the request does not complete, the backend
    /// answers with an error status, or the body cannot be parsed as a list
    /// of expense records.
    pub async fn fetch_expenses(&self) -> Result<Vec<Expense>, Error> {
        let response = self
            .http
            .get(&self.expenses_url)
            .send()
            .await?
            .error_for_status()?;

        let expenses = response.json().await?;

        Ok(expenses)
    }
}

#[cfg(test)]
mod expense_client_tests {
    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;
    use time::macros::date;

    use crate::{Error, test_utils::spawn_backend};

    use super::ExpenseClient;

    #[tokio::test]
    async fn fetches_expenses_in_backend_order() {
        let backend = Router::new().route(
            "/expenses",
            get(|| async {
                Json(json!([
                    {
                        "id": 1,
                        "description": "Groceries",
                        "amount": 50.0,
                        "date": "2025-09-10",
                        "category": "Food"
                    },
                    {
                        "id": 2,
                        "description": "Taxi",
                        "amount": 12.0,
                        "date": "2025-09-11",
                        "category": "Transport"
                    }
                ]))
            }),
        );
        let addr = spawn_backend(backend).await;
        let client = ExpenseClient::new(&format!("http://{addr}")).unwrap();

        let expenses = client.fetch_expenses().await.unwrap();

        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].id, 1);
        assert_eq!(expenses[0].description, "Groceries");
        assert_eq!(expenses[0].amount, 50.0);
        assert_eq!(expenses[0].date, date!(2025 - 09 - 10));
        assert_eq!(expenses[0].category.as_deref(), Some("Food"));
        assert_eq!(expenses[1].id, 2);
    }

    #[tokio::test]
    async fn missing_category_parses_as_none() {
        let backend = Router::new().route(
            "/expenses",
            get(|| async {
                Json(json!([
                    {"id": 1, "description": "Taxi", "amount": 12.0, "date": "2025-09-11"}
                ]))
            }),
        );
        let addr = spawn_backend(backend).await;
        let client = ExpenseClient::new(&format!("http://{addr}")).unwrap();

        let expenses = client.fetch_expenses().await.unwrap();

        assert_eq!(expenses[0].category, None);
    }

    #[tokio::test]
    async fn error_status_is_reported_as_request_error() {
        let backend = Router::new().route(
            "/expenses",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let addr = spawn_backend(backend).await;
        let client = ExpenseClient::new(&format!("http://{addr}")).unwrap();

        let result = client.fetch_expenses().await;

        assert!(matches!(result, Err(Error::BackendRequest(_))));
    }

    #[tokio::test]
    async fn unparsable_body_is_reported_as_response_error() {
        let backend = Router::new().route("/expenses", get(|| async { "not json" }));
        let addr = spawn_backend(backend).await;
        let client = ExpenseClient::new(&format!("http://{addr}")).unwrap();

        let result = client.fetch_expenses().await;

        assert!(matches!(result, Err(Error::BackendResponse(_))));
    }

    #[tokio::test]
    async fn unreachable_backend_is_reported_as_request_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ExpenseClient::new(&format!("http://{addr}")).unwrap();

        let result = client.fetch_expenses().await;

        assert!(matches!(result, Err(Error::BackendRequest(_))));
    }
}

//! Defines the route handler for the page that displays the expense table.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{AppState, alert::Alert};

use super::{
    client::ExpenseClient,
    models::ExpenseTableRow,
    query::{SortKey, sort_expenses, total_amount},
    view::{ExpensesView, expenses_view},
};

/// The query parameters the expenses page accepts.
#[derive(Debug, Default, Deserialize)]
pub struct ExpensesQuery {
    /// The date rows must match to stay visible. An empty string is the
    /// "filter pressed with no date" case and triggers an alert instead of
    /// a fetch.
    filter_date: Option<String>,
    /// The requested row ordering.
    sort: Option<SortKey>,
}

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesViewState {
    /// The client used to fetch the current expense records.
    expense_client: ExpenseClient,
    /// The base URL of the backend, used to address its delete endpoint.
    backend_url: String,
}

impl FromRef<AppState> for ExpensesViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_client: state.expense_client.clone(),
            backend_url: state.backend_url.clone(),
        }
    }
}

const FILTER_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]");

enum FilterDecision {
    /// No filter requested, show every row.
    NoFilter,
    /// Hide rows whose date differs from the given one.
    Filter(Date),
    /// Do not fetch at all, render the page with this alert.
    Alert(Alert),
}

fn parse_filter_date(filter_date: Option<&str>) -> FilterDecision {
    match filter_date {
        None => FilterDecision::NoFilter,
        Some("") => FilterDecision::Alert(Alert::error("Enter a date to filter.")),
        Some(value) => match Date::parse(value, FILTER_DATE_FORMAT) {
            Ok(date) => FilterDecision::Filter(date),
            Err(error) => {
                tracing::warn!("Could not parse filter date {value:?}: {error}");
                FilterDecision::Alert(Alert::error(&format!(
                    "'{value}' is not a valid filter date."
                )))
            }
        },
    }
}

/// Render the expense table, fetched fresh from the backend.
///
/// Every request is its own fetch/render cycle: the handler fetches the
/// backend's current records, derives the filtered and sorted view from the
/// typed records, and rebuilds the whole page. A fetch failure is logged and
/// renders the empty table; it is never surfaced to the user.
pub async fn get_expenses_page(
    State(state): State<ExpensesViewState>,
    Query(query): Query<ExpensesQuery>,
) -> Response {
    let filter_date = match parse_filter_date(query.filter_date.as_deref()) {
        FilterDecision::NoFilter => None,
        FilterDecision::Filter(date) => Some(date),
        FilterDecision::Alert(alert) => {
            // The only validation in the system: no usable date, no fetch.
            return expenses_view(ExpensesView {
                rows: Vec::new(),
                total: 0.0,
                filter_date: None,
                sort: query.sort,
                alert: Some(alert),
            })
            .into_response();
        }
    };

    let mut expenses = match state.expense_client.fetch_expenses().await {
        Ok(expenses) => expenses,
        Err(error) => {
            tracing::error!("Could not fetch expenses: {error}");
            Vec::new()
        }
    };

    if let Some(sort) = query.sort {
        sort_expenses(&mut expenses, sort);
    }

    // The total covers every fetched record; filtering only hides rows.
    let total = total_amount(&expenses);
    let rows = expenses
        .into_iter()
        .map(|expense| ExpenseTableRow::new_from_expense(expense, &state.backend_url, filter_date))
        .collect();

    expenses_view(ExpensesView {
        rows,
        total,
        filter_date: query.filter_date.as_deref(),
        sort: query.sort,
        alert: None,
    })
    .into_response()
}

#[cfg(test)]
mod expenses_page_tests {
    use std::{
        net::SocketAddr,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use axum::{
        Json, Router,
        extract::{FromRef, Query, State},
        http::StatusCode,
        routing::get,
    };
    use scraper::{ElementRef, Html, Selector};
    use serde_json::{Value, json};

    use crate::{
        AppState,
        expense::query::SortKey,
        test_utils::{assert_valid_html, parse_html, spawn_backend},
    };

    use super::{ExpensesQuery, ExpensesViewState, get_expenses_page};

    fn state_for(addr: SocketAddr) -> ExpensesViewState {
        let app_state = AppState::new(&format!("http://{addr}")).unwrap();

        ExpensesViewState::from_ref(&app_state)
    }

    async fn backend_with(expenses: Value) -> SocketAddr {
        let router = Router::new().route(
            "/expenses",
            get(move || {
                let expenses = expenses.clone();
                async move { Json(expenses) }
            }),
        );

        spawn_backend(router).await
    }

    fn sample_expenses() -> Value {
        json!([
            {
                "id": 1,
                "description": "Groceries",
                "amount": 10.0,
                "date": "2024-01-01",
                "category": "Food"
            },
            {
                "id": 2,
                "description": "Taxi",
                "amount": 5.5,
                "date": "2024-02-02"
            }
        ])
    }

    fn expense_rows(html: &Html) -> Vec<ElementRef<'_>> {
        let row_selector = Selector::parse("tbody tr[data-expense-row='true']").unwrap();

        html.select(&row_selector).collect()
    }

    #[track_caller]
    fn cell_text(row: ElementRef<'_>, data_attr: &str) -> String {
        let cell_selector = Selector::parse(&format!("td[{data_attr}='true']")).unwrap();
        let cell = row
            .select(&cell_selector)
            .next()
            .unwrap_or_else(|| panic!("No {data_attr} cell in row"));

        cell.text().collect::<String>().trim().to_owned()
    }

    #[track_caller]
    fn total_text(html: &Html) -> String {
        let total_selector = Selector::parse("span[data-total-amount='true']").unwrap();
        let total = html
            .select(&total_selector)
            .next()
            .expect("No total element");

        total.text().collect::<String>().trim().to_owned()
    }

    #[tokio::test]
    async fn renders_one_row_per_record_in_backend_order() {
        let addr = backend_with(sample_expenses()).await;

        let response = get_expenses_page(
            State(state_for(addr)),
            Query(ExpensesQuery::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html(response).await;
        assert_valid_html(&html);

        let rows = expense_rows(&html);
        assert_eq!(rows.len(), 2);

        let descriptions: Vec<String> = rows
            .iter()
            .map(|row| {
                let td_selector = Selector::parse("td").unwrap();
                let first_cell = row.select(&td_selector).next().expect("Row without cells");
                first_cell.text().collect::<String>().trim().to_owned()
            })
            .collect();
        assert_eq!(descriptions, ["Groceries", "Taxi"]);
    }

    #[tokio::test]
    async fn absent_category_renders_as_empty_string() {
        let addr = backend_with(sample_expenses()).await;

        let response = get_expenses_page(
            State(state_for(addr)),
            Query(ExpensesQuery::default()),
        )
        .await;

        let html = parse_html(response).await;
        let rows = expense_rows(&html);

        assert_eq!(cell_text(rows[0], "data-category-cell"), "Food");
        assert_eq!(cell_text(rows[1], "data-category-cell"), "");
    }

    #[tokio::test]
    async fn total_is_the_two_decimal_sum_of_amounts() {
        let addr = backend_with(sample_expenses()).await;

        let response = get_expenses_page(
            State(state_for(addr)),
            Query(ExpensesQuery::default()),
        )
        .await;

        let html = parse_html(response).await;

        assert_eq!(total_text(&html), "15.50");
    }

    #[tokio::test]
    async fn sort_by_amount_renders_largest_first() {
        let addr = backend_with(json!([
            {"id": 1, "description": "A", "amount": 5.0, "date": "2024-01-01"},
            {"id": 2, "description": "B", "amount": 20.0, "date": "2024-01-02"},
            {"id": 3, "description": "C", "amount": 1.0, "date": "2024-01-03"}
        ]))
        .await;

        let response = get_expenses_page(
            State(state_for(addr)),
            Query(ExpensesQuery {
                filter_date: None,
                sort: Some(SortKey::Amount),
            }),
        )
        .await;

        let html = parse_html(response).await;
        let amounts: Vec<String> = expense_rows(&html)
            .into_iter()
            .map(|row| cell_text(row, "data-amount-cell"))
            .collect();

        assert_eq!(amounts, ["20.00", "5.00", "1.00"]);
    }

    #[tokio::test]
    async fn sort_by_date_renders_earliest_first() {
        let addr = backend_with(json!([
            {"id": 1, "description": "Later", "amount": 1.0, "date": "2024-03-01"},
            {"id": 2, "description": "Earlier", "amount": 2.0, "date": "2024-01-01"}
        ]))
        .await;

        let response = get_expenses_page(
            State(state_for(addr)),
            Query(ExpensesQuery {
                filter_date: None,
                sort: Some(SortKey::Date),
            }),
        )
        .await;

        let html = parse_html(response).await;
        let dates: Vec<String> = expense_rows(&html)
            .into_iter()
            .map(|row| cell_text(row, "data-date-cell"))
            .collect();

        assert_eq!(dates, ["2024-01-01", "2024-03-01"]);
    }

    #[tokio::test]
    async fn filter_hides_non_matching_rows_without_removing_them() {
        let addr = backend_with(sample_expenses()).await;

        let response = get_expenses_page(
            State(state_for(addr)),
            Query(ExpensesQuery {
                filter_date: Some("2024-01-01".to_owned()),
                sort: None,
            }),
        )
        .await;

        let html = parse_html(response).await;
        let rows = expense_rows(&html);

        assert_eq!(rows.len(), 2, "filtered rows must stay in the document");
        assert_eq!(rows[0].value().attr("style"), None);
        assert_eq!(rows[1].value().attr("style"), Some("display: none"));
        // Filtering hides rows but the total still covers every record.
        assert_eq!(total_text(&html), "15.50");
    }

    #[tokio::test]
    async fn empty_filter_date_alerts_without_fetching() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_route = hits.clone();
        let router = Router::new().route(
            "/expenses",
            get(move || {
                let hits = hits_in_route.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(json!([]))
                }
            }),
        );
        let addr = spawn_backend(router).await;

        let response = get_expenses_page(
            State(state_for(addr)),
            Query(ExpensesQuery {
                filter_date: Some(String::new()),
                sort: None,
            }),
        )
        .await;

        let html = parse_html(response).await;
        let alert_selector = Selector::parse("[data-alert='true']").unwrap();
        let alert = html
            .select(&alert_selector)
            .next()
            .expect("No alert rendered");
        assert_eq!(
            alert.text().collect::<String>().trim(),
            "Enter a date to filter."
        );

        assert_eq!(hits.load(Ordering::SeqCst), 0, "No fetch may be triggered");
    }

    #[tokio::test]
    async fn unparsable_filter_date_alerts_without_fetching() {
        let addr = backend_with(sample_expenses()).await;

        let response = get_expenses_page(
            State(state_for(addr)),
            Query(ExpensesQuery {
                filter_date: Some("not-a-date".to_owned()),
                sort: None,
            }),
        )
        .await;

        let html = parse_html(response).await;
        let alert_selector = Selector::parse("[data-alert='true']").unwrap();
        assert!(html.select(&alert_selector).next().is_some());
        assert!(expense_rows(&html).is_empty());
    }

    #[tokio::test]
    async fn backend_failure_renders_empty_table() {
        let router = Router::new().route(
            "/expenses",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let addr = spawn_backend(router).await;

        let response = get_expenses_page(
            State(state_for(addr)),
            Query(ExpensesQuery::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html(response).await;
        assert_valid_html(&html);

        assert!(expense_rows(&html).is_empty());
        let empty_selector = Selector::parse("td[data-empty-state='true']").unwrap();
        assert!(html.select(&empty_selector).next().is_some());
        assert_eq!(total_text(&html), "0.00");
    }

    #[tokio::test]
    async fn delete_form_targets_backend_delete_endpoint() {
        let addr = backend_with(sample_expenses()).await;

        let response = get_expenses_page(
            State(state_for(addr)),
            Query(ExpensesQuery::default()),
        )
        .await;

        let html = parse_html(response).await;
        let form_selector = Selector::parse("tbody form").unwrap();
        let form = html.select(&form_selector).next().expect("No delete form");

        assert_eq!(form.value().attr("method"), Some("post"));
        assert_eq!(
            form.value().attr("action"),
            Some(format!("http://{addr}/delete/1").as_str())
        );
    }
}

use axum::{http::StatusCode, response::Response};

use crate::html::{error_view, render};

/// The fallback route handler for requests that match no page.
pub async fn get_404_not_found() -> Response {
    render(
        StatusCode::NOT_FOUND,
        error_view(
            "Page Not Found",
            "404",
            "Sorry, this page does not exist.",
            "Check the address, or head back to the expenses page.",
        ),
    )
}

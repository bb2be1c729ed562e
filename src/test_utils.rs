//! Helpers shared between the test modules.

use std::net::SocketAddr;

use axum::{Router, response::Response};
use scraper::Html;

/// Serve `router` on an ephemeral local port, standing in for the expense
/// tracker backend. Returns the address the stub is listening on.
pub(crate) async fn spawn_backend(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test backend");
    let addr = listener
        .local_addr()
        .expect("Could not get test backend address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test backend stopped unexpectedly");
    });

    addr
}

/// Read the full body of `response` and parse it as an HTML document.
pub(crate) async fn parse_html(response: Response) -> Html {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Could not get response body");
    let text = String::from_utf8_lossy(&body).to_string();

    Html::parse_document(&text)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

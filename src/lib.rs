//! Spendview is a web view for a small personal expense tracker.
//!
//! This library provides a server that renders the expense records held by a
//! separate backend service as HTML pages. It stores nothing itself: every
//! page request fetches the backend's current records over HTTP and rebuilds
//! the table from that snapshot, so the rendered page never holds state
//! between interactions.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod endpoints;
mod expense;
mod html;
mod logging;
mod navigation;
mod not_found;
mod routing;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use expense::{Expense, ExpenseClient};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The HTTP client for talking to the backend could not be constructed.
    #[error("could not create the backend HTTP client: {0}")]
    HttpClient(String),

    /// The request for the current expense records did not complete, or the
    /// backend answered with an error status.
    #[error("could not fetch expenses from the backend: {0}")]
    BackendRequest(String),

    /// The backend responded, but the body could not be read as a list of
    /// expense records.
    #[error("could not parse the backend response as expense records: {0}")]
    BackendResponse(String),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Error::BackendResponse(value.to_string())
        } else {
            Error::BackendRequest(value.to_string())
        }
    }
}

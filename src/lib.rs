//! Sales Insights is a JSON API for exploring a month of product sales.
//!
//! The API serves a searchable, paginated list of sale transactions along with
//! summary statistics, a price histogram and a category breakdown for any
//! calendar month. The whole data set is loaded from a remote JSON snapshot.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod db;
mod endpoints;
mod logging;
mod month;
mod pagination;
mod routing;
mod seed;
mod statistics;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::parse_month;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use seed::{DEFAULT_SEED_URL, SeedClient, load_seed_data, replace_transactions};
pub use transaction::{SQLiteTransactionStore, Transaction, TransactionStore};

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
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request did not include the `month` query parameter.
    #[error("the query parameter \"month\" is required")]
    MissingMonth,

    /// The `month` query parameter is not a full, capitalised English month
    /// name such as "March".
    #[error("\"{0}\" is not a valid month name")]
    InvalidMonth(String),

    /// The query string could not be deserialized, e.g. `page=abc`.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// Page numbers start at one.
    #[error("page must be at least 1")]
    InvalidPage,

    /// The requested page size is zero.
    #[error("perPage must be at least 1")]
    InvalidPageSize,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A background task running a store query panicked or was cancelled.
    #[error("a query task failed: {0}")]
    TaskFailed(String),

    /// The seed snapshot could not be downloaded.
    ///
    /// The message is shown to the client since only operators call the
    /// initialize endpoint.
    #[error("could not fetch seed data: {0}")]
    SeedFetch(String),

    /// A record in the seed snapshot is missing a required field or has a
    /// value of the wrong type.
    #[error("invalid seed record: {0}")]
    InvalidSeedRecord(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        Error::SqlError(value)
    }
}

impl Error {
    /// The HTTP status code to send to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingMonth
            | Error::InvalidMonth(_)
            | Error::InvalidQuery(_)
            | Error::InvalidPage
            | Error::InvalidPageSize => StatusCode::BAD_REQUEST,
            Error::SeedFetch(_) | Error::InvalidSeedRecord(_) => StatusCode::BAD_GATEWAY,
            Error::SqlError(_) | Error::DatabaseLockError | Error::TaskFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message that is safe to show to the client.
    ///
    /// Internal errors are replaced with a generic message, the details only
    /// go to the server logs.
    pub fn client_message(&self) -> String {
        match self {
            Error::SqlError(_) | Error::DatabaseLockError | Error::TaskFailed(_) => {
                "an unexpected error occurred".to_owned()
            }
            error => error.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}

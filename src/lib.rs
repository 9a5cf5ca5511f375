//! Transaction Tracker is a small JSON API for recording income and expense
//! transactions.
//!
//! This library provides the REST API, the SQLite backed transaction store and
//! the helpers needed to run the server.

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
mod database_id;
mod db;
pub mod endpoints;
mod logging;
mod method_not_allowed;
mod not_found;
mod routing;
mod transaction;

pub use app_state::AppState;
pub use database_id::TransactionId;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, REQUEST_BODY_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    NewTransaction, RowsAffected, SQLiteTransactionStore, Transaction, TransactionForm,
    TransactionStore, TransactionType,
};

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
    /// The request body could not be parsed as a transaction.
    ///
    /// Callers should pass in the parser's description of the problem.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// The request body could not be buffered, e.g. because it was too large.
    #[error("Could not read request body: {0}")]
    UnreadableRequestBody(String),

    /// A path parameter could not be extracted from the request URL.
    ///
    /// Holds the extractor's description of the problem, which already
    /// reads like "Invalid URL: ...".
    #[error("{0}")]
    InvalidPath(String),

    /// A required transaction field was missing or empty, or the amount was
    /// not a positive number.
    #[error("All fields are required and amount must be greater than 0")]
    MissingFields,

    /// The transaction type was something other than income or expense.
    #[error("Transaction type must be 'income' or 'expense'")]
    InvalidTransactionType(String),

    /// The transaction ID in the request path was not an integer.
    #[error("Invalid transaction ID: {0}")]
    InvalidTransactionId(String),

    /// No stored transactions have the requested type.
    #[error("No transactions found for this type")]
    NoTransactionsOfType(String),

    /// Tried to update or delete a transaction that is not in the database.
    #[error("Transaction not found")]
    TransactionNotFound(TransactionId),

    /// A statement could not be executed or a row could not be decoded.
    ///
    /// The message is shown to the client, so it should not contain anything
    /// more sensitive than the driver's error text.
    #[error("Query error: {0}")]
    QueryError(String),

    /// The database accepted a new transaction but did not report its ID.
    #[error("Error accessing the ID of the transaction: {0}")]
    IdentityError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The blocking task running a store operation panicked or was cancelled.
    #[error("Store task failed: {0}")]
    StoreTaskFailed(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::QueryError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let message = self.to_string();

        match self {
            Error::InvalidJson(_)
            | Error::UnreadableRequestBody(_)
            | Error::InvalidPath(_)
            | Error::MissingFields
            | Error::InvalidTransactionType(_)
            | Error::InvalidTransactionId(_) => {
                tracing::debug!("Rejected invalid request: {message}");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Error::NoTransactionsOfType(_) | Error::TransactionNotFound(_) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            Error::QueryError(_)
            | Error::IdentityError(_)
            | Error::DatabaseLockError
            | Error::StoreTaskFailed(_) => {
                tracing::error!("An unexpected error occurred: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
        }
    }
}

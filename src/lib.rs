//! A REST API that records monetary transactions and reports statistics over
//! the transactions made in the last 60 seconds.
//!
//! The core of the library is the [transaction] module: the
//! [Transaction](transaction::Transaction) model, the
//! [TransactionStore](transaction::TransactionStore) it lives in and the
//! [Statistics](transaction::Statistics) computed over it.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use time::OffsetDateTime;
use tokio::signal;

mod app_state;
pub mod endpoints;
mod logging;
mod routing;
pub mod transaction;

pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, MAX_REQUEST_BODY_BYTES, logging_middleware};
pub use routing::build_router;

use crate::transaction::TransactionId;

/// How long in-flight requests get to finish once shutdown has been requested.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Wait for ctrl+c or SIGTERM and then tell the server behind `handle` to stop
/// accepting connections, giving in-flight requests [SHUTDOWN_GRACE_PERIOD]
/// to complete.
///
/// The transaction store lives in memory, so every recorded transaction is
/// dropped when the server exits.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let signal_name = wait_for_shutdown_signal().await;

    tracing::info!(
        "Received {signal_name}, shutting down within {}s",
        SHUTDOWN_GRACE_PERIOD.as_secs()
    );
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
}

/// Resolve with the name of the first shutdown signal received.
async fn wait_for_shutdown_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for ctrl+c: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not listen for SIGTERM: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "ctrl+c",
        _ = terminate => "SIGTERM",
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An amount that is NaN or infinite was used to create a transaction.
    #[error("amount must be a finite number, got {0}")]
    NonFiniteAmount(f64),

    /// A negative amount was used to create a transaction.
    #[error("amount cannot be negative, got {0}")]
    NegativeAmount(f64),

    /// A timestamp in the future was used to create a transaction.
    ///
    /// Transactions record events that have already happened, therefore future
    /// timestamps are not allowed.
    #[error("transaction timestamp cannot be in the future, got {0}")]
    FutureTimestamp(OffsetDateTime),

    /// A transaction with the same ID is already in the store.
    #[error("a transaction with the ID {0} already exists")]
    DuplicateTransactionId(TransactionId),

    /// The request body could not be parsed.
    ///
    /// Holds a description of what was wrong with the request.
    #[error("invalid transaction data: {0}")]
    MalformedRequest(String),

    /// The request was rejected before its body could be parsed, e.g. because
    /// it was too large or had the wrong content type.
    #[error("{message}")]
    RequestRejected {
        /// The status code to respond with.
        status: StatusCode,
        /// A description of why the request was rejected.
        message: String,
    },

    /// The lock for the transaction store was poisoned by a panicking thread.
    #[error("could not acquire the transaction store lock")]
    StoreLockError,
}

impl Error {
    /// Whether the error is a well-formed request that breaks a business rule.
    pub fn is_business_rule_violation(&self) -> bool {
        matches!(self, Error::NegativeAmount(_) | Error::FutureTimestamp(_))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NegativeAmount(_) | Error::FutureTimestamp(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Error::MalformedRequest(_) | Error::NonFiniteAmount(_) => StatusCode::BAD_REQUEST,
            Error::RequestRejected { status, .. } => *status,
            Error::DuplicateTransactionId(_) => StatusCode::CONFLICT,
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response();
            }
        };

        tracing::debug!("Rejecting request with {}: {}", status, self);

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

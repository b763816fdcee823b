//! The endpoint for recording a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    transaction::{Transaction, TransactionStore, create_transaction},
};

/// The JSON body for creating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    /// The amount of money, must not be negative.
    pub amount: f64,
    /// When the transaction happened as an RFC 3339 string, must not be in the future.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// A route handler for creating a new transaction.
///
/// Responds with 201 and the stored transaction on success, 422 if the
/// transaction breaks a business rule and 400 if the body could not be parsed.
pub async fn create_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let Json(request) = payload.map_err(rejection_to_error)?;

    let transaction =
        create_transaction(&state.transaction_store, request.amount, request.timestamp)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Bodies that could not be deserialized are malformed requests, any other
/// rejection keeps the status that axum chose for it.
fn rejection_to_error(rejection: JsonRejection) -> Error {
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            Error::MalformedRequest(rejection.body_text())
        }
        rejection => Error::RequestRejected {
            status: rejection.status(),
            message: rejection.body_text(),
        },
    }
}

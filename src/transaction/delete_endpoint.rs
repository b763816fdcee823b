//! The endpoint for clearing all transactions.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    transaction::{TransactionStore, delete_all_transactions},
};

/// The confirmation returned after deleting all transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAllResponse {
    /// A human readable confirmation.
    pub message: String,
}

/// A route handler for deleting all transactions.
///
/// Always responds with 200, including when there was nothing to delete.
pub async fn delete_all_transactions_endpoint<T>(
    State(state): State<AppState<T>>,
) -> Result<Json<DeleteAllResponse>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    delete_all_transactions(&state.transaction_store)?;

    Ok(Json(DeleteAllResponse {
        message: "All transactions deleted successfully".to_owned(),
    }))
}

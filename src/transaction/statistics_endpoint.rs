//! The endpoint for the statistics of recent transactions.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    transaction::{Statistics, TransactionStore, get_statistics},
};

/// A route handler for getting the statistics of the transactions in the
/// last 60 seconds.
pub async fn get_statistics_endpoint<T>(
    State(state): State<AppState<T>>,
) -> Result<Json<Statistics>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    get_statistics(&state.transaction_store).map(Json)
}

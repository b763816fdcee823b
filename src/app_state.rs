//! Implements a struct that holds the state of the REST server.

use crate::transaction::TransactionStore;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<T>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    /// The store for managing [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
}

impl<T> AppState<T>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    /// Create a new [AppState] around `transaction_store`.
    pub fn new(transaction_store: T) -> Self {
        Self { transaction_store }
    }
}

//! Transactions and the statistics computed over them.
//!
//! This module contains everything related to transactions:
//! - The [Transaction] model and the rules that guard its creation
//! - The [TransactionStore] trait and its in-memory implementation
//! - Aggregation of [Statistics] over a set of transactions
//! - The operations and HTTP endpoints that tie these together

mod core;
mod create_endpoint;
mod delete_endpoint;
mod operations;
mod statistics;
mod statistics_endpoint;
mod store;

pub use self::core::{Transaction, TransactionId};
pub use create_endpoint::{CreateTransactionRequest, create_transaction_endpoint};
pub use delete_endpoint::{DeleteAllResponse, delete_all_transactions_endpoint};
pub use operations::{
    STATISTICS_WINDOW, create_transaction, delete_all_transactions, get_statistics,
    get_statistics_at,
};
pub use statistics::{Statistics, aggregate};
pub use statistics_endpoint::get_statistics_endpoint;
pub use store::{InMemoryTransactionStore, TransactionStore};

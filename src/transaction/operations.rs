//! The operations that the HTTP layer performs on transactions.

use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    transaction::{
        Transaction,
        statistics::{Statistics, aggregate},
        store::TransactionStore,
    },
};

/// How far back from the current time transactions count towards [get_statistics].
pub const STATISTICS_WINDOW: Duration = Duration::seconds(60);

/// Validate and store a new transaction.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if `amount` is less than zero,
/// - [Error::FutureTimestamp] if `timestamp` is later than the current time,
/// - or any error returned by `store` when saving the transaction.
pub fn create_transaction<S>(
    store: &S,
    amount: f64,
    timestamp: OffsetDateTime,
) -> Result<Transaction, Error>
where
    S: TransactionStore + ?Sized,
{
    let transaction = Transaction::new(amount, timestamp, None)?;
    let transaction = store.save(transaction)?;

    tracing::debug!("Created transaction {}", transaction.id());

    Ok(transaction)
}

/// Remove all transactions from `store`.
///
/// Clearing an empty store is not an error.
pub fn delete_all_transactions<S>(store: &S) -> Result<(), Error>
where
    S: TransactionStore + ?Sized,
{
    store.delete_all()?;

    tracing::debug!("Deleted all transactions");

    Ok(())
}

/// Get the statistics for the transactions in the last [STATISTICS_WINDOW].
pub fn get_statistics<S>(store: &S) -> Result<Statistics, Error>
where
    S: TransactionStore + ?Sized,
{
    get_statistics_at(store, OffsetDateTime::now_utc())
}

/// Get the statistics for the transactions in `[now - STATISTICS_WINDOW, now]`.
pub fn get_statistics_at<S>(store: &S, now: OffsetDateTime) -> Result<Statistics, Error>
where
    S: TransactionStore + ?Sized,
{
    let transactions = store.find_by_time_range(now - STATISTICS_WINDOW, now)?;
    let statistics = aggregate(&transactions);

    tracing::debug!("Statistics for window ending at {now}: {statistics:?}");

    Ok(statistics)
}

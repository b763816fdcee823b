//! Defines the transaction store trait and an in-memory implementation.

use std::sync::{Arc, RwLock};

use time::OffsetDateTime;

use crate::{Error, transaction::Transaction};

/// Handles the storage and retrieval of transactions.
///
/// Implementers must make each operation atomic with respect to the others:
/// readers never see a half-applied save or clear.
pub trait TransactionStore {
    /// Add `transaction` to the store and return the stored value.
    ///
    /// # Errors
    /// Returns [Error::DuplicateTransactionId] if a transaction with the same
    /// ID is already in the store.
    fn save(&self, transaction: Transaction) -> Result<Transaction, Error>;

    /// Get a snapshot of all stored transactions in the order they were saved.
    fn find_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Get the transactions with a timestamp in `[start, end]` (inclusive),
    /// in the order they were saved.
    fn find_by_time_range(
        &self,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<Vec<Transaction>, Error>;

    /// Remove every transaction from the store.
    fn delete_all(&self) -> Result<(), Error>;

    /// The number of stored transactions.
    fn count(&self) -> Result<usize, Error>;
}

/// Stores transactions in memory behind a reader-writer lock.
///
/// Cloning the store is cheap and the clones share the same transactions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryTransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn save(&self, transaction: Transaction) -> Result<Transaction, Error> {
        let mut transactions = self
            .transactions
            .write()
            .map_err(|_| Error::StoreLockError)?;

        if transactions
            .iter()
            .any(|existing| existing.id() == transaction.id())
        {
            return Err(Error::DuplicateTransactionId(transaction.id()));
        }

        transactions.push(transaction.clone());

        Ok(transaction)
    }

    fn find_all(&self) -> Result<Vec<Transaction>, Error> {
        self.transactions
            .read()
            .map(|transactions| transactions.clone())
            .map_err(|_| Error::StoreLockError)
    }

    fn find_by_time_range(
        &self,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<Vec<Transaction>, Error> {
        let transactions = self
            .transactions
            .read()
            .map_err(|_| Error::StoreLockError)?;

        Ok(transactions
            .iter()
            .filter(|transaction| (start..=end).contains(&transaction.timestamp()))
            .cloned()
            .collect())
    }

    fn delete_all(&self) -> Result<(), Error> {
        self.transactions
            .write()
            .map(|mut transactions| transactions.clear())
            .map_err(|_| Error::StoreLockError)
    }

    fn count(&self) -> Result<usize, Error> {
        self.transactions
            .read()
            .map(|transactions| transactions.len())
            .map_err(|_| Error::StoreLockError)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use time::{Duration, OffsetDateTime, macros::datetime};

    use crate::{
        Error,
        transaction::{Transaction, TransactionId},
    };

    use super::{InMemoryTransactionStore, TransactionStore};

    fn transaction_at(amount: f64, timestamp: OffsetDateTime) -> Transaction {
        Transaction::new(amount, timestamp, None).expect("Could not create transaction")
    }

    #[test]
    fn new_store_is_empty() {
        let store = InMemoryTransactionStore::new();

        assert_eq!(store.count(), Ok(0));
        assert_eq!(store.find_all(), Ok(Vec::new()));
    }

    #[test]
    fn save_returns_stored_transaction() {
        let store = InMemoryTransactionStore::new();
        let transaction = transaction_at(12.5, OffsetDateTime::now_utc());

        let saved = store.save(transaction.clone()).unwrap();

        assert_eq!(saved, transaction);
        assert_eq!(store.find_all(), Ok(vec![transaction]));
    }

    #[test]
    fn save_fails_on_duplicate_id() {
        let store = InMemoryTransactionStore::new();
        let id = TransactionId::new();
        let now = OffsetDateTime::now_utc();
        store
            .save(Transaction::new(1.0, now, Some(id)).unwrap())
            .unwrap();

        let result = store.save(Transaction::new(2.0, now, Some(id)).unwrap());

        assert_eq!(result, Err(Error::DuplicateTransactionId(id)));
        assert_eq!(store.count(), Ok(1));
    }

    #[test]
    fn find_all_preserves_insertion_order() {
        let store = InMemoryTransactionStore::new();
        let now = OffsetDateTime::now_utc();
        let want = vec![
            transaction_at(3.0, now - Duration::seconds(1)),
            transaction_at(1.0, now - Duration::seconds(30)),
            transaction_at(2.0, now - Duration::seconds(10)),
        ];
        for transaction in &want {
            store.save(transaction.clone()).unwrap();
        }

        let got = store.find_all().unwrap();

        assert_eq!(got, want);
    }

    #[test]
    fn find_all_returns_snapshot() {
        let store = InMemoryTransactionStore::new();
        store
            .save(transaction_at(1.0, OffsetDateTime::now_utc()))
            .unwrap();

        let snapshot = store.find_all().unwrap();
        store.delete_all().unwrap();

        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn find_by_time_range_is_inclusive() {
        let store = InMemoryTransactionStore::new();
        let start = datetime!(2024-01-15 10:00:00 UTC);
        let end = datetime!(2024-01-15 10:01:00 UTC);
        let before = transaction_at(1.0, start - Duration::milliseconds(1));
        let at_start = transaction_at(2.0, start);
        let inside = transaction_at(3.0, start + Duration::seconds(30));
        let at_end = transaction_at(4.0, end);
        let after = transaction_at(5.0, end + Duration::milliseconds(1));
        for transaction in [&before, &at_start, &inside, &at_end, &after] {
            store.save(transaction.clone()).unwrap();
        }

        let got = store.find_by_time_range(start, end).unwrap();

        assert_eq!(got, vec![at_start, inside, at_end]);
    }

    #[test]
    fn find_by_time_range_on_empty_store_is_empty() {
        let store = InMemoryTransactionStore::new();
        let now = OffsetDateTime::now_utc();

        let got = store.find_by_time_range(now - Duration::seconds(60), now);

        assert_eq!(got, Ok(Vec::new()));
    }

    #[test]
    fn find_by_time_range_with_no_matches_is_empty() {
        let store = InMemoryTransactionStore::new();
        let now = OffsetDateTime::now_utc();
        store
            .save(transaction_at(1.0, now - Duration::hours(1)))
            .unwrap();

        let got = store.find_by_time_range(now - Duration::seconds(60), now);

        assert_eq!(got, Ok(Vec::new()));
    }

    #[test]
    fn delete_all_clears_store() {
        let store = InMemoryTransactionStore::new();
        let now = OffsetDateTime::now_utc();
        for amount in [1.0, 2.0, 3.0] {
            store.save(transaction_at(amount, now)).unwrap();
        }

        store.delete_all().unwrap();

        assert_eq!(store.count(), Ok(0));
        assert_eq!(store.find_all(), Ok(Vec::new()));
    }

    #[test]
    fn delete_all_twice_is_ok() {
        let store = InMemoryTransactionStore::new();
        store
            .save(transaction_at(1.0, OffsetDateTime::now_utc()))
            .unwrap();

        assert_eq!(store.delete_all(), Ok(()));
        assert_eq!(store.delete_all(), Ok(()));
        assert_eq!(store.count(), Ok(0));
    }

    #[test]
    fn clones_share_transactions() {
        let store = InMemoryTransactionStore::new();
        let other = store.clone();

        other
            .save(transaction_at(1.0, OffsetDateTime::now_utc()))
            .unwrap();

        assert_eq!(store.count(), Ok(1));
    }

    #[test]
    fn concurrent_saves_are_all_stored_with_unique_ids() {
        const THREADS: usize = 8;
        const SAVES_PER_THREAD: usize = 250;
        let store = InMemoryTransactionStore::new();

        std::thread::scope(|scope| {
            for _ in 0..THREADS {
                scope.spawn(|| {
                    for i in 0..SAVES_PER_THREAD {
                        let transaction = transaction_at(i as f64, OffsetDateTime::now_utc());
                        store.save(transaction).expect("Could not save transaction");
                    }
                });
            }
        });

        let transactions = store.find_all().unwrap();
        let ids: HashSet<_> = transactions.iter().map(Transaction::id).collect();
        assert_eq!(store.count(), Ok(THREADS * SAVES_PER_THREAD));
        assert_eq!(ids.len(), THREADS * SAVES_PER_THREAD);
    }
}

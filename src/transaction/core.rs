//! Defines the core transaction model and the rules that guard its construction.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};
use uuid::Uuid;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// The unique identifier of a [Transaction].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Generate a new, random (UUID v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TransactionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A record of an amount of money and the time at which it changed hands.
///
/// Transactions are immutable once created. The only way to create one is
/// [Transaction::new], which validates the amount and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    amount: f64,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// If `id` is `None` a new random identifier is generated. The timestamp is
    /// stored in UTC.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonFiniteAmount] if `amount` is NaN or infinite,
    /// - [Error::NegativeAmount] if `amount` is less than zero,
    /// - or [Error::FutureTimestamp] if `timestamp` is later than the current time.
    pub fn new(
        amount: f64,
        timestamp: OffsetDateTime,
        id: Option<TransactionId>,
    ) -> Result<Self, Error> {
        if !amount.is_finite() {
            return Err(Error::NonFiniteAmount(amount));
        }

        if amount < 0.0 {
            return Err(Error::NegativeAmount(amount));
        }

        if timestamp > OffsetDateTime::now_utc() {
            return Err(Error::FutureTimestamp(timestamp));
        }

        Ok(Self {
            id: id.unwrap_or_default(),
            amount,
            timestamp: timestamp.to_offset(UtcOffset::UTC),
        })
    }

    /// The ID of the transaction.
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// The amount of money in this transaction.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// When the transaction happened.
    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// The number of seconds elapsed between the transaction and now.
    pub fn age_in_seconds(&self) -> f64 {
        (OffsetDateTime::now_utc() - self.timestamp).as_seconds_f64()
    }

    /// Whether the transaction happened no more than `seconds` seconds ago.
    pub fn is_within_last_seconds(&self, seconds: f64) -> bool {
        self.age_in_seconds() <= seconds
    }
}

//! Summary statistics over a set of transactions.

use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// Aggregate figures for a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// The number of transactions.
    pub count: usize,
    /// The total amount, rounded to two decimal places.
    pub sum: f64,
    /// The mean amount, rounded to two decimal places.
    pub avg: f64,
    /// The smallest amount.
    pub min: f64,
    /// The largest amount.
    pub max: f64,
}

impl Statistics {
    /// The statistics for no transactions, all fields zero.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Compute the [Statistics] for `transactions`.
///
/// The average is calculated from the unrounded sum so that rounding is only
/// applied once to each figure. Minimum and maximum are not rounded.
pub fn aggregate(transactions: &[Transaction]) -> Statistics {
    if transactions.is_empty() {
        return Statistics::empty();
    }

    let count = transactions.len();
    let (sum, min, max) = transactions.iter().map(Transaction::amount).fold(
        (0.0, f64::INFINITY, f64::NEG_INFINITY),
        |(sum, min, max), amount| (sum + amount, min.min(amount), max.max(amount)),
    );

    Statistics {
        count,
        sum: round_to_cents(sum),
        avg: round_to_cents(sum / count as f64),
        min,
        max,
    }
}

/// Round `value` to two decimal places, with halves rounded away from zero.
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

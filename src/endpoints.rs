//! The API endpoint URIs.

/// The collection of transactions: POST to create one, DELETE to clear all of them.
pub const TRANSACTIONS: &str = "/transactions";
/// The statistics for the transactions in the last 60 seconds.
pub const STATISTICS: &str = "/statistics";
/// Reports whether the server is up.
pub const HEALTH: &str = "/health";

//! Driving port for refunding transactions.

use async_trait::async_trait;

use crate::domain::{Error, Transaction, TransactionId};

/// Refund of a logged transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefundCommand: Send + Sync {
    /// Credit the buyer with the recorded line totals, reverse sold counters
    /// and flag the transaction as refunded. Returns the updated record.
    ///
    /// # Errors
    /// - `NotFound` when the transaction or its buyer no longer exists.
    /// - `AlreadyRefunded` on a second refund of the same transaction.
    /// - `StorageFailure` when a record cannot be read or written.
    async fn refund(&self, id: &TransactionId) -> Result<Transaction, Error>;
}

//! Driving port for reading the transaction log and its reports.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Error, Transaction};

/// Read access to the shared transaction log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionLogQuery: Send + Sync {
    /// Every transaction in append order.
    ///
    /// # Errors
    /// Returns a storage failure when the log cannot be loaded.
    async fn transactions(&self) -> Result<Vec<Transaction>, Error>;

    /// Non-refunded spend per user.
    ///
    /// # Errors
    /// Returns a storage failure when the log cannot be loaded.
    async fn report_by_user(&self) -> Result<BTreeMap<String, Decimal>, Error>;

    /// Non-refunded units sold per product.
    ///
    /// # Errors
    /// Returns a storage failure when the log cannot be loaded.
    async fn report_by_product(&self) -> Result<BTreeMap<String, u64>, Error>;
}

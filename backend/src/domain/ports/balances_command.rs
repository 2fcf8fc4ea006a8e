//! Driving port for changing balances directly.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Error, Menu};

/// Direct balance updates (top-ups and corrections).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BalancesCommand: Send + Sync {
    /// Set the balance of `name`, creating the person if needed.
    ///
    /// Any amount is accepted here, including negative ones; only orders
    /// enforce a floor. Returns the stored balance.
    ///
    /// # Errors
    /// Returns `InvalidRequest` for a blank name and a storage failure when
    /// the record cannot be written.
    async fn set_balance(&self, menu: Menu, name: &str, balance: Decimal)
    -> Result<Decimal, Error>;
}

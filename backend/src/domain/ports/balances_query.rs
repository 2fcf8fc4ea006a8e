//! Driving port for reading balances.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Balances, Error, Menu};

/// Read access to the prepaid balances of a menu.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BalancesQuery: Send + Sync {
    /// Every person and balance on `menu`.
    ///
    /// # Errors
    /// Returns a storage failure when the record cannot be loaded.
    async fn list_balances(&self, menu: Menu) -> Result<Balances, Error>;

    /// Balance of `name` on `menu`.
    ///
    /// # Errors
    /// Returns `NotFound` when the person has no balance on this menu.
    async fn balance(&self, menu: Menu, name: &str) -> Result<Decimal, Error>;
}

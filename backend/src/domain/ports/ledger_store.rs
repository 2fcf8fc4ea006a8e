//! Driven port for ledger persistence.
//!
//! A [`LedgerStore`] loads and saves whole records: the balances and
//! catalogue of each menu plus the shared transaction log. Saves replace the
//! record wholesale (last write wins) and must never leave a half-written
//! record behind. Records that were never written load as empty.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Balances, Catalogue, Menu, Transaction};

define_port_error! {
    /// Errors raised by ledger store adapters.
    pub enum LedgerStoreError {
        /// The record could not be read or written.
        Io { key: String, message: String } =>
            "ledger record {key} I/O failed: {message}",
        /// The stored record could not be decoded.
        Corrupt { key: String, message: String } =>
            "ledger record {key} is malformed: {message}",
    }
}

/// Port for loading and saving ledger records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Load the balances of `menu`.
    async fn load_balances(&self, menu: Menu) -> Result<Balances, LedgerStoreError>;

    /// Replace the balances of `menu`.
    async fn save_balances(&self, menu: Menu, balances: &Balances)
    -> Result<(), LedgerStoreError>;

    /// Load the catalogue of `menu`.
    async fn load_catalogue(&self, menu: Menu) -> Result<Catalogue, LedgerStoreError>;

    /// Replace the catalogue of `menu`.
    async fn save_catalogue(
        &self,
        menu: Menu,
        catalogue: &Catalogue,
    ) -> Result<(), LedgerStoreError>;

    /// Load the full transaction log in append order.
    async fn load_transactions(&self) -> Result<Vec<Transaction>, LedgerStoreError>;

    /// Replace the full transaction log.
    async fn save_transactions(&self, log: &[Transaction]) -> Result<(), LedgerStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn io_error_names_the_record() {
        let err = LedgerStoreError::io("catalogue:team", "permission denied");
        assert_eq!(
            err.to_string(),
            "ledger record catalogue:team I/O failed: permission denied"
        );
    }

    #[rstest]
    fn corrupt_error_names_the_record() {
        let err = LedgerStoreError::corrupt("transactions", "expected value at line 1");
        assert!(err.to_string().contains("transactions is malformed"));
    }
}

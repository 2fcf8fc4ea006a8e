//! In-process ledger store.
//!
//! Holds every record behind one async mutex. Used by tests and by the
//! server when `in_memory` is set; nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{LedgerStore, LedgerStoreError};
use crate::domain::{Balances, Catalogue, Menu, Transaction};

#[derive(Debug, Default)]
struct Records {
    balances: HashMap<Menu, Balances>,
    catalogues: HashMap<Menu, Catalogue>,
    transactions: Vec<Transaction>,
}

/// [`LedgerStore`] that keeps records in memory.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    records: Mutex<Records>,
}

impl InMemoryLedgerStore {
    /// Seed the balances of `menu`.
    #[must_use]
    pub fn with_balances(mut self, menu: Menu, balances: Balances) -> Self {
        self.records.get_mut().balances.insert(menu, balances);
        self
    }

    /// Seed the catalogue of `menu`.
    #[must_use]
    pub fn with_catalogue(mut self, menu: Menu, catalogue: Catalogue) -> Self {
        self.records.get_mut().catalogues.insert(menu, catalogue);
        self
    }

    /// Seed the transaction log.
    #[must_use]
    pub fn with_transactions(mut self, log: Vec<Transaction>) -> Self {
        self.records.get_mut().transactions = log;
        self
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn load_balances(&self, menu: Menu) -> Result<Balances, LedgerStoreError> {
        let records = self.records.lock().await;
        Ok(records.balances.get(&menu).cloned().unwrap_or_default())
    }

    async fn save_balances(
        &self,
        menu: Menu,
        balances: &Balances,
    ) -> Result<(), LedgerStoreError> {
        self.records
            .lock()
            .await
            .balances
            .insert(menu, balances.clone());
        Ok(())
    }

    async fn load_catalogue(&self, menu: Menu) -> Result<Catalogue, LedgerStoreError> {
        let records = self.records.lock().await;
        Ok(records.catalogues.get(&menu).cloned().unwrap_or_default())
    }

    async fn save_catalogue(
        &self,
        menu: Menu,
        catalogue: &Catalogue,
    ) -> Result<(), LedgerStoreError> {
        self.records
            .lock()
            .await
            .catalogues
            .insert(menu, catalogue.clone());
        Ok(())
    }

    async fn load_transactions(&self) -> Result<Vec<Transaction>, LedgerStoreError> {
        Ok(self.records.lock().await.transactions.clone())
    }

    async fn save_transactions(&self, log: &[Transaction]) -> Result<(), LedgerStoreError> {
        self.records.lock().await.transactions = log.to_vec();
        Ok(())
    }
}

//! Ledger service: the order, refund and reporting engine.
//!
//! One service instance serves both menus. Every read-modify-write sequence
//! runs under the mutex of the partition it touches; sequences that also
//! append to or rewrite the transaction log take the log mutex second, so
//! lock order is always menu then log. Plain reads take no lock because the
//! store replaces records atomically.
//!
//! Validation happens before the first save. A storage failure between two
//! saves leaves the earlier save in place; there is no rollback.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use rust_decimal::Decimal;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    BalancesCommand, BalancesQuery, CatalogueCommand, CatalogueQuery, LedgerStore,
    LedgerStoreError, OrderCommand, OrderReceipt, PlaceOrderRequest, ProductUpsert,
    RefundCommand, TransactionLogQuery,
};
use crate::domain::pricing::{amount_overflow, effective_quantities};
use crate::domain::{
    Balances, Catalogue, CatalogueEntry, Error, ItemRequest, Menu, PricedOrder, ResourceKind,
    Transaction, TransactionId, price_order, spend_by_user, units_by_product,
};

#[derive(Default)]
struct PartitionLocks {
    general: Mutex<()>,
    team: Mutex<()>,
    log: Mutex<()>,
}

impl PartitionLocks {
    fn menu(&self, menu: Menu) -> &Mutex<()> {
        match menu {
            Menu::General => &self.general,
            Menu::Team => &self.team,
        }
    }
}

/// Ledger engine implementing every driving port over a [`LedgerStore`].
#[derive(Clone)]
pub struct LedgerService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    locks: Arc<PartitionLocks>,
}

impl<S> LedgerService<S> {
    /// Create a service over `store`, timestamping records with `clock`.
    ///
    /// ```rust
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use tuckshop::domain::LedgerService;
    /// # use tuckshop::outbound::memory::InMemoryLedgerStore;
    /// let service = LedgerService::new(
    ///     Arc::new(InMemoryLedgerStore::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            locks: Arc::new(PartitionLocks::default()),
        }
    }
}

fn validate_name<'a>(value: &'a str, field: &str) -> Result<&'a str, Error> {
    if value.trim().is_empty() {
        return Err(
            Error::invalid_request(format!("{field} must not be blank")).with_details(json!({
                "field": field,
                "code": "blank_name",
            })),
        );
    }
    Ok(value)
}

fn fresh_transaction_id(clock: &dyn Clock, log: &[Transaction]) -> TransactionId {
    let mut rng = rand::thread_rng();
    loop {
        let id = TransactionId::generate(clock.utc(), &mut rng);
        if log.iter().all(|existing| existing.id != id) {
            return id;
        }
    }
}

impl<S> LedgerService<S>
where
    S: LedgerStore,
{
    fn map_store_error(error: LedgerStoreError) -> Error {
        match error {
            LedgerStoreError::Io { key, message } => {
                error!(record = %key, %message, "ledger store I/O failed");
                Error::storage_failure(format!("ledger record {key} is unavailable"))
            }
            LedgerStoreError::Corrupt { key, message } => {
                error!(record = %key, %message, "ledger record is malformed");
                Error::storage_failure(format!("ledger record {key} could not be decoded"))
            }
        }
    }

    async fn load_balances(&self, menu: Menu) -> Result<Balances, Error> {
        self.store
            .load_balances(menu)
            .await
            .map_err(Self::map_store_error)
    }

    async fn save_balances(&self, menu: Menu, balances: &Balances) -> Result<(), Error> {
        self.store
            .save_balances(menu, balances)
            .await
            .map_err(Self::map_store_error)
    }

    async fn load_catalogue(&self, menu: Menu) -> Result<Catalogue, Error> {
        self.store
            .load_catalogue(menu)
            .await
            .map_err(Self::map_store_error)
    }

    async fn save_catalogue(&self, menu: Menu, catalogue: &Catalogue) -> Result<(), Error> {
        self.store
            .save_catalogue(menu, catalogue)
            .await
            .map_err(Self::map_store_error)
    }

    async fn load_transactions(&self) -> Result<Vec<Transaction>, Error> {
        self.store
            .load_transactions()
            .await
            .map_err(Self::map_store_error)
    }

    async fn save_transactions(&self, log: &[Transaction]) -> Result<(), Error> {
        self.store
            .save_transactions(log)
            .await
            .map_err(Self::map_store_error)
    }

    async fn append_transaction(
        &self,
        menu: Menu,
        user: String,
        priced: PricedOrder,
        balance_after: Decimal,
    ) -> Result<Transaction, Error> {
        let _log_guard = self.locks.log.lock().await;
        let mut log = self.load_transactions().await?;
        let transaction = Transaction {
            id: fresh_transaction_id(self.clock.as_ref(), &log),
            timestamp: self.clock.utc(),
            menu,
            user,
            lines: priced.lines,
            total: priced.total,
            balance_after,
            refunded: false,
        };
        log.push(transaction.clone());
        self.save_transactions(&log).await?;
        Ok(transaction)
    }

    async fn find_transaction_menu(&self, id: &TransactionId) -> Result<Menu, Error> {
        self.load_transactions()
            .await?
            .into_iter()
            .find(|transaction| &transaction.id == id)
            .map(|transaction| transaction.menu)
            .ok_or_else(|| Error::missing(ResourceKind::Transaction, id.as_str()))
    }
}

#[async_trait]
impl<S> BalancesQuery for LedgerService<S>
where
    S: LedgerStore,
{
    async fn list_balances(&self, menu: Menu) -> Result<Balances, Error> {
        self.load_balances(menu).await
    }

    async fn balance(&self, menu: Menu, name: &str) -> Result<Decimal, Error> {
        self.load_balances(menu)
            .await?
            .get(name)
            .ok_or_else(|| Error::missing(ResourceKind::Person, name))
    }
}

#[async_trait]
impl<S> BalancesCommand for LedgerService<S>
where
    S: LedgerStore,
{
    async fn set_balance(
        &self,
        menu: Menu,
        name: &str,
        balance: Decimal,
    ) -> Result<Decimal, Error> {
        let name = validate_name(name, "name")?;
        let _guard = self.locks.menu(menu).lock().await;
        let mut balances = self.load_balances(menu).await?;
        balances.set(name, balance);
        self.save_balances(menu, &balances).await?;
        info!(%menu, person = name, %balance, "balance set");
        Ok(balance)
    }
}

#[async_trait]
impl<S> CatalogueQuery for LedgerService<S>
where
    S: LedgerStore,
{
    async fn catalogue(&self, menu: Menu) -> Result<Catalogue, Error> {
        self.load_catalogue(menu).await
    }
}

#[async_trait]
impl<S> CatalogueCommand for LedgerService<S>
where
    S: LedgerStore,
{
    async fn upsert_product(
        &self,
        menu: Menu,
        product: ProductUpsert,
    ) -> Result<CatalogueEntry, Error> {
        let ProductUpsert { name, price, image } = product;
        validate_name(&name, "name")?;
        if price < Decimal::ZERO {
            return Err(
                Error::invalid_request("price must not be negative").with_details(json!({
                    "field": "price",
                    "value": price,
                    "code": "negative_price",
                })),
            );
        }

        let _guard = self.locks.menu(menu).lock().await;
        let mut catalogue = self.load_catalogue(menu).await?;
        let entry = match catalogue.get_mut(&name) {
            Some(existing) => {
                existing.price = price;
                if image.is_some() {
                    existing.image = image;
                }
                existing.clone()
            }
            None => {
                let created = CatalogueEntry {
                    price,
                    sold: 0,
                    image,
                };
                catalogue.insert(name.clone(), created.clone());
                created
            }
        };
        self.save_catalogue(menu, &catalogue).await?;
        info!(%menu, product = %name, %price, "product upserted");
        Ok(entry)
    }

    async fn delete_product(&self, menu: Menu, name: &str) -> Result<(), Error> {
        let _guard = self.locks.menu(menu).lock().await;
        let mut catalogue = self.load_catalogue(menu).await?;
        if catalogue.remove(name).is_none() {
            return Err(Error::missing(ResourceKind::Product, name));
        }
        self.save_catalogue(menu, &catalogue).await?;
        info!(%menu, product = name, "product deleted");
        Ok(())
    }

    async fn record_sales(
        &self,
        menu: Menu,
        items: Vec<ItemRequest>,
    ) -> Result<Catalogue, Error> {
        let sales = effective_quantities(&items);
        let _guard = self.locks.menu(menu).lock().await;
        let mut catalogue = self.load_catalogue(menu).await?;
        if let Some((missing, _)) = sales
            .iter()
            .find(|(product, _)| !catalogue.contains(product))
        {
            return Err(Error::missing(ResourceKind::Product, *missing));
        }
        for (product, qty) in &sales {
            if let Some(entry) = catalogue.get_mut(product) {
                entry.record_sale(*qty);
            }
        }
        self.save_catalogue(menu, &catalogue).await?;
        info!(%menu, products = sales.len(), "sold counters updated");
        Ok(catalogue)
    }
}

#[async_trait]
impl<S> OrderCommand for LedgerService<S>
where
    S: LedgerStore,
{
    async fn place_order(&self, request: PlaceOrderRequest) -> Result<OrderReceipt, Error> {
        let PlaceOrderRequest { menu, buyer, items } = request;
        let _guard = self.locks.menu(menu).lock().await;

        let mut balances = self.load_balances(menu).await?;
        let current = balances
            .get(&buyer)
            .ok_or_else(|| Error::missing(ResourceKind::Person, &buyer))?;
        let mut catalogue = self.load_catalogue(menu).await?;
        let priced = price_order(&catalogue, &items)?;

        if priced.total > current {
            debug!(%menu, %buyer, total = %priced.total, balance = %current, "order rejected");
            return Err(Error::insufficient_funds(format!(
                "{buyer} has {current} but the order costs {}",
                priced.total
            ))
            .with_details(json!({
                "buyer": buyer,
                "balance": current,
                "total": priced.total,
            })));
        }

        let balance = current
            .checked_sub(priced.total)
            .ok_or_else(|| amount_overflow("balance"))?;
        for line in &priced.lines {
            if let Some(entry) = catalogue.get_mut(&line.product) {
                entry.record_sale(line.qty);
            }
        }
        balances.set(buyer.clone(), balance);

        self.save_balances(menu, &balances).await?;
        self.save_catalogue(menu, &catalogue).await?;
        let transaction = self
            .append_transaction(menu, buyer, priced, balance)
            .await?;

        info!(
            %menu,
            transaction_id = %transaction.id,
            buyer = %transaction.user,
            total = %transaction.total,
            "order placed"
        );
        Ok(OrderReceipt {
            balance,
            transaction,
        })
    }
}

#[async_trait]
impl<S> RefundCommand for LedgerService<S>
where
    S: LedgerStore,
{
    async fn refund(&self, id: &TransactionId) -> Result<Transaction, Error> {
        let menu = self.find_transaction_menu(id).await?;
        let _guard = self.locks.menu(menu).lock().await;
        let _log_guard = self.locks.log.lock().await;

        // Re-read under the locks; a concurrent refund may have landed.
        let mut log = self.load_transactions().await?;
        let transaction = log
            .iter_mut()
            .find(|transaction| &transaction.id == id)
            .ok_or_else(|| Error::missing(ResourceKind::Transaction, id.as_str()))?;
        if transaction.refunded {
            return Err(
                Error::already_refunded(format!("transaction {id} was already refunded"))
                    .with_details(json!({ "id": id })),
            );
        }

        let repaired = transaction
            .repair_total()
            .map_err(|_| amount_overflow("lines"))?;
        if let Some(stored) = repaired {
            warn!(
                transaction_id = %id,
                %stored,
                recomputed = %transaction.total,
                "stored total disagreed with line items; repaired"
            );
        }
        let credit = transaction.total;

        let mut balances = self.load_balances(menu).await?;
        let current = balances
            .get(&transaction.user)
            .ok_or_else(|| Error::missing(ResourceKind::Person, &transaction.user))?;
        let credited = current
            .checked_add(credit)
            .ok_or_else(|| amount_overflow("balance"))?;
        balances.set(transaction.user.clone(), credited);

        let mut catalogue = self.load_catalogue(menu).await?;
        for line in &transaction.lines {
            match catalogue.get_mut(&line.product) {
                Some(entry) => entry.reverse_sale(line.qty),
                None => debug!(
                    transaction_id = %id,
                    product = %line.product,
                    "product no longer on the menu; sold counter not reversed"
                ),
            }
        }

        transaction.refunded = true;
        let refunded = transaction.clone();

        self.save_balances(menu, &balances).await?;
        self.save_catalogue(menu, &catalogue).await?;
        self.save_transactions(&log).await?;

        info!(%menu, transaction_id = %id, user = %refunded.user, %credit, "transaction refunded");
        Ok(refunded)
    }
}

#[async_trait]
impl<S> TransactionLogQuery for LedgerService<S>
where
    S: LedgerStore,
{
    async fn transactions(&self) -> Result<Vec<Transaction>, Error> {
        self.load_transactions().await
    }

    async fn report_by_user(&self) -> Result<BTreeMap<String, Decimal>, Error> {
        Ok(spend_by_user(&self.load_transactions().await?))
    }

    async fn report_by_product(&self) -> Result<BTreeMap<String, u64>, Error> {
        Ok(units_by_product(&self.load_transactions().await?))
    }
}

#[cfg(test)]
#[path = "ledger_service_tests.rs"]
mod tests;

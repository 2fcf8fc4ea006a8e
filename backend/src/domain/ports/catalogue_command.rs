//! Driving port for maintaining a menu catalogue.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Catalogue, CatalogueEntry, Error, ItemRequest, Menu};

/// Product to create or reprice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpsert {
    /// Product name, unique per menu.
    pub name: String,
    /// Unit price; must not be negative.
    pub price: Decimal,
    /// Image reference. `None` keeps whatever the entry already has.
    pub image: Option<String>,
}

/// Catalogue maintenance operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueCommand: Send + Sync {
    /// Create a product or update its price and image, keeping its sold
    /// counter.
    ///
    /// # Errors
    /// Returns `InvalidRequest` for a blank name or negative price.
    async fn upsert_product(
        &self,
        menu: Menu,
        product: ProductUpsert,
    ) -> Result<CatalogueEntry, Error>;

    /// Remove a product. Past transactions that mention it are untouched.
    ///
    /// # Errors
    /// Returns `NotFound` when the product is not on the menu.
    async fn delete_product(&self, menu: Menu, name: &str) -> Result<(), Error>;

    /// Add to the sold counters without recording a purchase.
    ///
    /// Either every product exists and all counters move, or nothing changes.
    ///
    /// # Errors
    /// Returns `NotFound` naming the first unknown product.
    async fn record_sales(&self, menu: Menu, items: Vec<ItemRequest>)
    -> Result<Catalogue, Error>;
}

//! Driving port for reading a menu catalogue.

use async_trait::async_trait;

use crate::domain::{Catalogue, Error, Menu};

/// Read access to the products on a menu.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    /// Current catalogue of `menu`.
    ///
    /// # Errors
    /// Returns a storage failure when the record cannot be loaded.
    async fn catalogue(&self, menu: Menu) -> Result<Catalogue, Error>;
}

//! Driving port for placing orders.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ItemRequest, Menu, Transaction};

/// Purchase against a buyer's prepaid balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrderRequest {
    /// Menu whose balances and catalogue are used.
    pub menu: Menu,
    /// Person paying for the order.
    pub buyer: String,
    /// Requested products in client order.
    pub items: Vec<ItemRequest>,
}

/// Outcome of a successful order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    /// Buyer balance after the debit.
    #[schema(value_type = f64)]
    pub balance: Decimal,
    /// The recorded transaction.
    pub transaction: Transaction,
}

/// Order placement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Debit the buyer, bump sold counters and log the transaction.
    ///
    /// Nothing is written unless every check passes.
    ///
    /// # Errors
    /// - `NotFound` when the buyer or a requested product is missing.
    /// - `InsufficientFunds` when the total exceeds the buyer's balance.
    /// - `StorageFailure` when a record cannot be read or written.
    async fn place_order(&self, request: PlaceOrderRequest) -> Result<OrderReceipt, Error>;
}

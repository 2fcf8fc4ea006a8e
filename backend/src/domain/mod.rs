//! Domain types and the ledger engine.
//!
//! Public surface:
//! - Error, ErrorCode: API error payload and stable identifiers.
//! - Menu, RecordKey: partitions and the records persisted per partition.
//! - Balances, Catalogue, CatalogueEntry: per-menu ledger state.
//! - Transaction, LineItem, TransactionId: transaction log records.
//! - LedgerService: implementation of every driving port in [`ports`].

pub mod error;
pub mod ledger;
mod ledger_service;
pub mod menu;
pub mod ports;
pub mod pricing;
pub mod reports;
pub mod trace_id;
pub mod transaction;

pub use self::error::{Error, ErrorCode, ResourceKind};
pub use self::ledger::{Balances, Catalogue, CatalogueEntry};
pub use self::ledger_service::LedgerService;
pub use self::menu::{Menu, ParseMenuError, RecordKey};
pub use self::pricing::{
    ItemRequest, PricedOrder, RequestedQuantity, item_requests_from_json, price_order,
};
pub use self::reports::{spend_by_user, units_by_product};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::transaction::{
    AmountOverflow, LineItem, TOTAL_EPSILON, Transaction, TransactionId, lines_total,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use tuckshop::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("nope"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;

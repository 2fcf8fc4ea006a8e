//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`) are what inbound adapters call;
//! the [`LedgerStore`] driven port is what persistence adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod balances_command;
mod balances_query;
mod catalogue_command;
mod catalogue_query;
mod ledger_store;
mod order_command;
mod refund_command;
mod transaction_log_query;

#[cfg(test)]
pub use balances_command::MockBalancesCommand;
pub use balances_command::BalancesCommand;
#[cfg(test)]
pub use balances_query::MockBalancesQuery;
pub use balances_query::BalancesQuery;
#[cfg(test)]
pub use catalogue_command::MockCatalogueCommand;
pub use catalogue_command::{CatalogueCommand, ProductUpsert};
#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
pub use catalogue_query::CatalogueQuery;
#[cfg(test)]
pub use ledger_store::MockLedgerStore;
pub use ledger_store::{LedgerStore, LedgerStoreError};
#[cfg(test)]
pub use order_command::MockOrderCommand;
pub use order_command::{OrderCommand, OrderReceipt, PlaceOrderRequest};
#[cfg(test)]
pub use refund_command::MockRefundCommand;
pub use refund_command::RefundCommand;
#[cfg(test)]
pub use transaction_log_query::MockTransactionLogQuery;
pub use transaction_log_query::TransactionLogQuery;

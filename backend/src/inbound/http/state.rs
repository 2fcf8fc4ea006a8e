//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised against mocks without touching storage.

use std::sync::Arc;

use crate::domain::LedgerService;
use crate::domain::ports::{
    BalancesCommand, BalancesQuery, CatalogueCommand, CatalogueQuery, LedgerStore, OrderCommand,
    RefundCommand, TransactionLogQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub balances: Arc<dyn BalancesCommand>,
    pub balances_query: Arc<dyn BalancesQuery>,
    pub catalogue: Arc<dyn CatalogueCommand>,
    pub catalogue_query: Arc<dyn CatalogueQuery>,
    pub orders: Arc<dyn OrderCommand>,
    pub refunds: Arc<dyn RefundCommand>,
    pub transactions: Arc<dyn TransactionLogQuery>,
}

impl<S> From<Arc<LedgerService<S>>> for HttpState
where
    S: LedgerStore + 'static,
{
    fn from(service: Arc<LedgerService<S>>) -> Self {
        Self {
            balances: service.clone(),
            balances_query: service.clone(),
            catalogue: service.clone(),
            catalogue_query: service.clone(),
            orders: service.clone(),
            refunds: service.clone(),
            transactions: service,
        }
    }
}

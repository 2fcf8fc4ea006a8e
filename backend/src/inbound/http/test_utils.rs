//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::test as actix_test;

use crate::domain::Error;
use crate::domain::ports::{
    MockBalancesCommand, MockBalancesQuery, MockCatalogueCommand, MockCatalogueQuery,
    MockOrderCommand, MockRefundCommand, MockTransactionLogQuery,
};
use crate::inbound::http::state::HttpState;

/// Build a state whose ports are mocks with no expectations.
///
/// Any port call a test did not arrange panics, so tests replace the ports
/// they exercise.
pub fn mocked_state() -> HttpState {
    HttpState {
        balances: Arc::new(MockBalancesCommand::new()),
        balances_query: Arc::new(MockBalancesQuery::new()),
        catalogue: Arc::new(MockCatalogueCommand::new()),
        catalogue_query: Arc::new(MockCatalogueQuery::new()),
        orders: Arc::new(MockOrderCommand::new()),
        refunds: Arc::new(MockRefundCommand::new()),
        transactions: Arc::new(MockTransactionLogQuery::new()),
    }
}

/// Decode an error payload from a test response.
pub async fn read_error(response: ServiceResponse) -> Error {
    actix_test::read_body_json(response).await
}

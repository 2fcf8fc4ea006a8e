//! HTTP inbound adapter exposing the ledger REST API.

pub mod balances;
pub mod catalogue;
pub mod error;
pub mod health;
pub mod orders;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod transactions;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every ledger route under the caller's scope.
///
/// JSON bodies that fail to parse are answered with an `invalid_request`
/// error rather than actix's plain-text default.
///
/// ```rust,no_run
/// use actix_web::{App, web};
/// use tuckshop::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// # let _ = app;
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(balances::list_people)
        .service(balances::get_person)
        .service(balances::set_person)
        .service(catalogue::list_products)
        .service(catalogue::upsert_product)
        .service(catalogue::record_sales)
        .service(catalogue::delete_product)
        .service(orders::place_order)
        .service(transactions::list_transactions)
        .service(transactions::refund_transaction)
        .service(transactions::report_users)
        .service(transactions::report_products);
}

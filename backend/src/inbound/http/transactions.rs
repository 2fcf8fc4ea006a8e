//! Transaction log, refund and report HTTP handlers.
//!
//! ```text
//! GET  /api/v1/transactions
//! POST /api/v1/transactions/{id}/refund
//! GET  /api/v1/reports/users
//! GET  /api/v1/reports/products
//! ```

use std::collections::BTreeMap;

use actix_web::{get, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Transaction, TransactionId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Non-refunded spend per user.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, PartialEq)]
#[serde(transparent)]
#[schema(value_type = Object, example = json!({"alice": 6.5}))]
pub struct UserReport(BTreeMap<String, Decimal>);

/// Non-refunded units sold per product.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, PartialEq)]
#[serde(transparent)]
#[schema(value_type = Object, example = json!({"soda": 4}))]
pub struct ProductReport(BTreeMap<String, u64>);

/// Return the full transaction log in append order.
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    responses(
        (status = 200, description = "Every recorded transaction", body = [Transaction]),
        (status = 503, description = "Ledger store unavailable", body = Error)
    ),
    tags = ["transactions"],
    operation_id = "listTransactions"
)]
#[get("/transactions")]
pub async fn list_transactions(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Transaction>>> {
    Ok(web::Json(state.transactions.transactions().await?))
}

/// Reverse a transaction: credit the buyer and restore sold counters.
#[utoipa::path(
    post,
    path = "/api/v1/transactions/{id}/refund",
    params(("id" = String, Path, description = "Transaction identifier")),
    responses(
        (status = 200, description = "Refunded transaction", body = Transaction),
        (status = 404, description = "Unknown transaction or buyer", body = Error),
        (status = 409, description = "Already refunded", body = Error),
        (status = 503, description = "Ledger store unavailable", body = Error)
    ),
    tags = ["transactions"],
    operation_id = "refundTransaction"
)]
#[post("/transactions/{id}/refund")]
pub async fn refund_transaction(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Transaction>> {
    let id = TransactionId::new(path.into_inner());
    Ok(web::Json(state.refunds.refund(&id).await?))
}

/// Total spend per user, excluding refunds.
#[utoipa::path(
    get,
    path = "/api/v1/reports/users",
    responses(
        (status = 200, description = "Spend keyed by user", body = UserReport),
        (status = 503, description = "Ledger store unavailable", body = Error)
    ),
    tags = ["reports"],
    operation_id = "reportByUser"
)]
#[get("/reports/users")]
pub async fn report_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UserReport>> {
    Ok(web::Json(UserReport(state.transactions.report_by_user().await?)))
}

/// Total units per product, excluding refunds.
#[utoipa::path(
    get,
    path = "/api/v1/reports/products",
    responses(
        (status = 200, description = "Units keyed by product", body = ProductReport),
        (status = 503, description = "Ledger store unavailable", body = Error)
    ),
    tags = ["reports"],
    operation_id = "reportByProduct"
)]
#[get("/reports/products")]
pub async fn report_products(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ProductReport>> {
    Ok(web::Json(ProductReport(
        state.transactions.report_by_product().await?,
    )))
}

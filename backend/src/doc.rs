//! OpenAPI document for the ledger API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary for external tooling.

use utoipa::OpenApi;

use crate::domain::ports::OrderReceipt;
use crate::domain::{
    Balances, Catalogue, CatalogueEntry, Error, ErrorCode, LineItem, Menu, Transaction,
    TransactionId,
};
use crate::inbound::http::balances::{PersonBalance, SetBalanceRequest};
use crate::inbound::http::catalogue::{ProductResponse, RecordSalesRequest, UpsertProductRequest};
use crate::inbound::http::orders::PlaceOrderBody;
use crate::inbound::http::transactions::{ProductReport, UserReport};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tuckshop ledger API",
        description = "Prepaid balances, menu catalogues, orders, refunds and sales reports."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::balances::list_people,
        crate::inbound::http::balances::get_person,
        crate::inbound::http::balances::set_person,
        crate::inbound::http::catalogue::list_products,
        crate::inbound::http::catalogue::upsert_product,
        crate::inbound::http::catalogue::delete_product,
        crate::inbound::http::catalogue::record_sales,
        crate::inbound::http::orders::place_order,
        crate::inbound::http::transactions::list_transactions,
        crate::inbound::http::transactions::refund_transaction,
        crate::inbound::http::transactions::report_users,
        crate::inbound::http::transactions::report_products,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Menu,
        Balances,
        Catalogue,
        CatalogueEntry,
        LineItem,
        Transaction,
        TransactionId,
        OrderReceipt,
        PersonBalance,
        SetBalanceRequest,
        ProductResponse,
        UpsertProductRequest,
        RecordSalesRequest,
        PlaceOrderBody,
        UserReport,
        ProductReport,
    )),
    tags(
        (name = "balances", description = "Prepaid balances per menu"),
        (name = "catalogue", description = "Products and sold counters per menu"),
        (name = "orders", description = "Order placement"),
        (name = "transactions", description = "Transaction log and refunds"),
        (name = "reports", description = "Aggregates over non-refunded transactions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    #[rstest]
    #[case("/api/v1/menus/{menu}/orders")]
    #[case("/api/v1/transactions/{id}/refund")]
    #[case("/api/v1/reports/products")]
    #[case("/health/ready")]
    fn document_lists_ledger_paths(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn error_schema_exposes_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let Some(RefOr::T(Schema::Object(error))) = schemas.get("Error") else {
            panic!("expected Error object schema");
        };
        assert!(error.properties.contains_key("code"));
        assert!(error.properties.contains_key("message"));
        assert!(error.properties.contains_key("traceId"));
    }
}

//! Order placement HTTP handler.
//!
//! ```text
//! POST /api/v1/menus/{menu}/orders
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{OrderReceipt, PlaceOrderRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_items, parse_menu, require_name};

const BUYER: FieldName = FieldName::new("buyer");
const ITEMS: FieldName = FieldName::new("items");

/// Request payload for placing an order.
///
/// Quantities are whole, non-negative numbers or numeric strings. Anything
/// else, including fractions such as `1.5`, is treated as zero and the line
/// is dropped.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PlaceOrderBody {
    #[schema(example = "alice")]
    pub buyer: Option<String>,
    /// Product name to whole-unit quantity; fractional quantities count as zero.
    #[schema(value_type = Object, example = json!({"soda": 3}))]
    pub items: Option<Value>,
}

/// Charge a buyer for an order and append it to the transaction log.
#[utoipa::path(
    post,
    path = "/api/v1/menus/{menu}/orders",
    params(("menu" = String, Path, description = "general or team")),
    request_body = PlaceOrderBody,
    responses(
        (status = 201, description = "Order recorded", body = OrderReceipt),
        (status = 400, description = "Invalid request", body = Error),
        (status = 402, description = "Balance does not cover the total", body = Error),
        (status = 404, description = "Unknown buyer or product", body = Error),
        (status = 503, description = "Ledger store unavailable", body = Error)
    ),
    tags = ["orders"],
    operation_id = "placeOrder"
)]
#[post("/menus/{menu}/orders")]
pub async fn place_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<PlaceOrderBody>,
) -> ApiResult<HttpResponse> {
    let menu = parse_menu(&path)?;
    let PlaceOrderBody { buyer, items } = payload.into_inner();
    let buyer = require_name(buyer, BUYER)?;
    let items = parse_items(items, ITEMS)?;

    let receipt = state
        .orders
        .place_order(PlaceOrderRequest { menu, buyer, items })
        .await?;
    Ok(HttpResponse::Created().json(receipt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockOrderCommand;
    use crate::domain::{ErrorCode, Menu};
    use crate::inbound::http::test_utils::{mocked_state, read_error};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    #[rstest]
    #[actix_web::test]
    async fn insufficient_funds_maps_to_payment_required() {
        let mut orders = MockOrderCommand::new();
        orders
            .expect_place_order()
            .withf(|request| request.menu == Menu::General && request.buyer == "alice")
            .times(1)
            .return_once(|_| Err(Error::insufficient_funds("alice has 10 but the order costs 12")));
        let mut state = mocked_state();
        state.orders = Arc::new(orders);

        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(state)).service(place_order),
        )
        .await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/menus/general/orders")
                .set_json(json!({"buyer": "alice", "items": {"soda": 6}}))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(read_error(response).await.code(), ErrorCode::InsufficientFunds);
    }

    #[rstest]
    #[case::missing_items(json!({"buyer": "alice"}))]
    #[case::list_items(json!({"buyer": "alice", "items": ["soda"]}))]
    #[case::missing_buyer(json!({"items": {"soda": 1}}))]
    #[actix_web::test]
    async fn malformed_orders_are_rejected(#[case] body: Value) {
        let mut orders = MockOrderCommand::new();
        orders.expect_place_order().times(0);
        let mut state = mocked_state();
        state.orders = Arc::new(orders);

        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(state)).service(place_order),
        )
        .await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/menus/team/orders")
                .set_json(body)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

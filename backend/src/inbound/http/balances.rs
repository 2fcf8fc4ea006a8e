//! Prepaid balance HTTP handlers.
//!
//! ```text
//! GET /api/v1/menus/{menu}/people
//! GET /api/v1/menus/{menu}/people/{name}
//! PUT /api/v1/menus/{menu}/people
//! ```

use actix_web::{get, put, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Balances, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_amount, parse_menu, require_name};

const NAME: FieldName = FieldName::new("name");
const BALANCE: FieldName = FieldName::new("balance");

/// Request payload for setting a balance.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SetBalanceRequest {
    #[schema(example = "alice")]
    pub name: Option<String>,
    #[schema(value_type = f64, example = 10)]
    pub balance: Option<Value>,
}

/// One person's balance.
#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq)]
pub struct PersonBalance {
    pub name: String,
    #[schema(value_type = f64)]
    pub balance: Decimal,
}

/// List every balance on a menu.
#[utoipa::path(
    get,
    path = "/api/v1/menus/{menu}/people",
    params(("menu" = String, Path, description = "general or team")),
    responses(
        (status = 200, description = "Balances keyed by person", body = Balances),
        (status = 400, description = "Unknown menu", body = Error),
        (status = 503, description = "Ledger store unavailable", body = Error)
    ),
    tags = ["balances"],
    operation_id = "listBalances"
)]
#[get("/menus/{menu}/people")]
pub async fn list_people(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Balances>> {
    let menu = parse_menu(&path)?;
    let balances = state.balances_query.list_balances(menu).await?;
    Ok(web::Json(balances))
}

/// Fetch one person's balance.
#[utoipa::path(
    get,
    path = "/api/v1/menus/{menu}/people/{name}",
    params(
        ("menu" = String, Path, description = "general or team"),
        ("name" = String, Path, description = "Person name")
    ),
    responses(
        (status = 200, description = "Current balance", body = PersonBalance),
        (status = 400, description = "Unknown menu", body = Error),
        (status = 404, description = "No such person", body = Error)
    ),
    tags = ["balances"],
    operation_id = "getBalance"
)]
#[get("/menus/{menu}/people/{name}")]
pub async fn get_person(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<PersonBalance>> {
    let (menu, name) = path.into_inner();
    let menu = parse_menu(&menu)?;
    let balance = state.balances_query.balance(menu, &name).await?;
    Ok(web::Json(PersonBalance { name, balance }))
}

/// Create a person or overwrite their balance.
#[utoipa::path(
    put,
    path = "/api/v1/menus/{menu}/people",
    params(("menu" = String, Path, description = "general or team")),
    request_body = SetBalanceRequest,
    responses(
        (status = 200, description = "Stored balance", body = PersonBalance),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Ledger store unavailable", body = Error)
    ),
    tags = ["balances"],
    operation_id = "setBalance"
)]
#[put("/menus/{menu}/people")]
pub async fn set_person(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<SetBalanceRequest>,
) -> ApiResult<web::Json<PersonBalance>> {
    let menu = parse_menu(&path)?;
    let SetBalanceRequest { name, balance } = payload.into_inner();
    let name = require_name(name, NAME)?;
    let balance = parse_amount(balance, BALANCE)?;

    let balance = state.balances.set_balance(menu, &name, balance).await?;
    Ok(web::Json(PersonBalance { name, balance }))
}

//! Product catalogue HTTP handlers.
//!
//! ```text
//! GET    /api/v1/menus/{menu}/products
//! PUT    /api/v1/menus/{menu}/products
//! DELETE /api/v1/menus/{menu}/products/{name}
//! POST   /api/v1/menus/{menu}/products/sold
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::ProductUpsert;
use crate::domain::{Catalogue, CatalogueEntry, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_amount, parse_items, parse_menu, require_name,
};

const NAME: FieldName = FieldName::new("name");
const PRICE: FieldName = FieldName::new("price");
const ITEMS: FieldName = FieldName::new("items");

/// Request payload for creating or updating a product.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpsertProductRequest {
    #[schema(example = "soda")]
    pub name: Option<String>,
    #[schema(value_type = f64, example = 2.5)]
    pub price: Option<Value>,
    /// Image reference; omitted keeps the current one.
    pub image: Option<String>,
}

/// Request payload for recording sales without a purchase.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RecordSalesRequest {
    #[schema(value_type = Object, example = json!({"soda": 2}))]
    pub items: Option<Value>,
}

/// A product with its name.
#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq)]
pub struct ProductResponse {
    pub name: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub sold: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductResponse {
    fn new(name: String, entry: CatalogueEntry) -> Self {
        Self {
            name,
            price: entry.price,
            sold: entry.sold,
            image: entry.image,
        }
    }
}

/// Fetch the catalogue of a menu.
#[utoipa::path(
    get,
    path = "/api/v1/menus/{menu}/products",
    params(("menu" = String, Path, description = "general or team")),
    responses(
        (status = 200, description = "Products keyed by name", body = Catalogue),
        (status = 400, description = "Unknown menu", body = Error),
        (status = 503, description = "Ledger store unavailable", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "getCatalogue"
)]
#[get("/menus/{menu}/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Catalogue>> {
    let menu = parse_menu(&path)?;
    Ok(web::Json(state.catalogue_query.catalogue(menu).await?))
}

/// Create a product or change its price and image.
#[utoipa::path(
    put,
    path = "/api/v1/menus/{menu}/products",
    params(("menu" = String, Path, description = "general or team")),
    request_body = UpsertProductRequest,
    responses(
        (status = 200, description = "Stored product", body = ProductResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Ledger store unavailable", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "upsertProduct"
)]
#[put("/menus/{menu}/products")]
pub async fn upsert_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpsertProductRequest>,
) -> ApiResult<web::Json<ProductResponse>> {
    let menu = parse_menu(&path)?;
    let UpsertProductRequest { name, price, image } = payload.into_inner();
    let name = require_name(name, NAME)?;
    let price = parse_amount(price, PRICE)?;

    let entry = state
        .catalogue
        .upsert_product(
            menu,
            ProductUpsert {
                name: name.clone(),
                price,
                image,
            },
        )
        .await?;
    Ok(web::Json(ProductResponse::new(name, entry)))
}

/// Remove a product from a menu.
#[utoipa::path(
    delete,
    path = "/api/v1/menus/{menu}/products/{name}",
    params(
        ("menu" = String, Path, description = "general or team"),
        ("name" = String, Path, description = "Product name")
    ),
    responses(
        (status = 204, description = "Product removed"),
        (status = 400, description = "Unknown menu", body = Error),
        (status = 404, description = "No such product", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "deleteProduct"
)]
#[delete("/menus/{menu}/products/{name}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (menu, name) = path.into_inner();
    let menu = parse_menu(&menu)?;
    state.catalogue.delete_product(menu, &name).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Add to sold counters without charging anyone.
#[utoipa::path(
    post,
    path = "/api/v1/menus/{menu}/products/sold",
    params(("menu" = String, Path, description = "general or team")),
    request_body = RecordSalesRequest,
    responses(
        (status = 200, description = "Updated catalogue", body = Catalogue),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown product; nothing recorded", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "recordSales"
)]
#[post("/menus/{menu}/products/sold")]
pub async fn record_sales(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RecordSalesRequest>,
) -> ApiResult<web::Json<Catalogue>> {
    let menu = parse_menu(&path)?;
    let items = parse_items(payload.into_inner().items, ITEMS)?;
    Ok(web::Json(state.catalogue.record_sales(menu, items).await?))
}

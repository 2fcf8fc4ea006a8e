//! Order pricing against a menu catalogue.
//!
//! Requested quantities arrive as loosely typed JSON. Each one is classified
//! before use: whole non-negative numbers (or numeric strings) are accepted,
//! everything else counts as zero and the line is dropped. Fractional
//! quantities such as `1.5` are not whole and are dropped too.

use rust_decimal::Decimal;
use serde_json::{Value, json};
use tracing::debug;

use super::{AmountOverflow, Catalogue, Error, LineItem, ResourceKind, lines_total};

/// 2^64, the first float that no longer fits in a `u64`.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Classified quantity from a client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedQuantity {
    /// A whole, non-negative number of units.
    Units(u64),
    /// Anything else, counted as zero: negative, fractional (`1.5`),
    /// non-numeric, missing, or too large for a `u64`.
    Invalid,
}

impl RequestedQuantity {
    /// Classify a raw JSON value.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use tuckshop::domain::RequestedQuantity;
    ///
    /// assert_eq!(RequestedQuantity::classify(&json!(3)), RequestedQuantity::Units(3));
    /// assert_eq!(RequestedQuantity::classify(&json!("2")), RequestedQuantity::Units(2));
    /// assert_eq!(RequestedQuantity::classify(&json!(-1)), RequestedQuantity::Invalid);
    /// assert_eq!(RequestedQuantity::classify(&json!(1.5)), RequestedQuantity::Invalid);
    /// assert_eq!(RequestedQuantity::classify(&json!("lots")), RequestedQuantity::Invalid);
    /// ```
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Number(number) => number
                .as_u64()
                .map(Self::Units)
                .or_else(|| number.as_f64().map(Self::from_float))
                .unwrap_or(Self::Invalid),
            Value::String(raw) => {
                let trimmed = raw.trim();
                trimmed
                    .parse::<u64>()
                    .map(Self::Units)
                    .or_else(|_| trimmed.parse::<f64>().map(Self::from_float))
                    .unwrap_or(Self::Invalid)
            }
            _ => Self::Invalid,
        }
    }

    fn from_float(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < U64_LIMIT {
            Self::Units(value as u64)
        } else {
            Self::Invalid
        }
    }

    /// Units to use, with invalid input counted as zero.
    pub fn units(&self) -> u64 {
        match self {
            Self::Units(units) => *units,
            Self::Invalid => 0,
        }
    }
}

/// One requested product and quantity, in client order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    /// Product name.
    pub product: String,
    /// Classified quantity.
    pub quantity: RequestedQuantity,
}

impl ItemRequest {
    /// Build a request from a product name and raw JSON quantity.
    pub fn from_json(product: impl Into<String>, quantity: &Value) -> Self {
        Self {
            product: product.into(),
            quantity: RequestedQuantity::classify(quantity),
        }
    }

    /// Build a request for an exact number of units.
    pub fn units(product: impl Into<String>, units: u64) -> Self {
        Self {
            product: product.into(),
            quantity: RequestedQuantity::Units(units),
        }
    }
}

/// Turn a JSON object of `product -> quantity` into item requests.
///
/// Returns `None` when `items` is not an object.
pub fn item_requests_from_json(items: &Value) -> Option<Vec<ItemRequest>> {
    items.as_object().map(|map| {
        map.iter()
            .map(|(product, qty)| ItemRequest::from_json(product.as_str(), qty))
            .collect()
    })
}

/// Priced order lines and their total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrder {
    /// Lines in request order, zero quantities removed.
    pub lines: Vec<LineItem>,
    /// Sum of line totals.
    pub total: Decimal,
}

/// `invalid_request` raised when an amount derived from `field` overflows.
pub(crate) fn amount_overflow(field: &str) -> Error {
    Error::invalid_request(format!("amount derived from {field} is too large"))
        .with_details(json!({
            "field": field,
            "code": "amount_overflow",
        }))
}

fn items_overflow(_: AmountOverflow) -> Error {
    amount_overflow("items")
}

/// Keep the requests with a positive quantity, logging dropped ones.
pub(crate) fn effective_quantities(requests: &[ItemRequest]) -> Vec<(&str, u64)> {
    requests
        .iter()
        .filter_map(|request| {
            if request.quantity == RequestedQuantity::Invalid {
                debug!(product = %request.product, "invalid quantity treated as zero");
            }
            let units = request.quantity.units();
            (units > 0).then_some((request.product.as_str(), units))
        })
        .collect()
}

/// Price `requests` against `catalogue` without modifying it.
///
/// # Errors
/// Returns a `NotFound` error naming the first product with a positive
/// quantity that is not on the menu, or `invalid_request` with code
/// `amount_overflow` when a line or the total does not fit in a [`Decimal`].
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use tuckshop::domain::{Catalogue, CatalogueEntry, ItemRequest, price_order};
///
/// let catalogue: Catalogue = [("soda", CatalogueEntry::new(Decimal::from(2)))]
///     .into_iter()
///     .collect();
/// let priced = price_order(&catalogue, &[ItemRequest::units("soda", 3)]).expect("priced");
/// assert_eq!(priced.total, Decimal::from(6));
/// ```
pub fn price_order(catalogue: &Catalogue, requests: &[ItemRequest]) -> Result<PricedOrder, Error> {
    let lines = effective_quantities(requests)
        .into_iter()
        .map(|(product, qty)| {
            catalogue
                .get(product)
                .ok_or_else(|| Error::missing(ResourceKind::Product, product))
                .and_then(|entry| LineItem::new(product, qty, entry.price).map_err(items_overflow))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let total = lines_total(&lines).map_err(items_overflow)?;
    Ok(PricedOrder { lines, total })
}

//! Transaction log records.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::Menu;

/// Tolerance used when comparing a stored total with its recomputed value.
pub const TOTAL_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 9);

/// An amount fell outside the range a [`Decimal`] can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount is outside the representable range")]
pub struct AmountOverflow;

/// Identifier of a transaction log record.
///
/// Generated identifiers are the creation time in Unix milliseconds followed
/// by a random hexadecimal suffix, so two orders in the same millisecond do
/// not collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "1718000000000-3fa85f")]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap an existing identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate an identifier for a record created at `now`.
    pub fn generate<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Self {
        let suffix: u32 = rng.gen_range(0..0x0100_0000);
        Self(format!("{}-{suffix:06x}", now.timestamp_millis()))
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One product's quantity and price at purchase time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product name as it was on the menu.
    pub product: String,
    /// Units bought.
    pub qty: u64,
    /// Catalogue price captured when the order was placed.
    #[schema(value_type = f64)]
    pub unit_price: Decimal,
    /// `qty × unit_price`.
    #[schema(value_type = f64)]
    pub line_total: Decimal,
}

impl LineItem {
    /// Build a line, computing its total.
    ///
    /// # Errors
    /// Returns [`AmountOverflow`] when `qty × unit_price` does not fit.
    ///
    /// # Examples
    /// ```
    /// use rust_decimal::Decimal;
    /// use tuckshop::domain::LineItem;
    ///
    /// let line = LineItem::new("soda", 3, Decimal::from(2)).expect("line total");
    /// assert_eq!(line.line_total, Decimal::from(6));
    /// assert!(LineItem::new("gold", u64::MAX, Decimal::MAX).is_err());
    /// ```
    pub fn new(
        product: impl Into<String>,
        qty: u64,
        unit_price: Decimal,
    ) -> Result<Self, AmountOverflow> {
        let line_total = line_amount(qty, unit_price)?;
        Ok(Self {
            product: product.into(),
            qty,
            unit_price,
            line_total,
        })
    }

    /// `qty × unit_price`, ignoring the stored `line_total`.
    ///
    /// # Errors
    /// Returns [`AmountOverflow`] when the product does not fit.
    pub fn recomputed_total(&self) -> Result<Decimal, AmountOverflow> {
        line_amount(self.qty, self.unit_price)
    }
}

fn line_amount(qty: u64, unit_price: Decimal) -> Result<Decimal, AmountOverflow> {
    unit_price
        .checked_mul(Decimal::from(qty))
        .ok_or(AmountOverflow)
}

/// Sum of recomputed line totals.
///
/// # Errors
/// Returns [`AmountOverflow`] when a line or the running sum does not fit.
pub fn lines_total(lines: &[LineItem]) -> Result<Decimal, AmountOverflow> {
    lines.iter().try_fold(Decimal::ZERO, |total, line| {
        total
            .checked_add(line.recomputed_total()?)
            .ok_or(AmountOverflow)
    })
}

/// Immutable record of a completed order.
///
/// Only `refunded` (false to true, once) and a one-off correction of `total`
/// change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Menu the order was placed on.
    pub menu: Menu,
    /// Buyer.
    pub user: String,
    /// Priced line items.
    pub lines: Vec<LineItem>,
    /// Amount debited.
    #[schema(value_type = f64)]
    pub total: Decimal,
    /// Buyer balance right after the debit.
    #[schema(value_type = f64)]
    pub balance_after: Decimal,
    /// Whether the order has been refunded.
    #[serde(default)]
    pub refunded: bool,
}

impl Transaction {
    /// Authoritative total derived from the recorded lines.
    ///
    /// # Errors
    /// Returns [`AmountOverflow`] when the lines do not sum to a
    /// representable amount.
    pub fn recomputed_total(&self) -> Result<Decimal, AmountOverflow> {
        lines_total(&self.lines)
    }

    /// Overwrite `total` when it drifts from the line items.
    ///
    /// Returns the previous stored value when a correction was made.
    ///
    /// # Errors
    /// Returns [`AmountOverflow`] when the lines cannot be re-summed; `total`
    /// is left untouched.
    pub fn repair_total(&mut self) -> Result<Option<Decimal>, AmountOverflow> {
        let recomputed = self.recomputed_total()?;
        let drifted = self
            .total
            .checked_sub(recomputed)
            .is_none_or(|difference| difference.abs() > TOTAL_EPSILON);
        if !drifted {
            return Ok(None);
        }
        let stored = self.total;
        self.total = recomputed;
        Ok(Some(stored))
    }
}

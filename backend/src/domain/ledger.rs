//! Balance and catalogue records held per menu.
//!
//! Both records are plain maps keyed by name and are loaded and saved
//! wholesale by the ledger store. Keys are kept sorted so the persisted JSON
//! is stable between writes.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;
use utoipa::ToSchema;

/// Prepaid balance per person for one menu.
///
/// Balances may be set to any value, including negative ones; only order
/// debits enforce a floor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Balances(BTreeMap<String, Decimal>);

impl Balances {
    /// Balance of `name`, if the person exists.
    pub fn get(&self, name: &str) -> Option<Decimal> {
        self.0.get(name).copied()
    }

    /// Create or overwrite the balance of `name`.
    pub fn set(&mut self, name: impl Into<String>, balance: Decimal) {
        self.0.insert(name.into(), balance);
    }

    /// Number of people on record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no balances are recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate people and balances in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(name, balance)| (name.as_str(), *balance))
    }
}

impl<K: Into<String>> FromIterator<(K, Decimal)> for Balances {
    fn from_iter<T: IntoIterator<Item = (K, Decimal)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Product offered on a menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogueEntry {
    /// Unit price charged at the time of an order.
    #[schema(value_type = f64, example = 2.5)]
    pub price: Decimal,
    /// Units sold so far, net of refunds.
    #[serde(default, deserialize_with = "deserialize_counter")]
    pub sold: u64,
    /// Opaque image reference supplied by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CatalogueEntry {
    /// New entry with no sales.
    pub fn new(price: Decimal) -> Self {
        Self {
            price,
            sold: 0,
            image: None,
        }
    }

    /// Attach an image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Count `qty` more units as sold.
    pub fn record_sale(&mut self, qty: u64) {
        self.sold = self.sold.saturating_add(qty);
    }

    /// Take `qty` units off the sold counter, stopping at zero.
    pub fn reverse_sale(&mut self, qty: u64) {
        self.sold = self.sold.saturating_sub(qty);
    }
}

/// Stored counters may have been hand-edited or written by older clients;
/// negative values load as zero and fractional ones are floored.
fn deserialize_counter<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    if let Some(value) = number.as_u64() {
        return Ok(value);
    }
    if number.is_i64() {
        return Ok(0);
    }
    Ok(number
        .as_f64()
        .filter(|value| value.is_finite() && *value > 0.0)
        .map_or(0, |value| value.floor() as u64))
}

/// Products offered on one menu, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Catalogue(BTreeMap<String, CatalogueEntry>);

impl Catalogue {
    /// Entry for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&CatalogueEntry> {
        self.0.get(name)
    }

    /// Mutable entry for `name`, if present.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut CatalogueEntry> {
        self.0.get_mut(name)
    }

    /// Whether `name` is on the menu.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, entry: CatalogueEntry) {
        self.0.insert(name.into(), entry);
    }

    /// Remove an entry, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<CatalogueEntry> {
        self.0.remove(name)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the menu is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogueEntry)> {
        self.0.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

impl<K: Into<String>> FromIterator<(K, CatalogueEntry)> for Catalogue {
    fn from_iter<T: IntoIterator<Item = (K, CatalogueEntry)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[rstest]
    #[case(json!(4), 4)]
    #[case(json!(-3), 0)]
    #[case(json!(2.9), 2)]
    #[case(json!(-0.5), 0)]
    fn sold_counter_is_repaired_on_load(#[case] sold: serde_json::Value, #[case] expected: u64) {
        let entry: CatalogueEntry =
            serde_json::from_value(json!({ "price": 1, "sold": sold })).expect("entry");
        assert_eq!(entry.sold, expected);
    }

    #[rstest]
    fn missing_sold_defaults_to_zero() {
        let entry: CatalogueEntry =
            serde_json::from_value(json!({ "price": 2.5 })).expect("entry");
        assert_eq!(entry.sold, 0);
        assert_eq!(entry.price, dec!(2.5));
        assert!(entry.image.is_none());
    }

    #[rstest]
    fn reverse_sale_clamps_at_zero() {
        let mut entry = CatalogueEntry::new(dec!(1));
        entry.record_sale(2);
        entry.reverse_sale(5);
        assert_eq!(entry.sold, 0);
    }

    #[rstest]
    fn catalogue_serialises_as_plain_object() {
        let catalogue: Catalogue = [("soda", CatalogueEntry::new(dec!(2)).with_image("soda.png"))]
            .into_iter()
            .collect();
        let value = serde_json::to_value(&catalogue).expect("serialise");
        assert_eq!(
            value,
            json!({ "soda": { "price": 2.0, "sold": 0, "image": "soda.png" } })
        );
    }

    #[rstest]
    fn balances_round_trip_through_json_numbers() {
        let balances: Balances =
            serde_json::from_value(json!({ "alice": 10, "bob": 2.75 })).expect("balances");
        assert_eq!(balances.get("alice"), Some(dec!(10)));
        assert_eq!(balances.get("bob"), Some(dec!(2.75)));
        assert_eq!(balances.get("carol"), None);
    }
}

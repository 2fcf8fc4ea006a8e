//! Aggregate views over the transaction log.
//!
//! Reports are recomputed from the full log on every call and ignore
//! refunded transactions.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::Transaction;

/// Total non-refunded spend per user.
pub fn spend_by_user(log: &[Transaction]) -> BTreeMap<String, Decimal> {
    log.iter()
        .filter(|transaction| !transaction.refunded)
        .fold(BTreeMap::new(), |mut totals, transaction| {
            let spent = totals
                .entry(transaction.user.clone())
                .or_insert(Decimal::ZERO);
            *spent = spent.saturating_add(transaction.total);
            totals
        })
}

/// Total non-refunded units per product.
pub fn units_by_product(log: &[Transaction]) -> BTreeMap<String, u64> {
    log.iter()
        .filter(|transaction| !transaction.refunded)
        .flat_map(|transaction| transaction.lines.iter())
        .fold(BTreeMap::new(), |mut totals, line| {
            let units = totals.entry(line.product.clone()).or_insert(0_u64);
            *units = units.saturating_add(line.qty);
            totals
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineItem, Menu, TransactionId};
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    fn line(product: &str, qty: u64, unit_price: Decimal) -> LineItem {
        LineItem::new(product, qty, unit_price).expect("line total")
    }

    fn transaction(id: &str, user: &str, lines: Vec<LineItem>, refunded: bool) -> Transaction {
        let total = crate::domain::lines_total(&lines).expect("line sum");
        Transaction {
            id: TransactionId::new(id),
            timestamp: Utc::now(),
            menu: Menu::General,
            user: user.to_owned(),
            lines,
            total,
            balance_after: Decimal::ZERO,
            refunded,
        }
    }

    #[fixture]
    fn log() -> Vec<Transaction> {
        vec![
            transaction("1", "alice", vec![line("soda", 3, dec!(2))], false),
            transaction(
                "2",
                "bob",
                vec![
                    line("soda", 1, dec!(2)),
                    line("crisps", 2, dec!(1.25)),
                ],
                false,
            ),
            transaction("3", "alice", vec![line("crisps", 4, dec!(1.25))], true),
            transaction("4", "alice", vec![line("candy", 1, dec!(0.5))], false),
        ]
    }

    #[rstest]
    fn spend_by_user_skips_refunded(log: Vec<Transaction>) {
        let report = spend_by_user(&log);
        assert_eq!(report.get("alice"), Some(&dec!(6.5)));
        assert_eq!(report.get("bob"), Some(&dec!(4.5)));
        assert_eq!(report.len(), 2);
    }

    #[rstest]
    fn units_by_product_skips_refunded(log: Vec<Transaction>) {
        let report = units_by_product(&log);
        assert_eq!(report.get("soda"), Some(&4));
        assert_eq!(report.get("crisps"), Some(&2));
        assert_eq!(report.get("candy"), Some(&1));
    }

    #[rstest]
    fn fully_refunded_user_is_absent() {
        let log = vec![transaction("1", "carol", vec![line("soda", 1, dec!(2))], true)];
        assert!(spend_by_user(&log).is_empty());
        assert!(units_by_product(&log).is_empty());
    }
}

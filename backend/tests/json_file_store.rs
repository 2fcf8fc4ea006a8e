//! Behaviour of the JSON file ledger store against a real directory.

use std::fs;

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use rust_decimal_macros::dec;
use tempfile::TempDir;
use tuckshop::domain::ports::{LedgerStore, LedgerStoreError};
use tuckshop::domain::{
    Balances, Catalogue, CatalogueEntry, LineItem, Menu, Transaction, TransactionId,
};
use tuckshop::outbound::persistence::JsonFileLedgerStore;

#[fixture]
fn data_dir() -> TempDir {
    TempDir::new().expect("temp dir")
}

fn open(dir: &TempDir) -> JsonFileLedgerStore {
    JsonFileLedgerStore::open(dir.path()).expect("open store")
}

#[rstest]
#[tokio::test]
async fn missing_files_load_as_empty_records(data_dir: TempDir) {
    let store = open(&data_dir);

    for menu in Menu::ALL {
        assert!(store.load_balances(menu).await.expect("balances").is_empty());
        assert!(store.load_catalogue(menu).await.expect("catalogue").is_empty());
    }
    assert!(store.load_transactions().await.expect("log").is_empty());
}

#[rstest]
#[tokio::test]
async fn open_creates_the_data_directory(data_dir: TempDir) {
    let nested = data_dir.path().join("ledger").join("records");
    let store = JsonFileLedgerStore::open(&nested).expect("open nested");
    store
        .save_balances(Menu::General, &Balances::from_iter([("alice", dec!(1))]))
        .await
        .expect("save");

    assert!(nested.join("balances-general.json").is_file());
}

#[rstest]
#[tokio::test]
async fn records_are_written_to_per_menu_files(data_dir: TempDir) {
    let store = open(&data_dir);
    store
        .save_balances(Menu::Team, &Balances::from_iter([("alice", dec!(7.5))]))
        .await
        .expect("save balances");
    store
        .save_catalogue(
            Menu::General,
            &Catalogue::from_iter([("soda", CatalogueEntry::new(dec!(2)).with_image("soda.png"))]),
        )
        .await
        .expect("save catalogue");

    let balances: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(data_dir.path().join("balances-team.json")).expect("read balances"),
    )
    .expect("balances JSON");
    assert_eq!(balances, serde_json::json!({"alice": 7.5}));

    let catalogue: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(data_dir.path().join("catalogue-general.json"))
            .expect("read catalogue"),
    )
    .expect("catalogue JSON");
    assert_eq!(
        catalogue,
        serde_json::json!({"soda": {"price": 2.0, "sold": 0, "image": "soda.png"}})
    );
    assert!(!data_dir.path().join("balances-general.json").exists());
}

#[rstest]
#[tokio::test]
async fn transactions_survive_reopening(data_dir: TempDir) {
    let transaction = Transaction {
        id: TransactionId::new("1718000000000-abcdef"),
        timestamp: Utc
            .with_ymd_and_hms(2024, 6, 10, 8, 0, 0)
            .single()
            .expect("timestamp"),
        menu: Menu::Team,
        user: "alice".to_owned(),
        lines: vec![LineItem::new("soda", 3, dec!(2)).expect("line total")],
        total: dec!(6),
        balance_after: dec!(4),
        refunded: false,
    };
    open(&data_dir)
        .save_transactions(std::slice::from_ref(&transaction))
        .await
        .expect("save log");

    let reloaded = open(&data_dir).load_transactions().await.expect("load log");
    assert_eq!(reloaded, vec![transaction]);
}

#[rstest]
#[tokio::test]
async fn malformed_json_is_reported_as_corrupt(data_dir: TempDir) {
    fs::write(data_dir.path().join("catalogue-team.json"), "{\"soda\": ").expect("write");
    let err = open(&data_dir)
        .load_catalogue(Menu::Team)
        .await
        .expect_err("corrupt record");

    assert!(
        matches!(&err, LedgerStoreError::Corrupt { key, .. } if key == "catalogue:team"),
        "unexpected error: {err:?}"
    );
}

#[rstest]
#[case::empty("")]
#[case::whitespace("  \n")]
#[tokio::test]
async fn blank_files_load_as_empty(data_dir: TempDir, #[case] contents: &str) {
    fs::write(data_dir.path().join("balances-general.json"), contents).expect("write");
    let balances = open(&data_dir)
        .load_balances(Menu::General)
        .await
        .expect("blank record");
    assert!(balances.is_empty());
}

#[rstest]
#[tokio::test]
async fn hand_edited_counters_are_normalised(data_dir: TempDir) {
    fs::write(
        data_dir.path().join("catalogue-general.json"),
        r#"{"soda": {"price": 2, "sold": -3}, "crisps": {"price": 1.25, "sold": 2.7}, "candy": {"price": 0.5}}"#,
    )
    .expect("write");

    let catalogue = open(&data_dir)
        .load_catalogue(Menu::General)
        .await
        .expect("catalogue");

    assert_eq!(catalogue.get("soda").map(|entry| entry.sold), Some(0));
    assert_eq!(catalogue.get("crisps").map(|entry| entry.sold), Some(2));
    assert_eq!(catalogue.get("candy").map(|entry| entry.sold), Some(0));
}

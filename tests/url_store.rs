use std::collections::HashMap;
use std::fs;

use chrono::{Local, NaiveDate};
use freeman_post::{StoreError, UrlRecord, UrlStore};
use tempfile::TempDir;

fn store() -> (TempDir, UrlStore) {
    let dir = TempDir::new().unwrap();
    let store = UrlStore::new(dir.path().join("urls.json"));
    (dir, store)
}

#[test]
fn first_use_creates_one_record_dated_today() {
    let (_dir, store) = store();
    let record = store.record_use("https://api.example.com/a").unwrap();

    let records = store.load();
    assert_eq!(records, vec![record]);
    assert_eq!(records[0].usage_count.get(), 1);
    assert_eq!(records[0].added_on, Local::now().date_naive());
}

#[test]
fn usage_count_matches_number_of_uses() {
    let (_dir, store) = store();
    let uses = [
        "https://a",
        "https://b",
        "https://a",
        "https://a/",
        "HTTPS://a",
        "https://a",
    ];
    for url in uses {
        store.record_use(url).unwrap();
    }

    let records = store.load();
    let counts: HashMap<&str, u32> = records
        .iter()
        .map(|r| (r.url.as_str(), r.usage_count.get()))
        .collect();

    assert_eq!(records.len(), 4);
    assert_eq!(counts["https://a"], 3);
    assert_eq!(counts["https://b"], 1);
    assert_eq!(counts["https://a/"], 1);
    assert_eq!(counts["HTTPS://a"], 1);
    let order: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(order, vec!["https://a", "https://b", "https://a/", "HTTPS://a"]);
}

#[test]
fn added_on_is_fixed_by_first_use() {
    let (_dir, store) = store();
    let first = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
    let later = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();

    store.record_use_on("https://a", first).unwrap();
    store.record_use_on("https://a", later).unwrap();
    store.record_use_on("https://a", later).unwrap();

    let records = store.load();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].added_on, first);
    assert_eq!(records[0].usage_count.get(), 3);
}

#[test]
fn missing_and_invalid_files_load_empty() {
    let (_dir, store) = store();
    assert!(store.load().is_empty());

    fs::write(store.path(), "not valid json").unwrap();
    assert!(store.load().is_empty());
    assert!(matches!(store.try_load(), Err(StoreError::Malformed(_))));

    fs::write(store.path(), r#"[{"url": "https://a"}]"#).unwrap();
    assert!(store.load().is_empty());
}

#[test]
fn corrupt_file_is_replaced_on_next_use() {
    let (_dir, store) = store();
    fs::write(store.path(), "{{{").unwrap();
    store.record_use("https://a").unwrap();
    assert_eq!(store.load().len(), 1);
}

#[test]
fn remove_drops_only_the_matching_url() {
    let (_dir, store) = store();
    store.record_use("https://x").unwrap();
    store.record_use("https://y").unwrap();

    assert!(store.remove("https://x").unwrap());
    assert_eq!(store.urls(), vec!["https://y"]);

    let before = fs::read_to_string(store.path()).unwrap();
    assert!(!store.remove("https://x").unwrap());
    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    assert_eq!(store.urls(), vec!["https://y"]);
}

#[test]
fn remove_on_missing_file_is_a_no_op() {
    let (_dir, store) = store();
    assert!(!store.remove("https://x").unwrap());
    assert!(!store.path().exists());
}

#[test]
fn save_then_load_round_trips() {
    let (_dir, store) = store();
    let mut b = UrlRecord::first_use("https://b", NaiveDate::from_ymd_opt(2022, 2, 2).unwrap());
    b.bump();
    let records = vec![
        UrlRecord::first_use("https://a", NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()),
        b,
    ];

    store.save(&records).unwrap();
    assert_eq!(store.load(), records);
}

#[test]
fn file_format_is_a_plain_json_array() {
    let (_dir, store) = store();
    store
        .record_use_on("https://a", NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
        .unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(
        raw,
        serde_json::json!([
            {"url": "https://a", "added_on": "2024-01-02", "usage_count": 1}
        ])
    );
}

#[test]
fn write_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    let store = UrlStore::new(dir.path());
    assert!(matches!(
        store.record_use("https://a"),
        Err(StoreError::Write { .. })
    ));
}

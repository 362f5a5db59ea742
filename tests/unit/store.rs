//! Idempotent storage tests

use chrono::NaiveDate;
use serde_json::json;
use stratix::models::indicators::IndicatorSnapshot;
use stratix::models::signal::{Evidence, SignalEvent};
use stratix::models::strategy::SignalCode;
use stratix::store::{MemoryStore, SignalStore, WriteOutcome};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

fn event(code: &str, provisional: bool, run_id: Option<i64>) -> SignalEvent {
    let signal = SignalCode::parse(code).unwrap();
    SignalEvent {
        symbol: "AAPL".to_string(),
        date: date(),
        strength: signal.strength(),
        signal,
        confidence: 0.5,
        evidence: Evidence {
            thresholds: json!({}),
            reasons: vec![],
            score: 30.0,
        },
        provisional,
        run_id,
    }
}

fn snapshot(name: &str) -> IndicatorSnapshot {
    IndicatorSnapshot {
        symbol: "AAPL".to_string(),
        date: date(),
        indicator_name: name.to_string(),
        value: 42.0,
        metadata: json!({ "period": 14 }),
    }
}

#[tokio::test]
async fn duplicate_signal_writes_are_idempotent() {
    let store = MemoryStore::new();
    let e = event("BBRK5", false, Some(1));

    assert_eq!(store.insert_signal(&e).await.unwrap(), WriteOutcome::Inserted);
    assert_eq!(
        store.insert_signal(&e).await.unwrap(),
        WriteOutcome::AlreadyPresent
    );
    assert_eq!(store.signal_count().await, 1);
}

#[tokio::test]
async fn finalized_supersedes_provisional() {
    let store = MemoryStore::new();
    store
        .insert_signal(&event("BBRK5", true, Some(1)))
        .await
        .unwrap();

    let outcome = store
        .insert_signal(&event("BBRK5", false, Some(1)))
        .await
        .unwrap();
    assert_eq!(outcome, WriteOutcome::Superseded);
    assert_eq!(store.signal_count().await, 1);

    let stored = store.all_signals().await;
    assert!(!stored[0].provisional);
}

#[tokio::test]
async fn provisional_never_replaces_finalized() {
    let store = MemoryStore::new();
    store
        .insert_signal(&event("BBRK5", false, Some(1)))
        .await
        .unwrap();

    let outcome = store
        .insert_signal(&event("BBRK5", true, Some(1)))
        .await
        .unwrap();
    assert_eq!(outcome, WriteOutcome::AlreadyPresent);
    assert!(!store.all_signals().await[0].provisional);
}

#[tokio::test]
async fn distinct_codes_and_runs_are_distinct_rows() {
    let store = MemoryStore::new();
    store.insert_signal(&event("BBRK5", false, Some(1))).await.unwrap();
    store.insert_signal(&event("BBRK6", false, Some(1))).await.unwrap();
    store.insert_signal(&event("BBRK5", false, Some(2))).await.unwrap();
    assert_eq!(store.signal_count().await, 3);

    assert_eq!(store.signals_for_run(1).await.unwrap().len(), 2);
    assert_eq!(store.signals_for_run(2).await.unwrap().len(), 1);
    assert!(store.signals_for_run(3).await.unwrap().is_empty());
}

#[tokio::test]
async fn snapshot_writes_are_idempotent() {
    let store = MemoryStore::new();
    assert_eq!(
        store.insert_snapshot(&snapshot("rsi")).await.unwrap(),
        WriteOutcome::Inserted
    );
    assert_eq!(
        store.insert_snapshot(&snapshot("rsi")).await.unwrap(),
        WriteOutcome::AlreadyPresent
    );
    assert_eq!(
        store.insert_snapshot(&snapshot("atr")).await.unwrap(),
        WriteOutcome::Inserted
    );
    assert_eq!(store.snapshot_count().await, 2);
}

//! Signal and snapshot persistence seam
//!
//! Persistence technology is a collaborator, not part of the engine; the
//! engine only depends on this trait. Unique keys double as the concurrency
//! safety mechanism: a retried write that collides is "already done", not an
//! error.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::error::EngineError;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::SignalEvent;

/// Outcome of an idempotent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Inserted,
    /// Unique-key collision with an identical row; treated as success.
    AlreadyPresent,
    /// A finalized row replaced a provisional one for the same key.
    Superseded,
}

#[async_trait]
pub trait SignalStore: Send + Sync {
    /// Insert a signal event. Unique per (run_id, symbol, date, signal);
    /// a finalized event supersedes a provisional one under the same key.
    async fn insert_signal(&self, event: &SignalEvent) -> Result<WriteOutcome, EngineError>;

    /// Insert an indicator snapshot. Unique per (symbol, date, name).
    async fn insert_snapshot(
        &self,
        snapshot: &IndicatorSnapshot,
    ) -> Result<WriteOutcome, EngineError>;

    async fn signals_for_run(&self, run_id: i64) -> Result<Vec<SignalEvent>, EngineError>;
}

type SignalKey = (Option<i64>, String, NaiveDate, String);
type SnapshotKey = (String, NaiveDate, String);

#[derive(Default)]
struct MemoryStoreInner {
    signals: Vec<SignalEvent>,
    signal_index: HashMap<SignalKey, usize>,
    snapshots: Vec<IndicatorSnapshot>,
    snapshot_index: HashMap<SnapshotKey, usize>,
}

/// In-memory store used by tests and library embedders without a database.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn signal_count(&self) -> usize {
        self.inner.read().await.signals.len()
    }

    pub async fn snapshot_count(&self) -> usize {
        self.inner.read().await.snapshots.len()
    }

    pub async fn all_signals(&self) -> Vec<SignalEvent> {
        self.inner.read().await.signals.clone()
    }

    pub async fn all_snapshots(&self) -> Vec<IndicatorSnapshot> {
        self.inner.read().await.snapshots.clone()
    }
}

#[async_trait]
impl SignalStore for MemoryStore {
    async fn insert_signal(&self, event: &SignalEvent) -> Result<WriteOutcome, EngineError> {
        let key: SignalKey = (
            event.run_id,
            event.symbol.clone(),
            event.date,
            event.signal.as_str().to_string(),
        );
        let mut inner = self.inner.write().await;
        let existing = inner.signal_index.get(&key).copied();
        if let Some(idx) = existing {
            // A settled end-of-day signal replaces the same-day provisional
            // one; it must never be double-counted alongside it.
            if inner.signals[idx].provisional && !event.provisional {
                inner.signals[idx] = event.clone();
                return Ok(WriteOutcome::Superseded);
            }
            return Ok(WriteOutcome::AlreadyPresent);
        }
        inner.signals.push(event.clone());
        let idx = inner.signals.len() - 1;
        inner.signal_index.insert(key, idx);
        Ok(WriteOutcome::Inserted)
    }

    async fn insert_snapshot(
        &self,
        snapshot: &IndicatorSnapshot,
    ) -> Result<WriteOutcome, EngineError> {
        let key: SnapshotKey = (
            snapshot.symbol.clone(),
            snapshot.date,
            snapshot.indicator_name.clone(),
        );
        let mut inner = self.inner.write().await;
        if inner.snapshot_index.contains_key(&key) {
            return Ok(WriteOutcome::AlreadyPresent);
        }
        inner.snapshots.push(snapshot.clone());
        let idx = inner.snapshots.len() - 1;
        inner.snapshot_index.insert(key, idx);
        Ok(WriteOutcome::Inserted)
    }

    async fn signals_for_run(&self, run_id: i64) -> Result<Vec<SignalEvent>, EngineError> {
        let inner = self.inner.read().await;
        Ok(inner
            .signals
            .iter()
            .filter(|s| s.run_id == Some(run_id))
            .cloned()
            .collect())
    }
}

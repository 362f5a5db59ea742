//! Run and parameter bookkeeping models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::params::EngineParams;

/// A versioned, content-hashed bundle of evaluator configuration.
///
/// Immutable once created; a changed configuration is a new row, never an
/// update. `(content_hash, engine_version)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub id: i64,
    pub params: EngineParams,
    pub content_hash: String,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Running)
    }
}

/// One batch execution of the pipeline across a symbol universe.
///
/// Created in `Running` state; transitions to a terminal state exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRun {
    pub id: i64,
    pub parameter_set_id: i64,
    pub universe_size: usize,
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

/// What the batch driver gets back: per-run processing counts and any errors
/// that need operator attention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: i64,
    pub symbols_processed: usize,
    pub symbols_failed: usize,
    pub signals_emitted: usize,
    pub snapshots_written: usize,
    pub errors: Vec<String>,
}

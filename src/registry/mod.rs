//! Run and parameter registry
//!
//! ParameterSets are created, never updated: an identical configuration
//! (same content hash, same engine version) returns the existing row. Runs
//! move from `Running` to exactly one terminal state.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::EngineError;
use crate::models::params::EngineParams;
use crate::models::run::{ParameterSet, RunStatus, SignalRun};
use crate::ENGINE_VERSION;

#[derive(Default)]
pub struct ParameterRegistry {
    sets: RwLock<Vec<ParameterSet>>,
    next_id: AtomicI64,
}

impl ParameterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve, validate, canonicalize, and hash a configuration. Returns
    /// the existing ParameterSet when `(content_hash, engine_version)`
    /// already exists; key order and unknown keys in the input never create
    /// duplicates.
    pub async fn create_parameter_set(
        &self,
        config: serde_json::Value,
    ) -> Result<ParameterSet, EngineError> {
        let params = EngineParams::from_value(config)?;
        let content_hash = params.content_hash();

        let mut sets = self.sets.write().await;
        if let Some(existing) = sets
            .iter()
            .find(|s| s.content_hash == content_hash && s.engine_version == ENGINE_VERSION)
        {
            return Ok(existing.clone());
        }

        let set = ParameterSet {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            params,
            content_hash,
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
        };
        info!(
            parameter_set_id = set.id,
            content_hash = %set.content_hash,
            "Created parameter set"
        );
        sets.push(set.clone());
        Ok(set)
    }

    pub async fn get(&self, id: i64) -> Option<ParameterSet> {
        self.sets.read().await.iter().find(|s| s.id == id).cloned()
    }
}

#[derive(Default)]
pub struct RunRegistry {
    runs: RwLock<Vec<SignalRun>>,
    next_id: AtomicI64,
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn start_run(&self, parameter_set: &ParameterSet, universe_size: usize) -> SignalRun {
        let run = SignalRun {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            parameter_set_id: parameter_set.id,
            universe_size,
            status: RunStatus::Running,
            started_at: Utc::now(),
            finished_at: None,
            error: None,
        };
        info!(
            run_id = run.id,
            parameter_set_id = parameter_set.id,
            universe_size,
            "Started signal run"
        );
        self.runs.write().await.push(run.clone());
        run
    }

    pub async fn complete_run(&self, run_id: i64) -> Result<(), EngineError> {
        self.transition(run_id, RunStatus::Completed, None).await
    }

    pub async fn fail_run(&self, run_id: i64, error: String) -> Result<(), EngineError> {
        self.transition(run_id, RunStatus::Failed, Some(error)).await
    }

    pub async fn get_run(&self, run_id: i64) -> Option<SignalRun> {
        self.runs.read().await.iter().find(|r| r.id == run_id).cloned()
    }

    /// Exactly one terminal transition per run; a second attempt errors
    /// rather than silently repeating.
    async fn transition(
        &self,
        run_id: i64,
        status: RunStatus,
        error: Option<String>,
    ) -> Result<(), EngineError> {
        let mut runs = self.runs.write().await;
        let run = runs
            .iter_mut()
            .find(|r| r.id == run_id)
            .ok_or(EngineError::RunNotFound { run_id })?;
        if run.status.is_terminal() {
            return Err(EngineError::RunTransition {
                run_id,
                status: run.status,
            });
        }
        run.status = status;
        run.finished_at = Some(Utc::now());
        run.error = error;
        info!(run_id, status = ?status, "Run reached terminal state");
        Ok(())
    }
}

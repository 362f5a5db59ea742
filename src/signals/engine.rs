//! Signal evaluation engine and batch runner
//!
//! `SignalEngine` is the pure library surface: one symbol's ordered bars in,
//! signal events and indicator snapshots out, no I/O and no wall clock.
//! `BatchRunner` drives a symbol universe through a bounded worker pool under
//! one SignalRun, persisting through the storage seam.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config;
use crate::error::EngineError;
use crate::indicators::vector::{compute_series, snapshot_rows};
use crate::models::candle::Candle;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::params::EngineParams;
use crate::models::run::{ParameterSet, RunSummary};
use crate::models::signal::SignalEvent;
use crate::registry::RunRegistry;
use crate::signals::assembler::SignalAssembler;
use crate::signals::catalog::StrategyCatalog;
use crate::store::{SignalStore, WriteOutcome};
use crate::strategies::evaluator::evaluate_strategies;
use crate::strategies::rules::EvalContext;

/// Crossing detection needs a prior bar, so this is the floor below which a
/// series produces nothing at all (no events, no snapshots).
pub const MIN_BARS: usize = 2;

/// Everything one symbol's evaluation produced.
#[derive(Debug, Clone, Default)]
pub struct SymbolOutcome {
    pub events: Vec<SignalEvent>,
    pub snapshots: Vec<IndicatorSnapshot>,
}

pub struct SignalEngine {
    catalog: Arc<StrategyCatalog>,
    params: EngineParams,
}

impl SignalEngine {
    pub fn new(catalog: Arc<StrategyCatalog>, params: EngineParams) -> Self {
        Self { catalog, params }
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    /// Evaluate one symbol's full history.
    ///
    /// Bars must be in strictly increasing date order. Signals on the
    /// `as_of` bar are flagged provisional (the bar may still be moving);
    /// everything earlier is settled. Deterministic: no clock, no
    /// randomness, identical inputs reproduce identical output.
    pub fn evaluate_symbol(
        &self,
        symbol: &str,
        bars: &[Candle],
        as_of: NaiveDate,
        run_id: Option<i64>,
    ) -> Result<SymbolOutcome, EngineError> {
        if bars.len() < MIN_BARS {
            return Ok(SymbolOutcome::default());
        }
        if bars.windows(2).any(|w| w[0].date >= w[1].date) {
            return Err(EngineError::UnorderedSeries {
                symbol: symbol.to_string(),
            });
        }

        let vectors = compute_series(bars, &self.params);
        let assembler = SignalAssembler::new(&self.catalog, &self.params, run_id);

        let mut events = Vec::new();
        let mut snapshots = Vec::new();

        for (i, bar) in bars.iter().enumerate() {
            snapshots.extend(snapshot_rows(symbol, bar.date, &vectors[i], &self.params));
            if i == 0 {
                continue;
            }

            let ctx = EvalContext {
                bar,
                prev_bar: &bars[i - 1],
                cur: &vectors[i],
                prev: &vectors[i - 1],
                params: &self.params,
            };
            let provisional = bar.date == as_of;

            for evaluation in evaluate_strategies(&ctx) {
                if let Some(event) =
                    assembler.assemble(symbol, bar.date, &evaluation, provisional)?
                {
                    debug!(
                        symbol = %symbol,
                        date = %bar.date,
                        signal = %event.signal,
                        confidence = event.confidence,
                        "Signal fired"
                    );
                    events.push(event);
                }
            }
        }

        Ok(SymbolOutcome { events, snapshots })
    }
}

/// Per-symbol worker result inside a batch.
enum SymbolResult {
    Done {
        symbol: String,
        signals: usize,
        snapshots: usize,
    },
    Failed {
        symbol: String,
        error: EngineError,
    },
}

pub struct BatchRunner {
    store: Arc<dyn SignalStore>,
    runs: Arc<RunRegistry>,
    concurrency: usize,
}

impl BatchRunner {
    pub fn new(store: Arc<dyn SignalStore>, runs: Arc<RunRegistry>) -> Self {
        Self {
            store,
            runs,
            concurrency: config::get_worker_concurrency(),
        }
    }

    /// Set custom concurrency (default comes from the environment).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Run one batch over a symbol universe.
    ///
    /// Per-symbol failures are recorded and the batch continues; catalog
    /// drift fails the whole run loudly. The returned summary reports
    /// partial success counts either way.
    pub async fn run(
        &self,
        catalog: Arc<StrategyCatalog>,
        parameter_set: &ParameterSet,
        universe: Vec<(String, Vec<Candle>)>,
        as_of: NaiveDate,
    ) -> Result<RunSummary, EngineError> {
        let run = self.runs.start_run(parameter_set, universe.len()).await;
        let engine = Arc::new(SignalEngine::new(catalog, parameter_set.params.clone()));
        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        info!(
            run_id = run.id,
            symbols = universe.len(),
            concurrency = self.concurrency,
            "Batch evaluation started"
        );

        let mut tasks: JoinSet<SymbolResult> = JoinSet::new();
        for (symbol, bars) in universe {
            let engine = engine.clone();
            let store = self.store.clone();
            let semaphore = semaphore.clone();
            let run_id = run.id;
            tasks.spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(p) => p,
                    Err(_) => {
                        return SymbolResult::Failed {
                            symbol,
                            error: EngineError::Store("worker pool closed".to_string()),
                        }
                    }
                };

                let outcome = match engine.evaluate_symbol(&symbol, &bars, as_of, Some(run_id)) {
                    Ok(o) => o,
                    Err(error) => return SymbolResult::Failed { symbol, error },
                };

                let mut signals = 0;
                for event in &outcome.events {
                    match store.insert_signal(event).await {
                        Ok(WriteOutcome::Inserted) | Ok(WriteOutcome::Superseded) => signals += 1,
                        Ok(WriteOutcome::AlreadyPresent) => {}
                        Err(error) => return SymbolResult::Failed { symbol, error },
                    }
                }
                let mut snapshots = 0;
                for snapshot in &outcome.snapshots {
                    match store.insert_snapshot(snapshot).await {
                        Ok(WriteOutcome::Inserted) => snapshots += 1,
                        Ok(_) => {}
                        Err(error) => return SymbolResult::Failed { symbol, error },
                    }
                }

                SymbolResult::Done {
                    symbol,
                    signals,
                    snapshots,
                }
            });
        }

        let mut summary = RunSummary {
            run_id: run.id,
            ..RunSummary::default()
        };
        let mut drift: Option<EngineError> = None;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(SymbolResult::Done {
                    symbol,
                    signals,
                    snapshots,
                }) => {
                    debug!(symbol = %symbol, signals, snapshots, "Symbol evaluated");
                    summary.symbols_processed += 1;
                    summary.signals_emitted += signals;
                    summary.snapshots_written += snapshots;
                }
                Ok(SymbolResult::Failed { symbol, error }) => {
                    if matches!(error, EngineError::UnknownStrategy { .. }) {
                        // Rule table / catalog drift invalidates the whole
                        // run, not just this symbol.
                        drift.get_or_insert(error);
                    } else {
                        warn!(symbol = %symbol, error = %error, "Symbol evaluation failed");
                        summary.symbols_failed += 1;
                        summary.errors.push(format!("{}: {}", symbol, error));
                    }
                }
                Err(join_error) => {
                    warn!(error = %join_error, "Worker task panicked");
                    summary.symbols_failed += 1;
                    summary.errors.push(format!("worker task: {}", join_error));
                }
            }
        }

        if let Some(error) = drift {
            self.runs.fail_run(run.id, error.to_string()).await?;
            return Err(error);
        }

        self.runs.complete_run(run.id).await?;
        info!(
            run_id = run.id,
            symbols_processed = summary.symbols_processed,
            symbols_failed = summary.symbols_failed,
            signals_emitted = summary.signals_emitted,
            "Batch evaluation completed"
        );
        Ok(summary)
    }
}

//! Engine error taxonomy
//!
//! Data insufficiency is deliberately absent here: an indicator without enough
//! history is `None`, and a predicate over `None` is simply unmet. Errors are
//! reserved for conditions that need operator attention.

use thiserror::Error;

use crate::models::run::RunStatus;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A ParameterSet value is out of range or otherwise unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The evaluator computed a strategy key with no catalog row. The rule
    /// table and the catalog have diverged; the run must fail loudly.
    #[error("Unknown strategy key '{key}': rule table and strategy catalog have diverged")]
    UnknownStrategy { key: String },

    /// Bar dates must be strictly increasing within a symbol.
    #[error("Price series for {symbol} is not strictly ordered by date")]
    UnorderedSeries { symbol: String },

    /// A run already in a terminal state cannot transition again.
    #[error("Run {run_id} is already {status:?} and cannot transition again")]
    RunTransition { run_id: i64, status: RunStatus },

    /// Referenced run does not exist.
    #[error("Run {run_id} not found")]
    RunNotFound { run_id: i64 },

    #[error("Storage error: {0}")]
    Store(String),
}

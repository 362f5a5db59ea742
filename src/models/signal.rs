//! Signal events and their evidence payloads

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::strategy::SignalCode;

/// One evaluated condition, kept structured so evidence stays machine-checkable.
/// Rendered to plain text only at the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionCheck {
    pub condition_id: String,
    pub level: u8,
    pub description: String,
    pub satisfied: bool,
}

/// Structured justification attached to every emitted signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// The specific numeric cutoffs taken from the active ParameterSet.
    pub thresholds: serde_json::Value,
    /// Satisfied conditions in level order, one per level traversed. The
    /// first failing condition is not part of the evidence.
    pub reasons: Vec<ConditionCheck>,
    /// Raw numeric evidence score the confidence was derived from.
    pub score: f64,
}

impl Evidence {
    /// Human-readable reason lines for dashboards and API responses.
    pub fn reason_texts(&self) -> Vec<String> {
        self.reasons
            .iter()
            .map(|r| format!("L{}: {}", r.level, r.description))
            .collect()
    }
}

/// One emitted signal. Immutable once written; corrections require a new run.
///
/// Unique per (run_id, symbol, date, signal) within storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub symbol: String,
    /// Bar date the signal fired on.
    pub date: NaiveDate,
    pub signal: SignalCode,
    /// Derived monotonically from the evidence score, in [0, 1).
    pub confidence: f64,
    /// Always equals the strength digit encoded in `signal`.
    pub strength: u8,
    pub evidence: Evidence,
    /// Same-day bar that may still be moving. Superseded by the finalized
    /// end-of-day signal for the same (symbol, date, signal).
    pub provisional: bool,
    pub run_id: Option<i64>,
}

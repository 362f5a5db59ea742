//! Signal assembly: evaluation outcome to SignalEvent
//!
//! Builds the TXYZn code from (base strategy, level), validates it against
//! the catalog, derives confidence from the evidence score, and packages the
//! evidence payload. A computed key with no catalog row is a rule-table /
//! catalog drift bug and surfaces as an error, never a silent skip.

use chrono::NaiveDate;
use serde_json::json;

use crate::error::EngineError;
use crate::models::params::EngineParams;
use crate::models::signal::{Evidence, SignalEvent};
use crate::models::strategy::SignalCode;
use crate::signals::catalog::StrategyCatalog;
use crate::strategies::evaluator::StrategyEvaluation;

/// Confidence mapping scale: `confidence = score / (score + SCALE)`.
/// Monotonic in the score, bounded [0, 1); a full level-9 evaluation with
/// strong components lands around 0.77.
const CONFIDENCE_SCALE: f64 = 30.0;

pub struct SignalAssembler<'a> {
    catalog: &'a StrategyCatalog,
    params: &'a EngineParams,
    run_id: Option<i64>,
}

impl<'a> SignalAssembler<'a> {
    pub fn new(catalog: &'a StrategyCatalog, params: &'a EngineParams, run_id: Option<i64>) -> Self {
        Self {
            catalog,
            params,
            run_id,
        }
    }

    /// Assemble one event from an evaluation with level >= 1.
    ///
    /// Returns `Ok(None)` when the catalog row exists but is inactive
    /// (operator-disabled, not drift).
    pub fn assemble(
        &self,
        symbol: &str,
        date: NaiveDate,
        evaluation: &StrategyEvaluation,
        provisional: bool,
    ) -> Result<Option<SignalEvent>, EngineError> {
        let code = SignalCode::from_parts(evaluation.base_strategy, evaluation.level)
            .map_err(|_| EngineError::UnknownStrategy {
                key: format!("{}{}", evaluation.base_strategy, evaluation.level),
            })?;

        let definition = self
            .catalog
            .get(code.as_str())
            .ok_or_else(|| EngineError::UnknownStrategy {
                key: code.as_str().to_string(),
            })?;
        if !definition.active {
            return Ok(None);
        }

        let evidence = Evidence {
            thresholds: self.thresholds(),
            reasons: evaluation.satisfied_checks(),
            score: evaluation.score,
        };

        Ok(Some(SignalEvent {
            symbol: symbol.to_string(),
            date,
            strength: code.strength(),
            signal: code,
            confidence: confidence_from_score(evaluation.score),
            evidence,
            provisional,
            run_id: self.run_id,
        }))
    }

    /// The numeric cutoffs from the active ParameterSet that the rule table
    /// consulted. Carried verbatim in every evidence payload.
    fn thresholds(&self) -> serde_json::Value {
        json!({
            "rsi_oversold": self.params.rsi_oversold,
            "rsi_overbought": self.params.rsi_overbought,
            "breakout_rsi_floor": self.params.breakout_rsi_floor,
            "breakdown_rsi_ceiling": self.params.breakdown_rsi_ceiling,
            "adx_trend_min": self.params.adx_trend_min,
            "adx_trend_strong": self.params.adx_trend_strong,
            "atr_wick_multiplier": self.params.atr_wick_multiplier,
            "level_tolerance_pct": self.params.level_tolerance_pct,
            "volume_gates": [
                self.params.volume_gate_base,
                self.params.volume_gate_light,
                self.params.volume_gate_medium,
                self.params.volume_gate_strong,
                self.params.volume_gate_extreme,
            ],
            "bb_std_dev": self.params.bb_std_dev,
        })
    }
}

/// Monotonic evidence-score to confidence mapping.
pub fn confidence_from_score(score: f64) -> f64 {
    let score = score.max(0.0);
    score / (score + CONFIDENCE_SCALE)
}

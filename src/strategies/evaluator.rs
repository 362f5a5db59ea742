//! Cumulative strategy level evaluation
//!
//! For each base strategy, find the highest level L such that the conditions
//! for levels 1..=L all hold. Conditions are additive, so evaluation walks
//! levels in order and stops at the first failure; a level can never be
//! reached past a failed lower condition.

use crate::models::signal::ConditionCheck;
use crate::models::strategy::Side;
use crate::strategies::rules::{rule_table, EvalContext, StrategyRules};

/// Weights of the evidence score components. Together with the 10-point
/// per-level base they fix the documented score formula:
/// `score = 10 * level + 10 * (0.4 * magnitude + 0.3 * momentum + 0.3 * volume)`.
const MAGNITUDE_WEIGHT: f64 = 0.4;
const MOMENTUM_WEIGHT: f64 = 0.3;
const VOLUME_WEIGHT: f64 = 0.3;
const LEVEL_POINTS: f64 = 10.0;

/// Outcome of evaluating one base strategy on one bar.
#[derive(Debug, Clone)]
pub struct StrategyEvaluation {
    pub base_strategy: &'static str,
    pub side: Side,
    /// Highest fully satisfied level, 1-9. Level 0 never produces an
    /// evaluation: a failed base trigger is "no event", not a weak event.
    pub level: u8,
    /// One check per level traversed: levels 1..=level satisfied, plus the
    /// first failing level (if any) marked unsatisfied.
    pub checks: Vec<ConditionCheck>,
    /// Raw numeric evidence score; see the module constants for the formula.
    pub score: f64,
}

impl StrategyEvaluation {
    /// Satisfied checks only, the shape the evidence payload carries.
    pub fn satisfied_checks(&self) -> Vec<ConditionCheck> {
        self.checks.iter().filter(|c| c.satisfied).cloned().collect()
    }
}

/// Evaluate one base strategy. Returns `None` when the base trigger fails.
pub fn evaluate_bar(rules: &StrategyRules, ctx: &EvalContext) -> Option<StrategyEvaluation> {
    let mut checks: Vec<ConditionCheck> = Vec::new();
    let mut level: u8 = 0;

    for rule in &rules.levels {
        let satisfied = (rule.predicate)(ctx);
        if satisfied {
            level = rule.level;
            checks.push(ConditionCheck {
                condition_id: rule.id.to_string(),
                level: rule.level,
                description: rule.description.to_string(),
                satisfied: true,
            });
        } else {
            if rule.level == 1 {
                return None;
            }
            checks.push(ConditionCheck {
                condition_id: rule.id.to_string(),
                level: rule.level,
                description: rule.description.to_string(),
                satisfied: false,
            });
            break;
        }
    }

    let score = evidence_score(level, rules.side, ctx);
    Some(StrategyEvaluation {
        base_strategy: rules.base,
        side: rules.side,
        level,
        checks,
        score,
    })
}

/// Evaluate all 12 base strategies for one bar. Strategies of the same side
/// firing together are all returned; there is no mutual exclusion.
pub fn evaluate_strategies(ctx: &EvalContext) -> Vec<StrategyEvaluation> {
    rule_table()
        .iter()
        .filter_map(|rules| evaluate_bar(rules, ctx))
        .collect()
}

/// Weighted evidence score.
///
/// - magnitude: side-aligned RSI distance from the 50 midline, normalized
/// - momentum: ATR-normalized MACD histogram when aligned with the side
/// - volume: volume ratio against the extreme gate, capped at 1
///
/// Each component is in [0, 1]; the total is `10 * level` plus up to 10
/// weighted bonus points, so deeper levels always dominate.
fn evidence_score(level: u8, side: Side, ctx: &EvalContext) -> f64 {
    let magnitude = ctx
        .cur
        .rsi
        .map(|rsi| {
            let distance = match side {
                Side::Buy => rsi - 50.0,
                Side::Sell => 50.0 - rsi,
            };
            (distance / 50.0).clamp(0.0, 1.0)
        })
        .unwrap_or(0.0);

    let momentum = match (ctx.cur.macd_histogram, ctx.cur.atr) {
        (Some(hist), Some(atr)) if atr > 0.0 => {
            let aligned = match side {
                Side::Buy => hist > 0.0,
                Side::Sell => hist < 0.0,
            };
            if aligned {
                (hist.abs() / atr).min(1.0)
            } else {
                0.0
            }
        }
        _ => 0.0,
    };

    let volume = ctx
        .cur
        .volume_ratio
        .map(|r| (r / ctx.params.volume_gate_extreme).min(1.0))
        .unwrap_or(0.0);

    LEVEL_POINTS * level as f64
        + LEVEL_POINTS
            * (MAGNITUDE_WEIGHT * magnitude + MOMENTUM_WEIGHT * momentum + VOLUME_WEIGHT * volume)
}

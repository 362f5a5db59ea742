//! Cumulative level evaluation tests
//!
//! Vectors are hand-built so each condition is controlled independently of
//! the indicator math (covered by its own tests).

use chrono::NaiveDate;
use stratix::models::candle::Candle;
use stratix::models::indicators::IndicatorVector;
use stratix::models::params::EngineParams;
use stratix::strategies::evaluator::{evaluate_bar, evaluate_strategies};
use stratix::strategies::rules::{rule_table, EvalContext, StrategyRules};

fn breakout_rules() -> &'static StrategyRules {
    rule_table()
        .iter()
        .find(|r| r.base == "BBRK")
        .expect("breakout family present")
}

fn prev_bar() -> Candle {
    Candle::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        99.5,
        101.0,
        99.0,
        100.0,
        1000.0,
    )
}

fn breakout_bar() -> Candle {
    Candle::new(
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        101.0,
        105.5,
        100.5,
        105.0,
        1600.0,
    )
}

/// Previous-bar vector: close 100 was inside the 104 upper band.
fn prev_vector() -> IndicatorVector {
    IndicatorVector {
        bb_upper: Some(104.0),
        ..IndicatorVector::default()
    }
}

/// Current-bar vector satisfying breakout levels 1-8 but not the level-9
/// EMA stack (EMA-100 still undefined).
fn breakout_vector() -> IndicatorVector {
    IndicatorVector {
        bb_upper: Some(104.5),
        volume_ratio: Some(1.6),
        rsi: Some(62.0),
        ema_12: Some(103.0),
        ema_26: Some(101.0),
        macd: Some(1.2),
        macd_signal: Some(0.8),
        macd_histogram: Some(0.4),
        atr: Some(2.0),
        ema_50: Some(99.0),
        ema_20: Some(102.0),
        bb_width_rising: Some(true),
        ..IndicatorVector::default()
    }
}

#[test]
fn breakout_reaches_level_eight() {
    let params = EngineParams::default();
    let prev_bar = prev_bar();
    let bar = breakout_bar();
    let prev = prev_vector();
    let cur = breakout_vector();
    let ctx = EvalContext {
        bar: &bar,
        prev_bar: &prev_bar,
        cur: &cur,
        prev: &prev,
        params: &params,
    };

    let eval = evaluate_bar(breakout_rules(), &ctx).expect("base trigger satisfied");
    assert_eq!(eval.level, 8);
    // Levels 1-8 satisfied plus the failing level-9 check recorded
    assert_eq!(eval.checks.len(), 9);
    assert_eq!(eval.satisfied_checks().len(), 8);
    let last = eval.checks.last().unwrap();
    assert_eq!(last.level, 9);
    assert!(!last.satisfied);

    // score = 10 * 8 + 10 * (0.4 * 0.24 + 0.3 * 0.2 + 0.3 * 1.0)
    assert!((eval.score - 84.56).abs() < 1e-9, "score was {}", eval.score);
}

#[test]
fn failed_lower_level_caps_the_depth() {
    // Volume below the level-2 gate: deeper conditions hold but can never
    // be reached past the failure.
    let params = EngineParams::default();
    let prev_bar = prev_bar();
    let bar = breakout_bar();
    let prev = prev_vector();
    let cur = IndicatorVector {
        volume_ratio: Some(1.05),
        ..breakout_vector()
    };
    let ctx = EvalContext {
        bar: &bar,
        prev_bar: &prev_bar,
        cur: &cur,
        prev: &prev,
        params: &params,
    };

    let eval = evaluate_bar(breakout_rules(), &ctx).expect("base trigger satisfied");
    assert_eq!(eval.level, 1);
    assert_eq!(eval.checks.len(), 2);
    assert_eq!(eval.satisfied_checks().len(), 1);
}

#[test]
fn failed_base_trigger_is_no_event() {
    let params = EngineParams::default();
    let prev_bar = prev_bar();
    // Close stays under the upper band: no breakout, no weak level-0 event.
    let bar = Candle::new(
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        101.0,
        104.4,
        100.5,
        104.0,
        1600.0,
    );
    let prev = prev_vector();
    let cur = breakout_vector();
    let ctx = EvalContext {
        bar: &bar,
        prev_bar: &prev_bar,
        cur: &cur,
        prev: &prev,
        params: &params,
    };

    assert!(evaluate_bar(breakout_rules(), &ctx).is_none());
}

#[test]
fn only_triggered_families_produce_evaluations() {
    let params = EngineParams::default();
    let prev_bar = prev_bar();
    let bar = breakout_bar();
    let prev = prev_vector();
    let cur = breakout_vector();
    let ctx = EvalContext {
        bar: &bar,
        prev_bar: &prev_bar,
        cur: &cur,
        prev: &prev,
        params: &params,
    };

    let evaluations = evaluate_strategies(&ctx);
    assert_eq!(evaluations.len(), 1);
    assert_eq!(evaluations[0].base_strategy, "BBRK");
    assert!(evaluations[0].level >= 1);
}

#[test]
fn quiet_bar_produces_nothing() {
    let params = EngineParams::default();
    let prev_bar = prev_bar();
    let bar = breakout_bar();
    let empty = IndicatorVector::default();
    let ctx = EvalContext {
        bar: &bar,
        prev_bar: &prev_bar,
        cur: &empty,
        prev: &empty,
        params: &params,
    };

    assert!(evaluate_strategies(&ctx).is_empty());
}

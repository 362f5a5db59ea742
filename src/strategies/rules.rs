//! Declarative strategy rule table
//!
//! 12 base strategies, each a level-1 base trigger plus 8 incremental
//! conditions (levels 2-9). The table is pure data: predicates keyed by
//! (base_strategy, level), reviewable without reading the evaluator. Level
//! semantics are strictly cumulative; the evaluator enforces that, the table
//! only supplies the per-level predicates.
//!
//! Every predicate treats an undefined indicator (`None`) as "condition not
//! met". Crossing and slope conditions read the previous bar's vector.

use std::sync::OnceLock;

use crate::models::candle::Candle;
use crate::models::indicators::IndicatorVector;
use crate::models::params::EngineParams;
use crate::models::strategy::{Side, StrategyCategory};

/// Everything a predicate may look at for one bar.
pub struct EvalContext<'a> {
    pub bar: &'a Candle,
    pub prev_bar: &'a Candle,
    pub cur: &'a IndicatorVector,
    pub prev: &'a IndicatorVector,
    pub params: &'a EngineParams,
}

pub type Predicate = fn(&EvalContext) -> bool;

pub struct LevelRule {
    pub level: u8,
    pub id: &'static str,
    pub description: &'static str,
    pub predicate: Predicate,
}

pub struct StrategyRules {
    /// 4-character base family, first character is the side.
    pub base: &'static str,
    pub side: Side,
    pub category: StrategyCategory,
    pub name: &'static str,
    /// Exactly one rule per level 1-9, in order.
    pub levels: [LevelRule; 9],
}

// Option-safe comparison helpers. Undefined always fails.

fn gt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

fn lt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}

fn ge_val(a: Option<f64>, threshold: f64) -> bool {
    matches!(a, Some(a) if a >= threshold)
}

fn le_val(a: Option<f64>, threshold: f64) -> bool {
    matches!(a, Some(a) if a <= threshold)
}

fn gt_val(a: Option<f64>, threshold: f64) -> bool {
    matches!(a, Some(a) if a > threshold)
}

fn lt_val(a: Option<f64>, threshold: f64) -> bool {
    matches!(a, Some(a) if a < threshold)
}

fn rising(cur: Option<f64>, prev: Option<f64>) -> bool {
    matches!((cur, prev), (Some(c), Some(p)) if c > p)
}

fn falling(cur: Option<f64>, prev: Option<f64>) -> bool {
    matches!((cur, prev), (Some(c), Some(p)) if c < p)
}

fn is_true(flag: Option<bool>) -> bool {
    flag.unwrap_or(false)
}

/// prev_a <= prev_b on the prior bar, a > b now.
fn crossed_above(prev_a: Option<f64>, prev_b: Option<f64>, a: Option<f64>, b: Option<f64>) -> bool {
    match (prev_a, prev_b, a, b) {
        (Some(pa), Some(pb), Some(a), Some(b)) => pa <= pb && a > b,
        _ => false,
    }
}

fn crossed_below(prev_a: Option<f64>, prev_b: Option<f64>, a: Option<f64>, b: Option<f64>) -> bool {
    match (prev_a, prev_b, a, b) {
        (Some(pa), Some(pb), Some(a), Some(b)) => pa >= pb && a < b,
        _ => false,
    }
}

/// Support zone upper edge for the bar, from the previous bar's rolling low.
fn support_zone(ctx: &EvalContext) -> Option<f64> {
    ctx.prev
        .rolling_low
        .map(|low| low * (1.0 + ctx.params.level_tolerance_pct / 100.0))
}

/// Resistance zone lower edge, from the previous bar's rolling high.
fn resistance_zone(ctx: &EvalContext) -> Option<f64> {
    ctx.prev
        .rolling_high
        .map(|high| high * (1.0 - ctx.params.level_tolerance_pct / 100.0))
}

fn table() -> [StrategyRules; 12] {
    [
        StrategyRules {
            base: "BBRK",
            side: Side::Buy,
            category: StrategyCategory::Breakout,
            name: "Buy Breakout",
            levels: [
                LevelRule {
                    level: 1,
                    id: "bbrk_l1_band_break",
                    description: "Close crosses above the upper Bollinger Band",
                    predicate: |ctx| {
                        crossed_above(
                            Some(ctx.prev_bar.close),
                            ctx.prev.bb_upper,
                            Some(ctx.bar.close),
                            ctx.cur.bb_upper,
                        )
                    },
                },
                LevelRule {
                    level: 2,
                    id: "bbrk_l2_volume_light",
                    description: "Volume at least 1.1x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_light),
                },
                LevelRule {
                    level: 3,
                    id: "bbrk_l3_rsi_momentum",
                    description: "RSI at or above the breakout floor (55)",
                    predicate: |ctx| ge_val(ctx.cur.rsi, ctx.params.breakout_rsi_floor),
                },
                LevelRule {
                    level: 4,
                    id: "bbrk_l4_ema_fast_over_slow",
                    description: "EMA(12) above EMA(26)",
                    predicate: |ctx| gt(ctx.cur.ema_12, ctx.cur.ema_26),
                },
                LevelRule {
                    level: 5,
                    id: "bbrk_l5_macd_aligned",
                    description: "MACD above its signal line",
                    predicate: |ctx| gt(ctx.cur.macd, ctx.cur.macd_signal),
                },
                LevelRule {
                    level: 6,
                    id: "bbrk_l6_above_ema50",
                    description: "Close above EMA(50)",
                    predicate: |ctx| gt(Some(ctx.bar.close), ctx.cur.ema_50),
                },
                LevelRule {
                    level: 7,
                    id: "bbrk_l7_width_rising",
                    description: "Bollinger band width rising in at least 3 of the prior 5 bars",
                    predicate: |ctx| is_true(ctx.cur.bb_width_rising),
                },
                LevelRule {
                    level: 8,
                    id: "bbrk_l8_volume_strong",
                    description: "Volume at least 1.3x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_strong),
                },
                LevelRule {
                    level: 9,
                    id: "bbrk_l9_ema_stack",
                    description: "EMA(20) > EMA(50) > EMA(100) with RSI at least 60",
                    predicate: |ctx| {
                        gt(ctx.cur.ema_20, ctx.cur.ema_50)
                            && gt(ctx.cur.ema_50, ctx.cur.ema_100)
                            && ge_val(ctx.cur.rsi, 60.0)
                    },
                },
            ],
        },
        StrategyRules {
            base: "BOSR",
            side: Side::Buy,
            category: StrategyCategory::MeanReversion,
            name: "Buy Oversold Reversal",
            levels: [
                LevelRule {
                    level: 1,
                    id: "bosr_l1_rsi_recross",
                    description: "RSI crosses back up through the oversold band (30)",
                    predicate: |ctx| {
                        match (ctx.prev.rsi, ctx.cur.rsi) {
                            (Some(p), Some(c)) => {
                                p < ctx.params.rsi_oversold && c >= ctx.params.rsi_oversold
                            }
                            _ => false,
                        }
                    },
                },
                LevelRule {
                    level: 2,
                    id: "bosr_l2_positive_close",
                    description: "Bar closes above its open",
                    predicate: |ctx| ctx.bar.close > ctx.bar.open,
                },
                LevelRule {
                    level: 3,
                    id: "bosr_l3_volume_base",
                    description: "Volume at least 1.0x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_base),
                },
                LevelRule {
                    level: 4,
                    id: "bosr_l4_stoch_cross",
                    description: "Stochastic %K above %D",
                    predicate: |ctx| gt(ctx.cur.stoch_k, ctx.cur.stoch_d),
                },
                LevelRule {
                    level: 5,
                    id: "bosr_l5_histogram_rising",
                    description: "MACD histogram improving versus the prior bar",
                    predicate: |ctx| rising(ctx.cur.macd_histogram, ctx.prev.macd_histogram),
                },
                LevelRule {
                    level: 6,
                    id: "bosr_l6_back_inside_bands",
                    description: "Close back above the lower Bollinger Band",
                    predicate: |ctx| gt(Some(ctx.bar.close), ctx.cur.bb_lower),
                },
                LevelRule {
                    level: 7,
                    id: "bosr_l7_williams_recovery",
                    description: "Williams %R recovered above -80",
                    predicate: |ctx| gt_val(ctx.cur.williams_r, -80.0),
                },
                LevelRule {
                    level: 8,
                    id: "bosr_l8_volume_medium",
                    description: "Volume at least 1.2x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_medium),
                },
                LevelRule {
                    level: 9,
                    id: "bosr_l9_reclaim_ema10",
                    description: "Close above EMA(10) with MFI at least 40",
                    predicate: |ctx| {
                        gt(Some(ctx.bar.close), ctx.cur.ema_10) && ge_val(ctx.cur.mfi, 40.0)
                    },
                },
            ],
        },
        StrategyRules {
            base: "BMAC",
            side: Side::Buy,
            category: StrategyCategory::Trend,
            name: "Buy MACD Cross",
            levels: [
                LevelRule {
                    level: 1,
                    id: "bmac_l1_macd_cross",
                    description: "MACD crosses above its signal line",
                    predicate: |ctx| {
                        crossed_above(
                            ctx.prev.macd,
                            ctx.prev.macd_signal,
                            ctx.cur.macd,
                            ctx.cur.macd_signal,
                        )
                    },
                },
                LevelRule {
                    level: 2,
                    id: "bmac_l2_histogram_rising",
                    description: "MACD histogram improving versus the prior bar",
                    predicate: |ctx| rising(ctx.cur.macd_histogram, ctx.prev.macd_histogram),
                },
                LevelRule {
                    level: 3,
                    id: "bmac_l3_volume_base",
                    description: "Volume at least 1.0x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_base),
                },
                LevelRule {
                    level: 4,
                    id: "bmac_l4_rsi_bullish",
                    description: "RSI at or above 50",
                    predicate: |ctx| ge_val(ctx.cur.rsi, 50.0),
                },
                LevelRule {
                    level: 5,
                    id: "bmac_l5_above_ema26",
                    description: "Close above EMA(26)",
                    predicate: |ctx| gt(Some(ctx.bar.close), ctx.cur.ema_26),
                },
                LevelRule {
                    level: 6,
                    id: "bmac_l6_macd_positive",
                    description: "MACD above the zero line",
                    predicate: |ctx| gt_val(ctx.cur.macd, 0.0),
                },
                LevelRule {
                    level: 7,
                    id: "bmac_l7_adx_trending",
                    description: "ADX at or above the trend minimum (20)",
                    predicate: |ctx| ge_val(ctx.cur.adx, ctx.params.adx_trend_min),
                },
                LevelRule {
                    level: 8,
                    id: "bmac_l8_volume_medium",
                    description: "Volume at least 1.2x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_medium),
                },
                LevelRule {
                    level: 9,
                    id: "bmac_l9_strong_trend",
                    description: "Close above EMA(50) with ADX at least 25",
                    predicate: |ctx| {
                        gt(Some(ctx.bar.close), ctx.cur.ema_50)
                            && ge_val(ctx.cur.adx, ctx.params.adx_trend_strong)
                    },
                },
            ],
        },
        StrategyRules {
            base: "BBOL",
            side: Side::Buy,
            category: StrategyCategory::MeanReversion,
            name: "Buy Bollinger Bounce",
            levels: [
                LevelRule {
                    level: 1,
                    id: "bbol_l1_reentry",
                    description: "Close re-enters the bands from below the lower Bollinger Band",
                    predicate: |ctx| {
                        match (ctx.prev.bb_lower, ctx.cur.bb_lower) {
                            (Some(pl), Some(cl)) => {
                                ctx.prev_bar.close < pl && ctx.bar.close >= cl
                            }
                            _ => false,
                        }
                    },
                },
                LevelRule {
                    level: 2,
                    id: "bbol_l2_positive_close",
                    description: "Bar closes above its open",
                    predicate: |ctx| ctx.bar.close > ctx.bar.open,
                },
                LevelRule {
                    level: 3,
                    id: "bbol_l3_rsi_depressed",
                    description: "RSI still at or below 40 (room to revert)",
                    predicate: |ctx| le_val(ctx.cur.rsi, 40.0),
                },
                LevelRule {
                    level: 4,
                    id: "bbol_l4_volume_base",
                    description: "Volume at least 1.0x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_base),
                },
                LevelRule {
                    level: 5,
                    id: "bbol_l5_stoch_turning",
                    description: "Stochastic %K turning up versus the prior bar",
                    predicate: |ctx| rising(ctx.cur.stoch_k, ctx.prev.stoch_k),
                },
                LevelRule {
                    level: 6,
                    id: "bbol_l6_off_the_floor",
                    description: "%B at least 0.05 (off the band floor)",
                    predicate: |ctx| ge_val(ctx.cur.bb_percent_b, 0.05),
                },
                LevelRule {
                    level: 7,
                    id: "bbol_l7_mfi_returning",
                    description: "Money Flow Index improving versus the prior bar",
                    predicate: |ctx| rising(ctx.cur.mfi, ctx.prev.mfi),
                },
                LevelRule {
                    level: 8,
                    id: "bbol_l8_volume_light",
                    description: "Volume at least 1.1x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_light),
                },
                LevelRule {
                    level: 9,
                    id: "bbol_l9_momentum_confirms",
                    description: "MACD histogram improving with Williams %R above -80",
                    predicate: |ctx| {
                        rising(ctx.cur.macd_histogram, ctx.prev.macd_histogram)
                            && gt_val(ctx.cur.williams_r, -80.0)
                    },
                },
            ],
        },
        StrategyRules {
            base: "BDIV",
            side: Side::Buy,
            category: StrategyCategory::Divergence,
            name: "Buy Bullish Divergence",
            levels: [
                LevelRule {
                    level: 1,
                    id: "bdiv_l1_divergence",
                    description: "Price makes a lower low while RSI makes a higher low",
                    predicate: |ctx| is_true(ctx.cur.bullish_divergence),
                },
                LevelRule {
                    level: 2,
                    id: "bdiv_l2_rsi_depressed",
                    description: "RSI at or below 45",
                    predicate: |ctx| le_val(ctx.cur.rsi, 45.0),
                },
                LevelRule {
                    level: 3,
                    id: "bdiv_l3_positive_close",
                    description: "Bar closes above its open",
                    predicate: |ctx| ctx.bar.close > ctx.bar.open,
                },
                LevelRule {
                    level: 4,
                    id: "bdiv_l4_volume_base",
                    description: "Volume at least 1.0x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_base),
                },
                LevelRule {
                    level: 5,
                    id: "bdiv_l5_histogram_rising",
                    description: "MACD histogram improving versus the prior bar",
                    predicate: |ctx| rising(ctx.cur.macd_histogram, ctx.prev.macd_histogram),
                },
                LevelRule {
                    level: 6,
                    id: "bdiv_l6_stoch_cross",
                    description: "Stochastic %K above %D",
                    predicate: |ctx| gt(ctx.cur.stoch_k, ctx.cur.stoch_d),
                },
                LevelRule {
                    level: 7,
                    id: "bdiv_l7_follow_through",
                    description: "Close above the prior bar's close",
                    predicate: |ctx| ctx.bar.close > ctx.prev_bar.close,
                },
                LevelRule {
                    level: 8,
                    id: "bdiv_l8_accumulation",
                    description: "Accumulation/Distribution line rising",
                    predicate: |ctx| rising(ctx.cur.ad_line, ctx.prev.ad_line),
                },
                LevelRule {
                    level: 9,
                    id: "bdiv_l9_reclaim_ema10",
                    description: "Close above EMA(10) with volume at least 1.1x average",
                    predicate: |ctx| {
                        gt(Some(ctx.bar.close), ctx.cur.ema_10)
                            && ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_light)
                    },
                },
            ],
        },
        StrategyRules {
            base: "BSUP",
            side: Side::Buy,
            category: StrategyCategory::Level,
            name: "Buy Support Bounce",
            levels: [
                LevelRule {
                    level: 1,
                    id: "bsup_l1_support_touch",
                    description: "Low touches the 20-bar support zone and close recovers above it",
                    predicate: |ctx| match support_zone(ctx) {
                        Some(zone) => ctx.bar.low <= zone && ctx.bar.close > zone,
                        None => false,
                    },
                },
                LevelRule {
                    level: 2,
                    id: "bsup_l2_positive_close",
                    description: "Bar closes above its open",
                    predicate: |ctx| ctx.bar.close > ctx.bar.open,
                },
                LevelRule {
                    level: 3,
                    id: "bsup_l3_volume_base",
                    description: "Volume at least 1.0x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_base),
                },
                LevelRule {
                    level: 4,
                    id: "bsup_l4_rsi_holding",
                    description: "RSI at or above 35 (sellers not in control)",
                    predicate: |ctx| ge_val(ctx.cur.rsi, 35.0),
                },
                LevelRule {
                    level: 5,
                    id: "bsup_l5_stoch_turning",
                    description: "Stochastic %K turning up versus the prior bar",
                    predicate: |ctx| rising(ctx.cur.stoch_k, ctx.prev.stoch_k),
                },
                LevelRule {
                    level: 6,
                    id: "bsup_l6_rejection_wick",
                    description: "Intrabar recovery of at least 0.5 ATR off the low",
                    predicate: |ctx| match ctx.cur.atr {
                        Some(atr) => {
                            ctx.bar.close - ctx.bar.low >= ctx.params.atr_wick_multiplier * atr
                        }
                        None => false,
                    },
                },
                LevelRule {
                    level: 7,
                    id: "bsup_l7_histogram_rising",
                    description: "MACD histogram improving versus the prior bar",
                    predicate: |ctx| rising(ctx.cur.macd_histogram, ctx.prev.macd_histogram),
                },
                LevelRule {
                    level: 8,
                    id: "bsup_l8_volume_medium",
                    description: "Volume at least 1.2x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_medium),
                },
                LevelRule {
                    level: 9,
                    id: "bsup_l9_reclaim_ema20",
                    description: "Close above EMA(20) with RSI at least 45",
                    predicate: |ctx| {
                        gt(Some(ctx.bar.close), ctx.cur.ema_20) && ge_val(ctx.cur.rsi, 45.0)
                    },
                },
            ],
        },
        StrategyRules {
            base: "SBDN",
            side: Side::Sell,
            category: StrategyCategory::Breakout,
            name: "Sell Breakdown",
            levels: [
                LevelRule {
                    level: 1,
                    id: "sbdn_l1_band_break",
                    description: "Close crosses below the lower Bollinger Band",
                    predicate: |ctx| {
                        crossed_below(
                            Some(ctx.prev_bar.close),
                            ctx.prev.bb_lower,
                            Some(ctx.bar.close),
                            ctx.cur.bb_lower,
                        )
                    },
                },
                LevelRule {
                    level: 2,
                    id: "sbdn_l2_volume_light",
                    description: "Volume at least 1.1x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_light),
                },
                LevelRule {
                    level: 3,
                    id: "sbdn_l3_rsi_weak",
                    description: "RSI at or below the breakdown ceiling (45)",
                    predicate: |ctx| le_val(ctx.cur.rsi, ctx.params.breakdown_rsi_ceiling),
                },
                LevelRule {
                    level: 4,
                    id: "sbdn_l4_ema_fast_under_slow",
                    description: "EMA(12) below EMA(26)",
                    predicate: |ctx| lt(ctx.cur.ema_12, ctx.cur.ema_26),
                },
                LevelRule {
                    level: 5,
                    id: "sbdn_l5_macd_aligned",
                    description: "MACD below its signal line",
                    predicate: |ctx| lt(ctx.cur.macd, ctx.cur.macd_signal),
                },
                LevelRule {
                    level: 6,
                    id: "sbdn_l6_below_ema50",
                    description: "Close below EMA(50)",
                    predicate: |ctx| lt(Some(ctx.bar.close), ctx.cur.ema_50),
                },
                LevelRule {
                    level: 7,
                    id: "sbdn_l7_width_rising",
                    description: "Bollinger band width rising in at least 3 of the prior 5 bars",
                    predicate: |ctx| is_true(ctx.cur.bb_width_rising),
                },
                LevelRule {
                    level: 8,
                    id: "sbdn_l8_volume_strong",
                    description: "Volume at least 1.3x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_strong),
                },
                LevelRule {
                    level: 9,
                    id: "sbdn_l9_ema_stack",
                    description: "EMA(20) < EMA(50) < EMA(100) with RSI at or below 40",
                    predicate: |ctx| {
                        lt(ctx.cur.ema_20, ctx.cur.ema_50)
                            && lt(ctx.cur.ema_50, ctx.cur.ema_100)
                            && le_val(ctx.cur.rsi, 40.0)
                    },
                },
            ],
        },
        StrategyRules {
            base: "SOBR",
            side: Side::Sell,
            category: StrategyCategory::MeanReversion,
            name: "Sell Overbought Reversal",
            levels: [
                LevelRule {
                    level: 1,
                    id: "sobr_l1_rsi_recross",
                    description: "RSI crosses back down through the overbought band (70)",
                    predicate: |ctx| {
                        match (ctx.prev.rsi, ctx.cur.rsi) {
                            (Some(p), Some(c)) => {
                                p > ctx.params.rsi_overbought && c <= ctx.params.rsi_overbought
                            }
                            _ => false,
                        }
                    },
                },
                LevelRule {
                    level: 2,
                    id: "sobr_l2_negative_close",
                    description: "Bar closes below its open",
                    predicate: |ctx| ctx.bar.close < ctx.bar.open,
                },
                LevelRule {
                    level: 3,
                    id: "sobr_l3_volume_base",
                    description: "Volume at least 1.0x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_base),
                },
                LevelRule {
                    level: 4,
                    id: "sobr_l4_stoch_cross",
                    description: "Stochastic %K below %D",
                    predicate: |ctx| lt(ctx.cur.stoch_k, ctx.cur.stoch_d),
                },
                LevelRule {
                    level: 5,
                    id: "sobr_l5_histogram_falling",
                    description: "MACD histogram deteriorating versus the prior bar",
                    predicate: |ctx| falling(ctx.cur.macd_histogram, ctx.prev.macd_histogram),
                },
                LevelRule {
                    level: 6,
                    id: "sobr_l6_back_inside_bands",
                    description: "Close back below the upper Bollinger Band",
                    predicate: |ctx| lt(Some(ctx.bar.close), ctx.cur.bb_upper),
                },
                LevelRule {
                    level: 7,
                    id: "sobr_l7_williams_rollover",
                    description: "Williams %R rolled below -20",
                    predicate: |ctx| lt_val(ctx.cur.williams_r, -20.0),
                },
                LevelRule {
                    level: 8,
                    id: "sobr_l8_volume_medium",
                    description: "Volume at least 1.2x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_medium),
                },
                LevelRule {
                    level: 9,
                    id: "sobr_l9_lose_ema10",
                    description: "Close below EMA(10) with MFI at or below 60",
                    predicate: |ctx| {
                        lt(Some(ctx.bar.close), ctx.cur.ema_10) && le_val(ctx.cur.mfi, 60.0)
                    },
                },
            ],
        },
        StrategyRules {
            base: "SMAC",
            side: Side::Sell,
            category: StrategyCategory::Trend,
            name: "Sell MACD Cross",
            levels: [
                LevelRule {
                    level: 1,
                    id: "smac_l1_macd_cross",
                    description: "MACD crosses below its signal line",
                    predicate: |ctx| {
                        crossed_below(
                            ctx.prev.macd,
                            ctx.prev.macd_signal,
                            ctx.cur.macd,
                            ctx.cur.macd_signal,
                        )
                    },
                },
                LevelRule {
                    level: 2,
                    id: "smac_l2_histogram_falling",
                    description: "MACD histogram deteriorating versus the prior bar",
                    predicate: |ctx| falling(ctx.cur.macd_histogram, ctx.prev.macd_histogram),
                },
                LevelRule {
                    level: 3,
                    id: "smac_l3_volume_base",
                    description: "Volume at least 1.0x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_base),
                },
                LevelRule {
                    level: 4,
                    id: "smac_l4_rsi_bearish",
                    description: "RSI at or below 50",
                    predicate: |ctx| le_val(ctx.cur.rsi, 50.0),
                },
                LevelRule {
                    level: 5,
                    id: "smac_l5_below_ema26",
                    description: "Close below EMA(26)",
                    predicate: |ctx| lt(Some(ctx.bar.close), ctx.cur.ema_26),
                },
                LevelRule {
                    level: 6,
                    id: "smac_l6_macd_negative",
                    description: "MACD below the zero line",
                    predicate: |ctx| lt_val(ctx.cur.macd, 0.0),
                },
                LevelRule {
                    level: 7,
                    id: "smac_l7_adx_trending",
                    description: "ADX at or above the trend minimum (20)",
                    predicate: |ctx| ge_val(ctx.cur.adx, ctx.params.adx_trend_min),
                },
                LevelRule {
                    level: 8,
                    id: "smac_l8_volume_medium",
                    description: "Volume at least 1.2x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_medium),
                },
                LevelRule {
                    level: 9,
                    id: "smac_l9_strong_trend",
                    description: "Close below EMA(50) with ADX at least 25",
                    predicate: |ctx| {
                        lt(Some(ctx.bar.close), ctx.cur.ema_50)
                            && ge_val(ctx.cur.adx, ctx.params.adx_trend_strong)
                    },
                },
            ],
        },
        StrategyRules {
            base: "SDIV",
            side: Side::Sell,
            category: StrategyCategory::Divergence,
            name: "Sell Bearish Divergence",
            levels: [
                LevelRule {
                    level: 1,
                    id: "sdiv_l1_divergence",
                    description: "Price makes a higher high while RSI makes a lower high",
                    predicate: |ctx| is_true(ctx.cur.bearish_divergence),
                },
                LevelRule {
                    level: 2,
                    id: "sdiv_l2_rsi_elevated",
                    description: "RSI at or above 55",
                    predicate: |ctx| ge_val(ctx.cur.rsi, 55.0),
                },
                LevelRule {
                    level: 3,
                    id: "sdiv_l3_negative_close",
                    description: "Bar closes below its open",
                    predicate: |ctx| ctx.bar.close < ctx.bar.open,
                },
                LevelRule {
                    level: 4,
                    id: "sdiv_l4_volume_base",
                    description: "Volume at least 1.0x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_base),
                },
                LevelRule {
                    level: 5,
                    id: "sdiv_l5_histogram_falling",
                    description: "MACD histogram deteriorating versus the prior bar",
                    predicate: |ctx| falling(ctx.cur.macd_histogram, ctx.prev.macd_histogram),
                },
                LevelRule {
                    level: 6,
                    id: "sdiv_l6_stoch_cross",
                    description: "Stochastic %K below %D",
                    predicate: |ctx| lt(ctx.cur.stoch_k, ctx.cur.stoch_d),
                },
                LevelRule {
                    level: 7,
                    id: "sdiv_l7_follow_through",
                    description: "Close below the prior bar's close",
                    predicate: |ctx| ctx.bar.close < ctx.prev_bar.close,
                },
                LevelRule {
                    level: 8,
                    id: "sdiv_l8_distribution",
                    description: "Accumulation/Distribution line falling",
                    predicate: |ctx| falling(ctx.cur.ad_line, ctx.prev.ad_line),
                },
                LevelRule {
                    level: 9,
                    id: "sdiv_l9_lose_ema10",
                    description: "Close below EMA(10) with volume at least 1.1x average",
                    predicate: |ctx| {
                        lt(Some(ctx.bar.close), ctx.cur.ema_10)
                            && ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_light)
                    },
                },
            ],
        },
        StrategyRules {
            base: "SRES",
            side: Side::Sell,
            category: StrategyCategory::Level,
            name: "Sell Resistance Rejection",
            levels: [
                LevelRule {
                    level: 1,
                    id: "sres_l1_resistance_touch",
                    description: "High touches the 20-bar resistance zone and close rejects below it",
                    predicate: |ctx| match resistance_zone(ctx) {
                        Some(zone) => ctx.bar.high >= zone && ctx.bar.close < zone,
                        None => false,
                    },
                },
                LevelRule {
                    level: 2,
                    id: "sres_l2_negative_close",
                    description: "Bar closes below its open",
                    predicate: |ctx| ctx.bar.close < ctx.bar.open,
                },
                LevelRule {
                    level: 3,
                    id: "sres_l3_volume_base",
                    description: "Volume at least 1.0x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_base),
                },
                LevelRule {
                    level: 4,
                    id: "sres_l4_rsi_capped",
                    description: "RSI at or below 65 (no breakout momentum)",
                    predicate: |ctx| le_val(ctx.cur.rsi, 65.0),
                },
                LevelRule {
                    level: 5,
                    id: "sres_l5_stoch_turning",
                    description: "Stochastic %K turning down versus the prior bar",
                    predicate: |ctx| falling(ctx.cur.stoch_k, ctx.prev.stoch_k),
                },
                LevelRule {
                    level: 6,
                    id: "sres_l6_rejection_wick",
                    description: "Intrabar rejection of at least 0.5 ATR off the high",
                    predicate: |ctx| match ctx.cur.atr {
                        Some(atr) => {
                            ctx.bar.high - ctx.bar.close >= ctx.params.atr_wick_multiplier * atr
                        }
                        None => false,
                    },
                },
                LevelRule {
                    level: 7,
                    id: "sres_l7_histogram_falling",
                    description: "MACD histogram deteriorating versus the prior bar",
                    predicate: |ctx| falling(ctx.cur.macd_histogram, ctx.prev.macd_histogram),
                },
                LevelRule {
                    level: 8,
                    id: "sres_l8_volume_medium",
                    description: "Volume at least 1.2x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_medium),
                },
                LevelRule {
                    level: 9,
                    id: "sres_l9_lose_ema20",
                    description: "Close below EMA(20) with RSI at or below 55",
                    predicate: |ctx| {
                        lt(Some(ctx.bar.close), ctx.cur.ema_20) && le_val(ctx.cur.rsi, 55.0)
                    },
                },
            ],
        },
        StrategyRules {
            base: "SBND",
            side: Side::Sell,
            category: StrategyCategory::MeanReversion,
            name: "Sell Upper Band Exhaustion",
            levels: [
                LevelRule {
                    level: 1,
                    id: "sbnd_l1_reentry",
                    description: "Close re-enters the bands from above the upper Bollinger Band",
                    predicate: |ctx| {
                        match (ctx.prev.bb_upper, ctx.cur.bb_upper) {
                            (Some(pu), Some(cu)) => {
                                ctx.prev_bar.close > pu && ctx.bar.close <= cu
                            }
                            _ => false,
                        }
                    },
                },
                LevelRule {
                    level: 2,
                    id: "sbnd_l2_negative_close",
                    description: "Bar closes below its open",
                    predicate: |ctx| ctx.bar.close < ctx.bar.open,
                },
                LevelRule {
                    level: 3,
                    id: "sbnd_l3_rsi_elevated",
                    description: "RSI still at or above 60 (stretched)",
                    predicate: |ctx| ge_val(ctx.cur.rsi, 60.0),
                },
                LevelRule {
                    level: 4,
                    id: "sbnd_l4_volume_base",
                    description: "Volume at least 1.0x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_base),
                },
                LevelRule {
                    level: 5,
                    id: "sbnd_l5_stoch_turning",
                    description: "Stochastic %K turning down versus the prior bar",
                    predicate: |ctx| falling(ctx.cur.stoch_k, ctx.prev.stoch_k),
                },
                LevelRule {
                    level: 6,
                    id: "sbnd_l6_off_the_ceiling",
                    description: "%B at or below 0.95 (off the band ceiling)",
                    predicate: |ctx| le_val(ctx.cur.bb_percent_b, 0.95),
                },
                LevelRule {
                    level: 7,
                    id: "sbnd_l7_mfi_fading",
                    description: "Money Flow Index deteriorating versus the prior bar",
                    predicate: |ctx| falling(ctx.cur.mfi, ctx.prev.mfi),
                },
                LevelRule {
                    level: 8,
                    id: "sbnd_l8_volume_light",
                    description: "Volume at least 1.1x its 20-bar average",
                    predicate: |ctx| ge_val(ctx.cur.volume_ratio, ctx.params.volume_gate_light),
                },
                LevelRule {
                    level: 9,
                    id: "sbnd_l9_momentum_confirms",
                    description: "MACD histogram deteriorating with Williams %R below -20",
                    predicate: |ctx| {
                        falling(ctx.cur.macd_histogram, ctx.prev.macd_histogram)
                            && lt_val(ctx.cur.williams_r, -20.0)
                    },
                },
            ],
        },
    ]
}

/// The immutable 12x9 rule table, built once per process.
pub fn rule_table() -> &'static [StrategyRules; 12] {
    static TABLE: OnceLock<[StrategyRules; 12]> = OnceLock::new();
    TABLE.get_or_init(table)
}

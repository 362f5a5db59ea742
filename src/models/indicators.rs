//! Per-bar indicator values and snapshot rows
//!
//! Every field is `Option`: `None` means the indicator is undefined at that
//! bar (not enough history). The evaluator treats `None` as "condition not
//! met", never as an error and never as a fabricated value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::params::EngineParams;

/// The fixed indicator vocabulary. Snapshot rows only ever use these names.
pub const INDICATOR_NAMES: &[&str] = &[
    "rsi",
    "macd",
    "macd_signal",
    "macd_histogram",
    "ppo",
    "sma_20",
    "sma_50",
    "sma_200",
    "ema_5",
    "ema_10",
    "ema_12",
    "ema_20",
    "ema_26",
    "ema_50",
    "ema_100",
    "ema_200",
    "bb_upper",
    "bb_middle",
    "bb_lower",
    "bb_percent_b",
    "bb_width",
    "atr",
    "volume_ratio",
    "mfi",
    "ad_line",
    "stoch_k",
    "stoch_d",
    "williams_r",
    "adx",
    "psar",
];

/// All indicator values for one bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorVector {
    pub rsi: Option<f64>,

    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub ppo: Option<f64>,

    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub ema_5: Option<f64>,
    pub ema_10: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_20: Option<f64>,
    pub ema_26: Option<f64>,
    pub ema_50: Option<f64>,
    pub ema_100: Option<f64>,
    pub ema_200: Option<f64>,

    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub bb_percent_b: Option<f64>,
    pub bb_width: Option<f64>,
    /// True when band width increased in at least 3 of the trailing 5 bars.
    pub bb_width_rising: Option<bool>,

    pub atr: Option<f64>,

    pub volume_ratio: Option<f64>,
    pub mfi: Option<f64>,
    pub ad_line: Option<f64>,

    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub williams_r: Option<f64>,

    pub adx: Option<f64>,
    pub plus_di: Option<f64>,
    pub minus_di: Option<f64>,

    pub psar: Option<f64>,
    /// +1 while SAR trails below price (uptrend), -1 above (downtrend).
    pub psar_trend: Option<i8>,

    /// Trailing-window extremes (level strategies). Window excludes nothing;
    /// predicates compare against the previous bar's value to exclude today.
    pub rolling_low: Option<f64>,
    pub rolling_high: Option<f64>,

    /// Price made a lower low while RSI made a higher low (and mirror).
    pub bullish_divergence: Option<bool>,
    pub bearish_divergence: Option<bool>,
}

impl IndicatorVector {
    /// Defined numeric values keyed by vocabulary name, for snapshot rows.
    pub fn named_values(&self) -> Vec<(&'static str, f64)> {
        let mut out = Vec::new();
        let mut push = |name: &'static str, value: Option<f64>| {
            if let Some(v) = value {
                out.push((name, v));
            }
        };
        push("rsi", self.rsi);
        push("macd", self.macd);
        push("macd_signal", self.macd_signal);
        push("macd_histogram", self.macd_histogram);
        push("ppo", self.ppo);
        push("sma_20", self.sma_20);
        push("sma_50", self.sma_50);
        push("sma_200", self.sma_200);
        push("ema_5", self.ema_5);
        push("ema_10", self.ema_10);
        push("ema_12", self.ema_12);
        push("ema_20", self.ema_20);
        push("ema_26", self.ema_26);
        push("ema_50", self.ema_50);
        push("ema_100", self.ema_100);
        push("ema_200", self.ema_200);
        push("bb_upper", self.bb_upper);
        push("bb_middle", self.bb_middle);
        push("bb_lower", self.bb_lower);
        push("bb_percent_b", self.bb_percent_b);
        push("bb_width", self.bb_width);
        push("atr", self.atr);
        push("volume_ratio", self.volume_ratio);
        push("mfi", self.mfi);
        push("ad_line", self.ad_line);
        push("stoch_k", self.stoch_k);
        push("stoch_d", self.stoch_d);
        push("williams_r", self.williams_r);
        push("adx", self.adx);
        push("psar", self.psar);
        out
    }
}

/// One append-only indicator time-series row.
///
/// Unique per (symbol, date, indicator_name); owned by no single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub symbol: String,
    pub date: NaiveDate,
    pub indicator_name: String,
    pub value: f64,
    /// Parameters the value was derived with, e.g. `{"period": 14}`.
    pub metadata: serde_json::Value,
}

/// Derivation metadata for a vocabulary name under the given parameters.
pub fn snapshot_metadata(name: &str, params: &EngineParams) -> serde_json::Value {
    match name {
        "rsi" => serde_json::json!({ "period": params.rsi_period }),
        "macd" | "macd_signal" | "macd_histogram" | "ppo" => serde_json::json!({
            "fast": params.macd_fast,
            "slow": params.macd_slow,
            "signal": params.macd_signal,
        }),
        "bb_upper" | "bb_middle" | "bb_lower" | "bb_percent_b" | "bb_width" => {
            serde_json::json!({ "period": params.bb_period, "std_dev": params.bb_std_dev })
        }
        "atr" => serde_json::json!({ "period": params.atr_period }),
        "volume_ratio" => serde_json::json!({ "period": params.volume_sma_period }),
        "mfi" => serde_json::json!({ "period": params.mfi_period }),
        "stoch_k" | "stoch_d" | "williams_r" => serde_json::json!({
            "period": params.stoch_period,
            "smooth": params.stoch_smooth,
        }),
        "adx" => serde_json::json!({ "period": params.adx_period }),
        "psar" => serde_json::json!({
            "acceleration": params.sar_acceleration,
            "max_acceleration": params.sar_max_acceleration,
        }),
        other if other.starts_with("sma_") || other.starts_with("ema_") => {
            let period: u32 = other[4..].parse().unwrap_or(0);
            serde_json::json!({ "period": period })
        }
        _ => serde_json::json!({}),
    }
}

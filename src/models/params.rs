//! Evaluator parameter configuration
//!
//! Every numeric threshold the rule table and indicator calculator consult
//! lives here. Unknown keys in the input JSON are ignored; missing keys fall
//! back to the documented defaults. A resolved `EngineParams` is canonicalized
//! and content-hashed so identical configurations dedupe to one ParameterSet.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    // Indicator periods
    pub rsi_period: u32,
    pub bb_period: u32,
    pub bb_std_dev: f64,
    pub macd_fast: u32,
    pub macd_slow: u32,
    pub macd_signal: u32,
    pub volume_sma_period: u32,
    pub atr_period: u32,
    pub stoch_period: u32,
    pub stoch_smooth: u32,
    pub adx_period: u32,
    pub mfi_period: u32,
    pub sar_acceleration: f64,
    pub sar_max_acceleration: f64,
    pub divergence_lookback: u32,
    pub level_lookback: u32,

    // Strategy thresholds
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub breakout_rsi_floor: f64,
    pub breakdown_rsi_ceiling: f64,
    pub adx_trend_min: f64,
    pub adx_trend_strong: f64,
    pub atr_wick_multiplier: f64,
    pub level_tolerance_pct: f64,

    // Volume-ratio gates, ascending
    pub volume_gate_base: f64,
    pub volume_gate_light: f64,
    pub volume_gate_medium: f64,
    pub volume_gate_strong: f64,
    pub volume_gate_extreme: f64,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            bb_period: 20,
            bb_std_dev: 2.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            volume_sma_period: 20,
            atr_period: 14,
            stoch_period: 14,
            stoch_smooth: 3,
            adx_period: 14,
            mfi_period: 14,
            sar_acceleration: 0.02,
            sar_max_acceleration: 0.2,
            divergence_lookback: 14,
            level_lookback: 20,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            breakout_rsi_floor: 55.0,
            breakdown_rsi_ceiling: 45.0,
            adx_trend_min: 20.0,
            adx_trend_strong: 25.0,
            atr_wick_multiplier: 0.5,
            level_tolerance_pct: 0.5,
            volume_gate_base: 1.0,
            volume_gate_light: 1.1,
            volume_gate_medium: 1.2,
            volume_gate_strong: 1.3,
            volume_gate_extreme: 1.5,
        }
    }
}

impl EngineParams {
    /// Resolve a configuration JSON object into validated parameters.
    ///
    /// Unknown keys are ignored, missing keys take defaults, out-of-range
    /// values reject the whole configuration.
    pub fn from_value(config: serde_json::Value) -> Result<Self, EngineError> {
        let params: EngineParams = serde_json::from_value(config)
            .map_err(|e| EngineError::Config(format!("Invalid parameter JSON: {}", e)))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("bb_period", self.bb_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("volume_sma_period", self.volume_sma_period),
            ("atr_period", self.atr_period),
            ("stoch_period", self.stoch_period),
            ("stoch_smooth", self.stoch_smooth),
            ("adx_period", self.adx_period),
            ("mfi_period", self.mfi_period),
            ("divergence_lookback", self.divergence_lookback),
            ("level_lookback", self.level_lookback),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(EngineError::Config(format!(
                    "{} must be a positive period, got 0",
                    name
                )));
            }
        }
        if self.macd_fast >= self.macd_slow {
            return Err(EngineError::Config(format!(
                "macd_fast ({}) must be shorter than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        if self.bb_std_dev <= 0.0 {
            return Err(EngineError::Config(format!(
                "bb_std_dev must be positive, got {}",
                self.bb_std_dev
            )));
        }
        if self.sar_acceleration <= 0.0 || self.sar_max_acceleration < self.sar_acceleration {
            return Err(EngineError::Config(format!(
                "SAR acceleration {} must be positive and not exceed cap {}",
                self.sar_acceleration, self.sar_max_acceleration
            )));
        }
        if !(0.0..=100.0).contains(&self.rsi_oversold)
            || !(0.0..=100.0).contains(&self.rsi_overbought)
            || self.rsi_oversold >= self.rsi_overbought
        {
            return Err(EngineError::Config(format!(
                "RSI bands must satisfy 0 <= oversold < overbought <= 100, got {} / {}",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        let gates = [
            self.volume_gate_base,
            self.volume_gate_light,
            self.volume_gate_medium,
            self.volume_gate_strong,
            self.volume_gate_extreme,
        ];
        if gates.windows(2).any(|w| w[0] > w[1]) || gates[0] <= 0.0 {
            return Err(EngineError::Config(format!(
                "Volume gates must be positive and ascending, got {:?}",
                gates
            )));
        }
        if self.level_tolerance_pct < 0.0 || self.atr_wick_multiplier < 0.0 {
            return Err(EngineError::Config(
                "level_tolerance_pct and atr_wick_multiplier must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Canonical JSON rendering. Struct fields serialize in declaration order
    /// and nested maps are BTreeMap-backed, so the output is key-order
    /// independent of the input.
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(self).expect("EngineParams serialization cannot fail")
    }

    /// Content hash over the canonical rendering, used for ParameterSet dedup.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_json().as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

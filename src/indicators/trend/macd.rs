//! MACD / PPO indicator
//!
//! MACD = EMA(fast) - EMA(slow); signal = EMA of MACD; histogram = MACD -
//! signal. PPO is the percentage-normalized variant: MACD / EMA(slow) * 100.

use crate::indicators::trend::ema::Ema;

/// One defined MACD output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdOutput {
    pub macd: f64,
    /// None until the signal EMA has seeded.
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
    pub ppo: f64,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    pub fn new(fast: u32, slow: u32, signal: u32) -> Self {
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
        }
    }

    pub fn update(&mut self, close: f64) -> Option<MacdOutput> {
        let fast = self.fast.update(close);
        let slow = self.slow.update(close)?;
        let fast = fast?;
        let macd = fast - slow;
        let signal = self.signal.update(macd);
        let histogram = signal.map(|s| macd - s);
        // Flat slow EMA cannot happen with real prices, but guard anyway.
        let ppo = if slow != 0.0 { macd / slow * 100.0 } else { 0.0 };
        Some(MacdOutput {
            macd,
            signal,
            histogram,
            ppo,
        })
    }
}

//! Volume participation indicators
//!
//! Volume ratio: current volume over its SMA (default 20). The strategy
//! tables gate levels on this ratio. Accumulation/Distribution line:
//! cumulative money-flow volume, defined from the first bar.

use crate::indicators::trend::ema::Sma;

#[derive(Debug, Clone)]
pub struct VolumeRatio {
    sma: Sma,
}

impl VolumeRatio {
    pub fn new(period: u32) -> Self {
        Self {
            sma: Sma::new(period),
        }
    }

    /// Undefined until the volume SMA window fills or while average volume
    /// is zero (a halted listing, not a signal).
    pub fn update(&mut self, volume: f64) -> Option<f64> {
        let avg = self.sma.update(volume)?;
        if avg > 0.0 {
            Some(volume / avg)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdLine {
    value: f64,
}

impl AdLine {
    pub fn new() -> Self {
        Self { value: 0.0 }
    }

    pub fn update(&mut self, high: f64, low: f64, close: f64, volume: f64) -> f64 {
        let range = high - low;
        // Flat bar contributes no flow.
        let multiplier = if range > 0.0 {
            ((close - low) - (high - close)) / range
        } else {
            0.0
        };
        self.value += multiplier * volume;
        self.value
    }
}

impl Default for AdLine {
    fn default() -> Self {
        Self::new()
    }
}

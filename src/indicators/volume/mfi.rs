//! MFI (Money Flow Index) indicator
//!
//! Volume-weighted RSI over typical price. Positive/negative money flow is
//! accumulated over a rolling window; all-positive flow saturates at 100.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct Mfi {
    period: usize,
    prev_typical: Option<f64>,
    // Signed money flow per bar: positive when typical price rose.
    flows: VecDeque<f64>,
}

impl Mfi {
    pub fn new(period: u32) -> Self {
        Self {
            period: period as usize,
            prev_typical: None,
            flows: VecDeque::with_capacity(period as usize + 1),
        }
    }

    pub fn update(&mut self, high: f64, low: f64, close: f64, volume: f64) -> Option<f64> {
        let typical = (high + low + close) / 3.0;
        let prev = match self.prev_typical.replace(typical) {
            Some(p) => p,
            None => return None,
        };

        let raw_flow = typical * volume;
        let signed = if typical > prev {
            raw_flow
        } else if typical < prev {
            -raw_flow
        } else {
            0.0
        };
        self.flows.push_back(signed);
        if self.flows.len() > self.period {
            self.flows.pop_front();
        }
        if self.flows.len() < self.period {
            return None;
        }

        let positive: f64 = self.flows.iter().filter(|f| **f > 0.0).sum();
        let negative: f64 = -self.flows.iter().filter(|f| **f < 0.0).sum::<f64>();

        if negative == 0.0 {
            return Some(100.0);
        }
        let ratio = positive / negative;
        Some(100.0 - 100.0 / (1.0 + ratio))
    }
}

//! Stochastic oscillator (%K / %D) and Williams %R
//!
//! Both read from the same highest-high / lowest-low window, so they share
//! one state struct. A flat window (high == low across the lookback) yields
//! the neutral midpoint instead of dividing by zero.

use std::collections::VecDeque;

use crate::indicators::trend::ema::Sma;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticOutput {
    pub k: f64,
    /// SMA-smoothed %K; None until the smoothing window fills.
    pub d: Option<f64>,
    pub williams_r: f64,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    period: usize,
    highs: VecDeque<f64>,
    lows: VecDeque<f64>,
    d_smooth: Sma,
}

impl Stochastic {
    pub fn new(period: u32, smooth: u32) -> Self {
        Self {
            period: period as usize,
            highs: VecDeque::with_capacity(period as usize + 1),
            lows: VecDeque::with_capacity(period as usize + 1),
            d_smooth: Sma::new(smooth),
        }
    }

    pub fn update(&mut self, high: f64, low: f64, close: f64) -> Option<StochasticOutput> {
        self.highs.push_back(high);
        self.lows.push_back(low);
        if self.highs.len() > self.period {
            self.highs.pop_front();
            self.lows.pop_front();
        }
        if self.highs.len() < self.period {
            return None;
        }

        let hh = self.highs.iter().cloned().fold(f64::MIN, f64::max);
        let ll = self.lows.iter().cloned().fold(f64::MAX, f64::min);
        let range = hh - ll;

        let (k, williams_r) = if range == 0.0 {
            (50.0, -50.0)
        } else {
            (
                (close - ll) / range * 100.0,
                -100.0 * (hh - close) / range,
            )
        };
        let d = self.d_smooth.update(k);

        Some(StochasticOutput { k, d, williams_r })
    }
}

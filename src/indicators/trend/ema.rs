//! SMA and EMA (moving average) indicators
//!
//! Both are explicit fold state threaded bar-by-bar so per-symbol workers stay
//! independent and a replay reproduces identical values.

use std::collections::VecDeque;

/// Rolling simple moving average over a fixed window.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    window: VecDeque<f64>,
    sum: f64,
}

impl Sma {
    pub fn new(period: u32) -> Self {
        Self {
            period: period as usize,
            window: VecDeque::with_capacity(period as usize + 1),
            sum: 0.0,
        }
    }

    /// Push one value; defined once `period` values have been seen.
    pub fn update(&mut self, value: f64) -> Option<f64> {
        self.window.push_back(value);
        self.sum += value;
        if self.window.len() > self.period {
            if let Some(old) = self.window.pop_front() {
                self.sum -= old;
            }
        }
        if self.window.len() == self.period {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }

    pub fn value(&self) -> Option<f64> {
        if self.window.len() == self.period {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }
}

/// Exponential moving average, seeded with the first SMA of its period and
/// then smoothed recursively with `alpha = 2 / (period + 1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    alpha: f64,
    seed: Vec<f64>,
    state: Option<f64>,
}

impl Ema {
    pub fn new(period: u32) -> Self {
        Self {
            period: period as usize,
            alpha: 2.0 / (period as f64 + 1.0),
            seed: Vec::with_capacity(period as usize),
            state: None,
        }
    }

    pub fn update(&mut self, value: f64) -> Option<f64> {
        match self.state {
            Some(prev) => {
                let next = (value - prev) * self.alpha + prev;
                self.state = Some(next);
                Some(next)
            }
            None => {
                self.seed.push(value);
                if self.seed.len() == self.period {
                    let sma = self.seed.iter().sum::<f64>() / self.period as f64;
                    self.state = Some(sma);
                    self.seed.clear();
                    self.seed.shrink_to_fit();
                    Some(sma)
                } else {
                    None
                }
            }
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.state
    }
}

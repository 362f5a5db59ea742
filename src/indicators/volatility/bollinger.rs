//! Bollinger Bands indicator
//!
//! Middle = SMA(period); upper/lower = middle +/- k * stddev(period);
//! %B = (price - lower) / (upper - lower); width = (upper - lower) / middle.
//! Flat bands (zero-width) yield the neutral %B of 0.5 rather than dividing
//! by zero.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerOutput {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub percent_b: f64,
    pub width: f64,
}

#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev: f64,
    window: VecDeque<f64>,
}

impl BollingerBands {
    pub fn new(period: u32, std_dev: f64) -> Self {
        Self {
            period: period as usize,
            std_dev,
            window: VecDeque::with_capacity(period as usize + 1),
        }
    }

    pub fn update(&mut self, close: f64) -> Option<BollingerOutput> {
        self.window.push_back(close);
        if self.window.len() > self.period {
            self.window.pop_front();
        }
        if self.window.len() < self.period {
            return None;
        }

        let n = self.period as f64;
        let middle = self.window.iter().sum::<f64>() / n;
        let variance = self.window.iter().map(|v| (v - middle).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();

        let upper = middle + self.std_dev * std;
        let lower = middle - self.std_dev * std;

        let percent_b = if upper == lower {
            0.5
        } else {
            (close - lower) / (upper - lower)
        };
        let width = if middle != 0.0 {
            (upper - lower) / middle
        } else {
            0.0
        };

        Some(BollingerOutput {
            upper,
            middle,
            lower,
            percent_b,
            width,
        })
    }
}

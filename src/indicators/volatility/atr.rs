//! ATR (Average True Range) indicator
//!
//! Wilder-smoothed true range. The first value is the SMA of the first
//! `period` true ranges, then `atr = (prev * (n - 1) + tr) / n`.

/// True range of a bar given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: Option<f64>) -> f64 {
    match prev_close {
        Some(pc) => (high - low).max((high - pc).abs()).max((low - pc).abs()),
        None => high - low,
    }
}

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    prev_close: Option<f64>,
    seed: Vec<f64>,
    state: Option<f64>,
}

impl Atr {
    pub fn new(period: u32) -> Self {
        Self {
            period: period as usize,
            prev_close: None,
            seed: Vec::new(),
            state: None,
        }
    }

    pub fn update(&mut self, high: f64, low: f64, close: f64) -> Option<f64> {
        let tr = true_range(high, low, self.prev_close);
        self.prev_close = Some(close);

        match self.state {
            Some(prev) => {
                let n = self.period as f64;
                let next = (prev * (n - 1.0) + tr) / n;
                self.state = Some(next);
                Some(next)
            }
            None => {
                self.seed.push(tr);
                if self.seed.len() == self.period {
                    let sma = self.seed.iter().sum::<f64>() / self.period as f64;
                    self.state = Some(sma);
                    self.seed.clear();
                    Some(sma)
                } else {
                    None
                }
            }
        }
    }
}

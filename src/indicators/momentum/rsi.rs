//! RSI (Relative Strength Index) indicator
//!
//! RSI = 100 - (100 / (1 + RS)), RS = average gain / average loss, with
//! Wilder's smoothing of the averages. Bounded [0, 100]; undefined for the
//! first `period` bars.

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    prev_close: Option<f64>,
    seed_gains: Vec<f64>,
    seed_losses: Vec<f64>,
    avg_gain: Option<f64>,
    avg_loss: Option<f64>,
}

impl Rsi {
    pub fn new(period: u32) -> Self {
        Self {
            period: period as usize,
            prev_close: None,
            seed_gains: Vec::new(),
            seed_losses: Vec::new(),
            avg_gain: None,
            avg_loss: None,
        }
    }

    pub fn update(&mut self, close: f64) -> Option<f64> {
        let prev = match self.prev_close.replace(close) {
            Some(p) => p,
            None => return None,
        };
        let change = close - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        match (self.avg_gain, self.avg_loss) {
            (Some(ag), Some(al)) => {
                // Wilder smoothing
                let n = self.period as f64;
                let ag = (ag * (n - 1.0) + gain) / n;
                let al = (al * (n - 1.0) + loss) / n;
                self.avg_gain = Some(ag);
                self.avg_loss = Some(al);
                Some(Self::rsi_from(ag, al))
            }
            _ => {
                self.seed_gains.push(gain);
                self.seed_losses.push(loss);
                if self.seed_gains.len() == self.period {
                    let ag = self.seed_gains.iter().sum::<f64>() / self.period as f64;
                    let al = self.seed_losses.iter().sum::<f64>() / self.period as f64;
                    self.avg_gain = Some(ag);
                    self.avg_loss = Some(al);
                    self.seed_gains.clear();
                    self.seed_losses.clear();
                    Some(Self::rsi_from(ag, al))
                } else {
                    None
                }
            }
        }
    }

    fn rsi_from(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return 100.0;
        }
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }
}

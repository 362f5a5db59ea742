//! ADX (Average Directional Index) indicator
//!
//! Wilder-smoothed TR / +DM / -DM produce +DI and -DI; their normalized
//! spread is DX, and ADX is the Wilder-smoothed DX. Defined from roughly
//! bar `2 * period` onward.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdxOutput {
    pub adx: Option<f64>,
    pub plus_di: f64,
    pub minus_di: f64,
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    prev_high: Option<f64>,
    prev_low: Option<f64>,
    prev_close: Option<f64>,
    // Wilder-smoothed running sums
    smoothed_tr: Option<f64>,
    smoothed_plus_dm: Option<f64>,
    smoothed_minus_dm: Option<f64>,
    seed_tr: Vec<f64>,
    seed_plus: Vec<f64>,
    seed_minus: Vec<f64>,
    adx: Option<f64>,
    seed_dx: Vec<f64>,
}

impl Adx {
    pub fn new(period: u32) -> Self {
        Self {
            period: period as usize,
            prev_high: None,
            prev_low: None,
            prev_close: None,
            smoothed_tr: None,
            smoothed_plus_dm: None,
            smoothed_minus_dm: None,
            seed_tr: Vec::new(),
            seed_plus: Vec::new(),
            seed_minus: Vec::new(),
            adx: None,
            seed_dx: Vec::new(),
        }
    }

    pub fn update(&mut self, high: f64, low: f64, close: f64) -> Option<AdxOutput> {
        let (ph, pl, pc) = match (self.prev_high, self.prev_low, self.prev_close) {
            (Some(h), Some(l), Some(c)) => (h, l, c),
            _ => {
                self.prev_high = Some(high);
                self.prev_low = Some(low);
                self.prev_close = Some(close);
                return None;
            }
        };
        self.prev_high = Some(high);
        self.prev_low = Some(low);
        self.prev_close = Some(close);

        let tr = (high - low).max((high - pc).abs()).max((low - pc).abs());
        let up_move = high - ph;
        let down_move = pl - low;
        let plus_dm = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        let minus_dm = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };

        let n = self.period as f64;
        let (tr_s, plus_s, minus_s) = match (
            self.smoothed_tr,
            self.smoothed_plus_dm,
            self.smoothed_minus_dm,
        ) {
            (Some(t), Some(p), Some(m)) => {
                let t = (t * (n - 1.0) + tr) / n;
                let p = (p * (n - 1.0) + plus_dm) / n;
                let m = (m * (n - 1.0) + minus_dm) / n;
                (t, p, m)
            }
            _ => {
                self.seed_tr.push(tr);
                self.seed_plus.push(plus_dm);
                self.seed_minus.push(minus_dm);
                if self.seed_tr.len() < self.period {
                    return None;
                }
                let t = self.seed_tr.iter().sum::<f64>() / n;
                let p = self.seed_plus.iter().sum::<f64>() / n;
                let m = self.seed_minus.iter().sum::<f64>() / n;
                self.seed_tr.clear();
                self.seed_plus.clear();
                self.seed_minus.clear();
                (t, p, m)
            }
        };
        self.smoothed_tr = Some(tr_s);
        self.smoothed_plus_dm = Some(plus_s);
        self.smoothed_minus_dm = Some(minus_s);

        let plus_di = if tr_s > 0.0 { 100.0 * plus_s / tr_s } else { 0.0 };
        let minus_di = if tr_s > 0.0 { 100.0 * minus_s / tr_s } else { 0.0 };
        let di_sum = plus_di + minus_di;
        let dx = if di_sum > 0.0 {
            100.0 * (plus_di - minus_di).abs() / di_sum
        } else {
            0.0
        };

        self.adx = match self.adx {
            Some(prev) => Some((prev * (n - 1.0) + dx) / n),
            None => {
                self.seed_dx.push(dx);
                if self.seed_dx.len() == self.period {
                    let first = self.seed_dx.iter().sum::<f64>() / n;
                    self.seed_dx.clear();
                    Some(first)
                } else {
                    None
                }
            }
        };

        Some(AdxOutput {
            adx: self.adx,
            plus_di,
            minus_di,
        })
    }
}

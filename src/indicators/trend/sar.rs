//! Parabolic SAR indicator
//!
//! Trend-following stop with an acceleration factor that grows by `step` each
//! time price makes a new extreme, up to `max`. Explicit fold state: the SAR,
//! the extreme point, the current acceleration, and the trend direction all
//! thread bar-by-bar.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SarOutput {
    pub sar: f64,
    /// +1 while SAR trails below price (uptrend), -1 above (downtrend).
    pub trend: i8,
}

#[derive(Debug, Clone)]
pub struct ParabolicSar {
    step: f64,
    max: f64,
    state: Option<SarState>,
    first_bar: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy)]
struct SarState {
    sar: f64,
    extreme: f64,
    af: f64,
    rising: bool,
}

impl ParabolicSar {
    pub fn new(step: f64, max: f64) -> Self {
        Self {
            step,
            max,
            state: None,
            first_bar: None,
        }
    }

    pub fn update(&mut self, high: f64, low: f64, close: f64) -> Option<SarOutput> {
        let state = match self.state {
            Some(s) => s,
            None => {
                // Need two bars to pick the initial trend direction.
                let (first_high, first_low) = match self.first_bar {
                    Some(fb) => fb,
                    None => {
                        self.first_bar = Some((high, low));
                        return None;
                    }
                };
                let rising = close >= (first_high + first_low) / 2.0;
                let state = if rising {
                    SarState {
                        sar: first_low,
                        extreme: high,
                        af: self.step,
                        rising: true,
                    }
                } else {
                    SarState {
                        sar: first_high,
                        extreme: low,
                        af: self.step,
                        rising: false,
                    }
                };
                self.state = Some(state);
                return Some(SarOutput {
                    sar: state.sar,
                    trend: if state.rising { 1 } else { -1 },
                });
            }
        };

        let mut next = state;
        next.sar = state.sar + state.af * (state.extreme - state.sar);

        if state.rising {
            if low < next.sar {
                // Reversal to downtrend
                next = SarState {
                    sar: state.extreme,
                    extreme: low,
                    af: self.step,
                    rising: false,
                };
            } else {
                if high > state.extreme {
                    next.extreme = high;
                    next.af = (state.af + self.step).min(self.max);
                }
                // SAR may never move above the current low.
                next.sar = next.sar.min(low);
            }
        } else {
            if high > next.sar {
                // Reversal to uptrend
                next = SarState {
                    sar: state.extreme,
                    extreme: high,
                    af: self.step,
                    rising: true,
                };
            } else {
                if low < state.extreme {
                    next.extreme = low;
                    next.af = (state.af + self.step).min(self.max);
                }
                next.sar = next.sar.max(high);
            }
        }

        self.state = Some(next);
        Some(SarOutput {
            sar: next.sar,
            trend: if next.rising { 1 } else { -1 },
        })
    }
}

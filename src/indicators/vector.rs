//! Per-bar indicator vector computation
//!
//! All indicator state folds forward bar-by-bar in one pass, mirroring how
//! the recursively defined indicators (EMA, Wilder smoothing, ADX, SAR) are
//! specified. Bars must arrive in strictly increasing date order; the engine
//! validates that before calling in here.

use std::collections::VecDeque;

use chrono::NaiveDate;

use crate::indicators::momentum::rsi::Rsi;
use crate::indicators::momentum::stochastic::Stochastic;
use crate::indicators::trend::adx::Adx;
use crate::indicators::trend::ema::{Ema, Sma};
use crate::indicators::trend::macd::Macd;
use crate::indicators::trend::sar::ParabolicSar;
use crate::indicators::volatility::atr::Atr;
use crate::indicators::volatility::bollinger::BollingerBands;
use crate::indicators::volume::flow::{AdLine, VolumeRatio};
use crate::indicators::volume::mfi::Mfi;
use crate::models::candle::Candle;
use crate::models::indicators::{snapshot_metadata, IndicatorSnapshot, IndicatorVector};
use crate::models::params::EngineParams;

/// How many of the trailing width deltas must be positive for the
/// "band width rising" flag (3 of 5).
const WIDTH_RISING_WINDOW: usize = 5;
const WIDTH_RISING_MIN: usize = 3;

struct SeriesState {
    rsi: Rsi,
    macd: Macd,
    sma_20: Sma,
    sma_50: Sma,
    sma_200: Sma,
    ema_5: Ema,
    ema_10: Ema,
    ema_12: Ema,
    ema_20: Ema,
    ema_26: Ema,
    ema_50: Ema,
    ema_100: Ema,
    ema_200: Ema,
    bollinger: BollingerBands,
    atr: Atr,
    volume_ratio: VolumeRatio,
    mfi: Mfi,
    ad_line: AdLine,
    stochastic: Stochastic,
    adx: Adx,
    sar: ParabolicSar,
}

impl SeriesState {
    fn new(params: &EngineParams) -> Self {
        Self {
            rsi: Rsi::new(params.rsi_period),
            macd: Macd::new(params.macd_fast, params.macd_slow, params.macd_signal),
            sma_20: Sma::new(20),
            sma_50: Sma::new(50),
            sma_200: Sma::new(200),
            ema_5: Ema::new(5),
            ema_10: Ema::new(10),
            ema_12: Ema::new(12),
            ema_20: Ema::new(20),
            ema_26: Ema::new(26),
            ema_50: Ema::new(50),
            ema_100: Ema::new(100),
            ema_200: Ema::new(200),
            bollinger: BollingerBands::new(params.bb_period, params.bb_std_dev),
            atr: Atr::new(params.atr_period),
            volume_ratio: VolumeRatio::new(params.volume_sma_period),
            mfi: Mfi::new(params.mfi_period),
            ad_line: AdLine::new(),
            stochastic: Stochastic::new(params.stoch_period, params.stoch_smooth),
            adx: Adx::new(params.adx_period),
            sar: ParabolicSar::new(params.sar_acceleration, params.sar_max_acceleration),
        }
    }
}

/// Compute one indicator vector per bar. Output length equals input length;
/// fields are `None` wherever history is insufficient.
pub fn compute_series(bars: &[Candle], params: &EngineParams) -> Vec<IndicatorVector> {
    let mut state = SeriesState::new(params);
    let mut vectors: Vec<IndicatorVector> = Vec::with_capacity(bars.len());

    let mut widths: VecDeque<f64> = VecDeque::with_capacity(WIDTH_RISING_WINDOW + 2);
    let mut rolling_highs: VecDeque<f64> = VecDeque::new();
    let mut rolling_lows: VecDeque<f64> = VecDeque::new();
    let level_lookback = params.level_lookback as usize;

    // Close/RSI history for divergence pivots
    let mut closes: Vec<f64> = Vec::with_capacity(bars.len());
    let mut rsi_history: Vec<Option<f64>> = Vec::with_capacity(bars.len());

    for bar in bars {
        let mut v = IndicatorVector::default();

        v.rsi = state.rsi.update(bar.close);

        if let Some(m) = state.macd.update(bar.close) {
            v.macd = Some(m.macd);
            v.macd_signal = m.signal;
            v.macd_histogram = m.histogram;
            v.ppo = Some(m.ppo);
        }

        v.sma_20 = state.sma_20.update(bar.close);
        v.sma_50 = state.sma_50.update(bar.close);
        v.sma_200 = state.sma_200.update(bar.close);
        v.ema_5 = state.ema_5.update(bar.close);
        v.ema_10 = state.ema_10.update(bar.close);
        v.ema_12 = state.ema_12.update(bar.close);
        v.ema_20 = state.ema_20.update(bar.close);
        v.ema_26 = state.ema_26.update(bar.close);
        v.ema_50 = state.ema_50.update(bar.close);
        v.ema_100 = state.ema_100.update(bar.close);
        v.ema_200 = state.ema_200.update(bar.close);

        if let Some(bb) = state.bollinger.update(bar.close) {
            v.bb_upper = Some(bb.upper);
            v.bb_middle = Some(bb.middle);
            v.bb_lower = Some(bb.lower);
            v.bb_percent_b = Some(bb.percent_b);
            v.bb_width = Some(bb.width);

            widths.push_back(bb.width);
            if widths.len() > WIDTH_RISING_WINDOW + 1 {
                widths.pop_front();
            }
            if widths.len() == WIDTH_RISING_WINDOW + 1 {
                let rising = widths
                    .iter()
                    .zip(widths.iter().skip(1))
                    .filter(|(a, b)| b > a)
                    .count();
                v.bb_width_rising = Some(rising >= WIDTH_RISING_MIN);
            }
        }

        v.atr = state.atr.update(bar.high, bar.low, bar.close);
        v.volume_ratio = state.volume_ratio.update(bar.volume);
        v.mfi = state.mfi.update(bar.high, bar.low, bar.close, bar.volume);
        v.ad_line = Some(state.ad_line.update(bar.high, bar.low, bar.close, bar.volume));

        if let Some(s) = state.stochastic.update(bar.high, bar.low, bar.close) {
            v.stoch_k = Some(s.k);
            v.stoch_d = s.d;
            v.williams_r = Some(s.williams_r);
        }

        if let Some(a) = state.adx.update(bar.high, bar.low, bar.close) {
            v.adx = a.adx;
            v.plus_di = Some(a.plus_di);
            v.minus_di = Some(a.minus_di);
        }

        if let Some(s) = state.sar.update(bar.high, bar.low, bar.close) {
            v.psar = Some(s.sar);
            v.psar_trend = Some(s.trend);
        }

        rolling_highs.push_back(bar.high);
        rolling_lows.push_back(bar.low);
        if rolling_highs.len() > level_lookback {
            rolling_highs.pop_front();
            rolling_lows.pop_front();
        }
        if rolling_highs.len() == level_lookback {
            v.rolling_high = Some(rolling_highs.iter().cloned().fold(f64::MIN, f64::max));
            v.rolling_low = Some(rolling_lows.iter().cloned().fold(f64::MAX, f64::min));
        }

        let (bullish, bearish) =
            detect_divergence(&closes, &rsi_history, bar.close, v.rsi, params);
        v.bullish_divergence = bullish;
        v.bearish_divergence = bearish;

        closes.push(bar.close);
        rsi_history.push(v.rsi);
        vectors.push(v);
    }

    vectors
}

/// Compare the current bar against the pivot (extreme close) of the trailing
/// lookback window. Bullish: price makes a lower low while RSI makes a higher
/// low. Bearish is the mirror. Undefined until RSI exists at both ends.
fn detect_divergence(
    closes: &[f64],
    rsi_history: &[Option<f64>],
    close: f64,
    rsi: Option<f64>,
    params: &EngineParams,
) -> (Option<bool>, Option<bool>) {
    let lookback = params.divergence_lookback as usize;
    let rsi = match rsi {
        Some(r) => r,
        None => return (None, None),
    };
    if closes.len() < lookback {
        return (None, None);
    }
    let window_start = closes.len() - lookback;
    let window = &closes[window_start..];

    let mut min_idx = 0;
    let mut max_idx = 0;
    for (i, c) in window.iter().enumerate() {
        if *c < window[min_idx] {
            min_idx = i;
        }
        if *c > window[max_idx] {
            max_idx = i;
        }
    }

    let bullish = rsi_history[window_start + min_idx]
        .map(|pivot_rsi| close < window[min_idx] && rsi > pivot_rsi);
    let bearish = rsi_history[window_start + max_idx]
        .map(|pivot_rsi| close > window[max_idx] && rsi < pivot_rsi);
    (bullish, bearish)
}

/// Snapshot rows for one bar's vector, keyed by the fixed vocabulary.
pub fn snapshot_rows(
    symbol: &str,
    date: NaiveDate,
    vector: &IndicatorVector,
    params: &EngineParams,
) -> Vec<IndicatorSnapshot> {
    vector
        .named_values()
        .into_iter()
        .map(|(name, value)| IndicatorSnapshot {
            symbol: symbol.to_string(),
            date,
            indicator_name: name.to_string(),
            value,
            metadata: snapshot_metadata(name, params),
        })
        .collect()
}

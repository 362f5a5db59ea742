//! Indicator vector computation unit tests

use chrono::NaiveDate;
use stratix::indicators::vector::{compute_series, snapshot_rows};
use stratix::models::candle::Candle;
use stratix::models::indicators::INDICATOR_NAMES;
use stratix::models::params::EngineParams;

fn day(i: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i as i64)
}

fn wavy_candles(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let close = 100.0 + ((i % 5) as f64 - 2.0) * 0.8;
            Candle::new(
                day(i),
                close - 0.2,
                close + 1.0,
                close - 1.0,
                close,
                1000.0 + (i % 7) as f64 * 50.0,
            )
        })
        .collect()
}

#[test]
fn output_length_matches_input() {
    let params = EngineParams::default();
    assert!(compute_series(&[], &params).is_empty());
    let bars = wavy_candles(60);
    assert_eq!(compute_series(&bars, &params).len(), 60);
}

#[test]
fn single_bar_is_mostly_undefined() {
    let params = EngineParams::default();
    let vectors = compute_series(&wavy_candles(1), &params);
    let v = &vectors[0];
    assert!(v.rsi.is_none());
    assert!(v.macd.is_none());
    assert!(v.bb_upper.is_none());
    assert!(v.atr.is_none());
    assert!(v.volume_ratio.is_none());
    // The A/D line is cumulative and exists from the first bar.
    assert!(v.ad_line.is_some());
}

#[test]
fn warmup_boundaries_are_exact() {
    let params = EngineParams::default();
    let vectors = compute_series(&wavy_candles(60), &params);

    // RSI-14: defined from bar index 14
    assert!(vectors[13].rsi.is_none());
    assert!(vectors[14].rsi.is_some());

    // Bollinger-20, volume ratio and rolling extremes: bar index 19
    assert!(vectors[18].bb_upper.is_none());
    assert!(vectors[19].bb_upper.is_some());
    assert!(vectors[18].volume_ratio.is_none());
    assert!(vectors[19].volume_ratio.is_some());
    assert!(vectors[18].rolling_high.is_none());
    assert!(vectors[19].rolling_high.is_some());

    // EMA-50: bar index 49; EMA-100 never within 60 bars
    assert!(vectors[48].ema_50.is_none());
    assert!(vectors[49].ema_50.is_some());
    assert!(vectors[59].ema_100.is_none());
}

#[test]
fn rolling_extremes_track_the_window() {
    let params = EngineParams::default();
    let bars = wavy_candles(40);
    let vectors = compute_series(&bars, &params);
    let v = &vectors[39];
    let window = &bars[20..40];
    let expected_high = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let expected_low = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    assert_eq!(v.rolling_high, Some(expected_high));
    assert_eq!(v.rolling_low, Some(expected_low));
}

#[test]
fn snapshot_rows_use_the_fixed_vocabulary() {
    let params = EngineParams::default();
    let bars = wavy_candles(60);
    let vectors = compute_series(&bars, &params);
    let rows = snapshot_rows("AAPL", bars[59].date, &vectors[59], &params);

    assert!(!rows.is_empty());
    for row in &rows {
        assert!(
            INDICATOR_NAMES.contains(&row.indicator_name.as_str()),
            "unexpected snapshot name {}",
            row.indicator_name
        );
        assert_eq!(row.symbol, "AAPL");
        assert_eq!(row.date, bars[59].date);
        assert!(row.value.is_finite());
    }

    // One row per defined value, no duplicates
    let mut names: Vec<&str> = rows.iter().map(|r| r.indicator_name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), rows.len());

    // Derivation metadata carries the configured period
    let rsi_row = rows
        .iter()
        .find(|r| r.indicator_name == "rsi")
        .expect("rsi defined at bar 60");
    assert_eq!(rsi_row.metadata["period"], 14);
}

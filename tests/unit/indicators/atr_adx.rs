//! ATR and ADX unit tests

use stratix::indicators::trend::adx::Adx;
use stratix::indicators::volatility::atr::{true_range, Atr};

#[test]
fn true_range_covers_gaps() {
    // No previous close: plain high - low
    assert_eq!(true_range(102.0, 100.0, None), 2.0);
    // Gap down: distance from previous close dominates
    assert_eq!(true_range(10.0, 9.0, Some(12.0)), 3.0);
    // Gap up
    assert_eq!(true_range(15.0, 14.0, Some(12.0)), 3.0);
}

#[test]
fn atr_constant_range_converges_to_range() {
    let mut atr = Atr::new(3);
    assert_eq!(atr.update(102.0, 100.0, 101.0), None);
    assert_eq!(atr.update(102.0, 100.0, 101.0), None);
    // Seed: SMA of the first 3 true ranges, all 2.0
    assert_eq!(atr.update(102.0, 100.0, 101.0), Some(2.0));
    // Wilder smoothing of an unchanged TR stays put
    assert_eq!(atr.update(102.0, 100.0, 101.0), Some(2.0));
}

#[test]
fn atr_stays_positive_on_noisy_bars() {
    let mut atr = Atr::new(14);
    for i in 0..60 {
        let base = 100.0 + (i % 9) as f64;
        if let Some(v) = atr.update(base + 1.5, base - 1.5, base) {
            assert!(v > 0.0);
        }
    }
}

#[test]
fn adx_uptrend_puts_plus_di_on_top() {
    let mut adx = Adx::new(3);
    let mut last = None;
    for i in 0..20 {
        let base = 100.0 + i as f64;
        last = adx.update(base + 1.0, base, base + 0.5);
    }
    let out = last.expect("directional output defined");
    assert!(out.plus_di > out.minus_di);
    let value = out.adx.expect("adx defined after 20 bars");
    assert!(value > 50.0, "steady uptrend should read as a strong trend, got {}", value);
    assert!(value <= 100.0);
}

#[test]
fn adx_undefined_before_double_warmup() {
    // First DI output needs `period` changes; ADX needs `period` DX values
    // on top of that.
    let mut adx = Adx::new(14);
    let mut last = None;
    for i in 0..20 {
        let base = 100.0 + i as f64;
        last = adx.update(base + 1.0, base, base + 0.5);
    }
    let out = last.expect("DI defined after 20 bars");
    assert!(out.adx.is_none(), "adx should still be warming up at bar 20");
}

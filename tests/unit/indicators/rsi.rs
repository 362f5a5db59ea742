//! RSI unit tests

use stratix::indicators::momentum::rsi::Rsi;

#[test]
fn undefined_before_period_changes() {
    // RSI-14 needs 14 closing changes: 15 bars. Bar index 13 (14 bars) is
    // still undefined, bar index 14 is the first defined value.
    let mut rsi = Rsi::new(14);
    let mut last = None;
    for i in 0..14 {
        last = rsi.update(100.0 + i as f64);
    }
    assert_eq!(last, None);
    assert!(rsi.update(114.0).is_some());
}

#[test]
fn all_gains_saturates_at_100() {
    let mut rsi = Rsi::new(14);
    let mut last = None;
    for i in 0..20 {
        last = rsi.update(100.0 + i as f64 * 2.0);
    }
    assert_eq!(last, Some(100.0));
}

#[test]
fn all_losses_pin_to_zero() {
    let mut rsi = Rsi::new(14);
    let mut last = None;
    for i in 0..20 {
        last = rsi.update(100.0 - i as f64);
    }
    let value = last.expect("rsi defined after 20 bars");
    assert!(value < 1e-9, "expected ~0, got {}", value);
}

#[test]
fn bounded_zero_to_hundred() {
    let mut rsi = Rsi::new(14);
    for i in 0..120 {
        // Alternating gains and losses of varying size
        let close = 100.0 + ((i % 7) as f64 - 3.0) * 1.5;
        if let Some(v) = rsi.update(close) {
            assert!((0.0..=100.0).contains(&v), "rsi {} out of range", v);
        }
    }
}

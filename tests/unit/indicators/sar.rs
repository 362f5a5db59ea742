//! Parabolic SAR unit tests

use stratix::indicators::trend::sar::ParabolicSar;

#[test]
fn needs_two_bars_to_pick_a_direction() {
    let mut sar = ParabolicSar::new(0.02, 0.2);
    assert!(sar.update(10.0, 9.0, 9.5).is_none());
    let out = sar.update(11.0, 10.0, 10.8).expect("defined from bar 2");
    // Second close above the first bar's midpoint: uptrend, SAR at the
    // first bar's low.
    assert_eq!(out.trend, 1);
    assert_eq!(out.sar, 9.0);
}

#[test]
fn sar_trails_below_price_in_an_uptrend() {
    let mut sar = ParabolicSar::new(0.02, 0.2);
    sar.update(10.0, 9.0, 9.5);
    let mut last = None;
    for i in 1..30 {
        let base = 10.0 + i as f64 * 0.5;
        last = sar.update(base + 0.5, base - 0.5, base);
    }
    let out = last.unwrap();
    assert_eq!(out.trend, 1);
    assert!(out.sar < 10.0 + 29.0 * 0.5 - 0.5, "SAR must trail under the lows");
}

#[test]
fn breaking_the_sar_reverses_the_trend() {
    let mut sar = ParabolicSar::new(0.02, 0.2);
    sar.update(10.0, 9.0, 9.5);
    sar.update(11.0, 10.0, 10.8);
    let out = sar.update(12.0, 11.0, 11.5).unwrap();
    assert_eq!(out.trend, 1);

    // Crash through the stop: SAR flips to the prior extreme high.
    let out = sar.update(9.5, 8.0, 8.2).unwrap();
    assert_eq!(out.trend, -1);
    assert_eq!(out.sar, 12.0);
}

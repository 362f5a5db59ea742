//! MACD / PPO unit tests

use stratix::indicators::trend::macd::Macd;

#[test]
fn undefined_until_slow_ema_seeds() {
    let mut macd = Macd::new(2, 3, 2);
    assert!(macd.update(1.0).is_none());
    assert!(macd.update(2.0).is_none());
    assert!(macd.update(3.0).is_some());
}

#[test]
fn signal_and_histogram_lag_the_macd_line() {
    let mut macd = Macd::new(2, 3, 2);
    macd.update(1.0);
    macd.update(2.0);

    // Bar 3: fast EMA 2.5, slow EMA seeds at 2.0
    let out = macd.update(3.0).unwrap();
    assert!((out.macd - 0.5).abs() < 1e-12);
    assert!(out.signal.is_none());
    assert!(out.histogram.is_none());
    assert!((out.ppo - 25.0).abs() < 1e-12);

    // Bar 4: fast 3.5, slow 3.0; signal EMA seeds on two MACD values
    let out = macd.update(4.0).unwrap();
    assert!((out.macd - 0.5).abs() < 1e-12);
    assert!((out.signal.unwrap() - 0.5).abs() < 1e-12);
    assert!(out.histogram.unwrap().abs() < 1e-12);
}

#[test]
fn rally_pushes_macd_positive() {
    let mut macd = Macd::new(12, 26, 9);
    let mut last = None;
    for i in 0..60 {
        last = macd.update(100.0 + i as f64 * 1.5);
    }
    let out = last.expect("defined after 60 bars");
    assert!(out.macd > 0.0);
    assert!(out.histogram.is_some());
    assert!(out.ppo > 0.0);
}

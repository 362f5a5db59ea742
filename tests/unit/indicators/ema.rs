//! Moving average unit tests

use stratix::indicators::trend::ema::{Ema, Sma};

#[test]
fn sma_undefined_until_window_fills() {
    let mut sma = Sma::new(2);
    assert_eq!(sma.update(1.0), None);
    assert_eq!(sma.update(3.0), Some(2.0));
    assert_eq!(sma.update(5.0), Some(4.0));
}

#[test]
fn ema_seeds_with_first_sma_then_smooths() {
    let mut ema = Ema::new(3);
    assert_eq!(ema.update(1.0), None);
    assert_eq!(ema.update(2.0), None);
    // Seed: SMA of the first 3 values
    assert_eq!(ema.update(3.0), Some(2.0));
    // alpha = 2 / (3 + 1) = 0.5 -> (4 - 2) * 0.5 + 2 = 3
    assert_eq!(ema.update(4.0), Some(3.0));
}

#[test]
fn ema_boundary_is_exact() {
    // Defined on the bar with exactly `period` values, not one earlier.
    let mut ema = Ema::new(10);
    for i in 0..9 {
        assert_eq!(ema.update(100.0 + i as f64), None, "bar {} should be undefined", i);
    }
    assert!(ema.update(109.0).is_some());
}

#[test]
fn ema_tracks_constant_series() {
    let mut ema = Ema::new(5);
    let mut last = None;
    for _ in 0..30 {
        last = ema.update(42.0);
    }
    assert_eq!(last, Some(42.0));
}

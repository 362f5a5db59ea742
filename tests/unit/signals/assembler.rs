//! Signal assembly tests

use chrono::NaiveDate;
use stratix::error::EngineError;
use stratix::models::params::EngineParams;
use stratix::models::signal::ConditionCheck;
use stratix::models::strategy::Side;
use stratix::signals::assembler::{confidence_from_score, SignalAssembler};
use stratix::signals::catalog::StrategyCatalog;
use stratix::strategies::evaluator::StrategyEvaluation;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

fn evaluation(base: &'static str, level: u8, score: f64) -> StrategyEvaluation {
    let checks = (1..=level)
        .map(|l| ConditionCheck {
            condition_id: format!("check_l{}", l),
            level: l,
            description: format!("condition at level {}", l),
            satisfied: true,
        })
        .collect();
    StrategyEvaluation {
        base_strategy: base,
        side: Side::Buy,
        level,
        checks,
        score,
    }
}

#[test]
fn assembles_a_complete_event() {
    let catalog = StrategyCatalog::seeded();
    let params = EngineParams::default();
    let assembler = SignalAssembler::new(&catalog, &params, Some(7));

    let event = assembler
        .assemble("AAPL", date(), &evaluation("BBRK", 5, 60.0), true)
        .expect("catalog row present")
        .expect("row active");

    assert_eq!(event.signal.as_str(), "BBRK5");
    assert_eq!(event.strength, 5);
    assert_eq!(event.symbol, "AAPL");
    assert_eq!(event.date, date());
    assert!(event.provisional);
    assert_eq!(event.run_id, Some(7));

    // confidence = 60 / (60 + 30)
    assert!((event.confidence - 2.0 / 3.0).abs() < 1e-12);

    assert_eq!(event.evidence.reasons.len(), 5);
    assert_eq!(event.evidence.score, 60.0);
    assert!(event.evidence.thresholds.get("volume_gates").is_some());
    assert!(event.evidence.thresholds.get("rsi_oversold").is_some());

    let texts = event.evidence.reason_texts();
    assert_eq!(texts[0], "L1: condition at level 1");
}

#[test]
fn missing_catalog_row_is_drift() {
    let catalog = StrategyCatalog::seeded();
    let params = EngineParams::default();
    let assembler = SignalAssembler::new(&catalog, &params, None);

    // "BXRK5" is a well-formed code with no catalog row behind it.
    let result = assembler.assemble("AAPL", date(), &evaluation("BXRK", 5, 60.0), false);
    assert!(matches!(
        result,
        Err(EngineError::UnknownStrategy { ref key }) if key == "BXRK5"
    ));
}

#[test]
fn inactive_row_is_skipped_silently() {
    let mut catalog = StrategyCatalog::seeded();
    catalog.deactivate("BBRK5");
    let params = EngineParams::default();
    let assembler = SignalAssembler::new(&catalog, &params, None);

    let result = assembler
        .assemble("AAPL", date(), &evaluation("BBRK", 5, 60.0), false)
        .expect("not an error");
    assert!(result.is_none());

    // The neighboring strength level is unaffected
    let other = assembler
        .assemble("AAPL", date(), &evaluation("BBRK", 4, 50.0), false)
        .unwrap();
    assert!(other.is_some());
}

#[test]
fn confidence_is_monotonic_and_bounded() {
    assert_eq!(confidence_from_score(0.0), 0.0);
    assert_eq!(confidence_from_score(-5.0), 0.0);
    let mut prev = 0.0;
    for score in [1.0, 10.0, 30.0, 60.0, 95.0, 1000.0] {
        let c = confidence_from_score(score);
        assert!(c > prev, "not monotonic at score {}", score);
        assert!(c < 1.0);
        prev = c;
    }
}

//! TXYZn signal code validation tests

use stratix::models::strategy::{Side, SignalCode};

#[test]
fn accepts_well_formed_codes() {
    for code in ["BBRK5", "SOBR1", "BMAC9", "SBND3"] {
        let parsed = SignalCode::parse(code).expect(code);
        assert_eq!(parsed.as_str(), code);
    }
}

#[test]
fn rejects_malformed_codes() {
    for code in [
        "",      // empty
        "BBRK",  // missing strength
        "BBRK0", // strength below 1
        "BBRKX", // non-digit strength
        "bbrk5", // lowercase body
        "XBRK5", // bad side letter
        "BBRK10", // too long
        "BBR5",  // too short
        "BB1K5", // digit in body
    ] {
        assert!(SignalCode::parse(code).is_err(), "accepted {:?}", code);
    }
}

#[test]
fn accessors_decompose_the_code() {
    let code = SignalCode::parse("SBDN7").unwrap();
    assert_eq!(code.side(), Side::Sell);
    assert_eq!(code.base_strategy(), "SBDN");
    assert_eq!(code.strength(), 7);
}

#[test]
fn from_parts_round_trips() {
    let code = SignalCode::from_parts("BBRK", 8).unwrap();
    assert_eq!(code.as_str(), "BBRK8");
    assert!(SignalCode::from_parts("BBRK", 0).is_err());
    assert!(SignalCode::from_parts("BRK", 5).is_err());
}

#[test]
fn serde_rejects_invalid_input() {
    let ok: Result<SignalCode, _> = serde_json::from_str("\"BBRK5\"");
    assert!(ok.is_ok());
    let bad: Result<SignalCode, _> = serde_json::from_str("\"BBRK0\"");
    assert!(bad.is_err());

    let json = serde_json::to_string(&SignalCode::parse("SRES2").unwrap()).unwrap();
    assert_eq!(json, "\"SRES2\"");
}

//! Strategy catalog seeding tests

use stratix::signals::catalog::StrategyCatalog;

#[test]
fn seeds_all_one_hundred_eight_rows() {
    let catalog = StrategyCatalog::seeded();
    assert_eq!(catalog.len(), 108);
    assert!(!catalog.is_empty());

    let breakout_rows = catalog
        .definitions()
        .filter(|d| d.base_strategy == "BBRK")
        .count();
    assert_eq!(breakout_rows, 9);
}

#[test]
fn every_row_upholds_the_key_invariant() {
    let catalog = StrategyCatalog::seeded();
    for def in catalog.definitions() {
        let expected = format!("{}{}", def.base_strategy, def.strength);
        assert_eq!(def.strategy_key.as_str(), expected);
        assert_eq!(def.strategy_key.side(), def.side);
        assert_eq!(def.strategy_key.strength(), def.strength);
        assert!((1..=9).contains(&def.strength));
        assert!(def.active);
        assert!(!def.name.is_empty());
        assert!(!def.description.is_empty());
    }
}

#[test]
fn descriptions_accumulate_with_strength() {
    let catalog = StrategyCatalog::seeded();
    let l1 = catalog.get("BBRK1").expect("BBRK1 seeded");
    let l2 = catalog.get("BBRK2").expect("BBRK2 seeded");
    let l9 = catalog.get("BBRK9").expect("BBRK9 seeded");

    assert!(l2.description.starts_with(&l1.description));
    assert!(l2.description.len() > l1.description.len());
    assert!(l9.description.starts_with(&l1.description));
    // 9 cumulative conditions joined by "; "
    assert_eq!(l9.description.matches("; ").count(), 8);
}

#[test]
fn deactivation_flips_only_the_targeted_row() {
    let mut catalog = StrategyCatalog::seeded();
    assert!(catalog.deactivate("BBRK5"));
    assert!(!catalog.get("BBRK5").unwrap().active);
    assert!(catalog.get("BBRK4").unwrap().active);
    assert!(catalog.get("BBRK6").unwrap().active);
    assert!(!catalog.deactivate("ZZZZ9"));
}

#[test]
fn unknown_keys_miss() {
    let catalog = StrategyCatalog::seeded();
    assert!(catalog.get("BXRK5").is_none());
    assert!(catalog.get("bbrk5").is_none());
}

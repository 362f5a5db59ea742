//! Strategy catalog: the 108 seeded signal definitions
//!
//! One row per (base strategy, strength level), seeded from the rule table so
//! the two can never start out divergent. The catalog is an immutable
//! snapshot loaded once per run and passed explicitly to the assembler;
//! concurrent runs against different catalog versions stay isolated.

use std::collections::HashMap;

use crate::models::strategy::{SignalCode, StrategyDefinition};
use crate::strategies::rules::rule_table;

#[derive(Debug, Clone)]
pub struct StrategyCatalog {
    by_key: HashMap<String, StrategyDefinition>,
}

impl StrategyCatalog {
    /// Seed the full 12 x 9 catalog from the rule table. Every row starts
    /// active; operators deactivate rows before the catalog is shared.
    pub fn seeded() -> Self {
        let mut by_key = HashMap::new();
        for rules in rule_table().iter() {
            for level in 1..=9u8 {
                // Cumulative condition text: the base trigger plus every
                // incremental condition up to this level.
                let description = rules
                    .levels
                    .iter()
                    .take(level as usize)
                    .map(|r| r.description)
                    .collect::<Vec<_>>()
                    .join("; ");

                let strategy_key = SignalCode::from_parts(rules.base, level)
                    .expect("rule table base strategies always form valid codes");

                let definition = StrategyDefinition {
                    base_strategy: rules.base.to_string(),
                    side: rules.side,
                    strength: level,
                    name: format!("{} (strength {})", rules.name, level),
                    description,
                    category: rules.category,
                    active: true,
                    strategy_key: strategy_key.clone(),
                };
                by_key.insert(strategy_key.as_str().to_string(), definition);
            }
        }
        Self { by_key }
    }

    pub fn get(&self, key: &str) -> Option<&StrategyDefinition> {
        self.by_key.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &StrategyDefinition> {
        self.by_key.values()
    }

    /// Mark a row inactive. Only meaningful before the catalog snapshot is
    /// handed to a run.
    pub fn deactivate(&mut self, key: &str) -> bool {
        match self.by_key.get_mut(key) {
            Some(def) => {
                def.active = false;
                true
            }
            None => false,
        }
    }
}

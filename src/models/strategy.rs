//! Strategy catalog data models and the TXYZn signal code

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction side of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn prefix(&self) -> char {
        match self {
            Side::Buy => 'B',
            Side::Sell => 'S',
        }
    }
}

/// Strategy family category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyCategory {
    Breakout,
    MeanReversion,
    Trend,
    Divergence,
    Level,
}

/// Validated 5-character TXYZn signal code: `^[BS][A-Z]{3}[1-9]$`.
///
/// This is the one wire-format detail downstream consumers pattern-match on,
/// so construction is the only path to an instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SignalCode(String);

impl SignalCode {
    pub fn parse(code: &str) -> Result<Self, String> {
        let bytes = code.as_bytes();
        if bytes.len() != 5 {
            return Err(format!("Signal code '{}' must be exactly 5 characters", code));
        }
        if bytes[0] != b'B' && bytes[0] != b'S' {
            return Err(format!("Signal code '{}' must start with B or S", code));
        }
        if !bytes[1..4].iter().all(|b| b.is_ascii_uppercase()) {
            return Err(format!(
                "Signal code '{}' must have an uppercase 3-letter strategy body",
                code
            ));
        }
        if !(b'1'..=b'9').contains(&bytes[4]) {
            return Err(format!("Signal code '{}' must end with strength 1-9", code));
        }
        Ok(Self(code.to_string()))
    }

    /// Assemble a code from a 4-character base family and a strength level.
    pub fn from_parts(base_strategy: &str, strength: u8) -> Result<Self, String> {
        Self::parse(&format!("{}{}", base_strategy, strength))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn side(&self) -> Side {
        if self.0.starts_with('B') {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    /// 4-character base family, e.g. "BBRK" for "BBRK5".
    pub fn base_strategy(&self) -> &str {
        &self.0[..4]
    }

    /// Strength digit 1-9.
    pub fn strength(&self) -> u8 {
        self.0.as_bytes()[4] - b'0'
    }
}

impl fmt::Display for SignalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SignalCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SignalCode::parse(&value)
    }
}

impl From<SignalCode> for String {
    fn from(code: SignalCode) -> Self {
        code.0
    }
}

/// One catalog row: a strategy family at one strength level.
///
/// Seeded once from the rule table; only `active` and metadata are mutable
/// afterwards. Invariant: `strategy_key = side prefix + base_strategy[1..] +
/// strength`, and exactly 9 rows exist per base family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDefinition {
    pub strategy_key: SignalCode,
    pub base_strategy: String,
    pub side: Side,
    pub strength: u8,
    pub name: String,
    /// Exact cumulative condition text for this level.
    pub description: String,
    pub category: StrategyCategory,
    pub active: bool,
}

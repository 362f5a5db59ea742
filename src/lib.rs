//! Stratix: strategic signal engine.
//!
//! Turns a symbol's daily OHLCV history into a catalog of versioned,
//! evidence-backed trading signals in the TXYZn code format (side letter,
//! three-letter strategy family, strength digit 1-9).
//!
//! The pipeline is deterministic: price history plus a [`models::run::ParameterSet`]
//! always reproduces the same signal events, byte for byte. The crate has no
//! CLI or network surface; a batch driver calls [`signals::engine::BatchRunner`]
//! (or [`signals::engine::SignalEngine::evaluate_symbol`] directly).

pub mod config;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod registry;
pub mod signals;
pub mod store;
pub mod strategies;

/// Engine version tag carried by every ParameterSet. Bump on any change to
/// indicator math, the rule table, or the evidence score formula.
pub const ENGINE_VERSION: &str = "1.0.0";

pub use error::EngineError;
pub use models::candle::Candle;
pub use models::params::EngineParams;
pub use models::run::{ParameterSet, RunStatus, RunSummary, SignalRun};
pub use models::signal::SignalEvent;
pub use signals::engine::{BatchRunner, SignalEngine};

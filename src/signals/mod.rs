pub mod assembler;
pub mod catalog;
pub mod engine;

pub use assembler::SignalAssembler;
pub use catalog::StrategyCatalog;
pub use engine::{BatchRunner, SignalEngine};

pub mod rsi;
pub mod stochastic;

pub mod candle;
pub mod indicators;
pub mod params;
pub mod run;
pub mod signal;
pub mod strategy;

pub mod adx;
pub mod ema;
pub mod macd;
pub mod sar;

pub mod momentum;
pub mod trend;
pub mod vector;
pub mod volatility;
pub mod volume;

pub use vector::compute_series;

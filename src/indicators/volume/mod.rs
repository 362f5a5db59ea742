pub mod flow;
pub mod mfi;

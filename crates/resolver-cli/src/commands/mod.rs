pub mod names;
pub mod resolve;

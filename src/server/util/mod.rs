//! Small helpers shared by the data and service layers.

pub mod filter;
pub mod parse;
pub mod time;
pub mod validate;

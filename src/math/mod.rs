//! Mathematical utilities: scalar statistics and least squares.

pub mod stats;

pub use stats::*;

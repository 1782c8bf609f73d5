//! Input/output helpers.
//!
//! - selection JSON export (`export`)

pub mod export;

pub use export::*;

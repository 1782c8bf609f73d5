//! Candidate filtering, fit assessment, and final ranking.

pub mod assess;
pub mod candidates;
pub mod selection;

pub use assess::*;
pub use candidates::*;
pub use selection::*;

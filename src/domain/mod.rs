//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - input data (`PredictionData`, `DataPoint`, `PredictionTask`, `ModelConstraints`)
//! - the derived dataset profile (`DataCharacteristics`)
//! - catalog entries (`ModelInfo`)
//! - evaluation and selection outputs (`ModelFitAssessment`, `ModelSelection`)

pub mod types;

pub use types::*;

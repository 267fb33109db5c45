//! Cost Projection
//!
//! Converts a predicted consumption rate, trip distance, fuel price and toll
//! fee into fuel required and monetary cost.

mod projector;

pub use projector::{project, EstimationResult, ProjectionError};

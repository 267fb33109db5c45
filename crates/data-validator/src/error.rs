//! Validation Error Types

use thiserror::Error;

/// Errors during input validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Text longer than allowed
    #[error("{field} is {actual} characters, at most {max} allowed")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Fields that contradict each other
    #[error("Conflicting fields: {0}")]
    Conflict(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

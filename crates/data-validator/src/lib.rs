//! Input Validation
//!
//! Range and format checks for trip cost requests before they reach the
//! estimation workflow.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{TripInput, ValidationConfig, ValidationResult, Validator};

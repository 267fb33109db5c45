//! Trip Request Validator

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Longest trip accepted (km)
    pub max_distance_km: f64,
    /// Largest toll fee accepted
    pub max_toll_cost: f64,
    /// Longest origin/destination label
    pub max_label_len: usize,
    /// Longest custom car name
    pub max_custom_name_len: usize,
    /// Largest page size for listing endpoints
    pub max_page_size: u32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_distance_km: 10_000.0,
            max_toll_cost: 10_000_000.0,
            max_label_len: 200,
            max_custom_name_len: 100,
            max_page_size: 100,
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    fn from_checks(fields_checked: usize, errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            fields_checked,
        }
    }

    /// Collapse into the first error, if any
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Trip fields supplied by the caller
#[derive(Debug, Clone)]
pub struct TripInput<'a> {
    pub distance: f64,
    pub tolls: bool,
    pub toll_cost: f64,
    pub origin: &'a str,
    pub destination: &'a str,
}

/// Validator for trip cost requests
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against an inclusive range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() || value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Distance must be strictly positive
    pub fn validate_distance(&self, distance: f64) -> Result<(), ValidationError> {
        self.validate_range("distance", distance, (0.0, self.config.max_distance_km))?;
        if distance == 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "distance",
                value: distance,
                min: 0.0,
                max: self.config.max_distance_km,
            });
        }
        Ok(())
    }

    /// Toll cost must be non-negative, and zero when the route has no tolls
    pub fn validate_tolls(&self, tolls: bool, toll_cost: f64) -> Result<(), ValidationError> {
        self.validate_range("tollCost", toll_cost, (0.0, self.config.max_toll_cost))?;
        if !tolls && toll_cost > 0.0 {
            return Err(ValidationError::Conflict(format!(
                "tollCost is {} but tolls is false",
                toll_cost
            )));
        }
        Ok(())
    }

    /// Non-blank label within the length limit
    pub fn validate_label(&self, field: &'static str, label: &str) -> Result<(), ValidationError> {
        self.validate_text(field, label, self.config.max_label_len)
    }

    pub fn validate_custom_name(&self, name: &str) -> Result<(), ValidationError> {
        self.validate_text("customName", name, self.config.max_custom_name_len)
    }

    pub fn validate_page_size(&self, size: u32) -> Result<(), ValidationError> {
        if size == 0 || size > self.config.max_page_size {
            return Err(ValidationError::OutOfRange {
                field: "size",
                value: f64::from(size),
                min: 1.0,
                max: f64::from(self.config.max_page_size),
            });
        }
        Ok(())
    }

    /// Check every trip field and collect all failures
    pub fn validate_trip(&self, input: &TripInput<'_>) -> ValidationResult {
        let checks = [
            self.validate_distance(input.distance),
            self.validate_tolls(input.tolls, input.toll_cost),
            self.validate_label("from", input.origin),
            self.validate_label("destination", input.destination),
        ];
        let fields_checked = checks.len();

        let errors: Vec<ValidationError> = checks.into_iter().filter_map(Result::err).collect();
        if !errors.is_empty() {
            debug!("Trip input rejected: {:?}", errors);
        }

        ValidationResult::from_checks(fields_checked, errors)
    }

    fn validate_text(&self, field: &'static str, text: &str, max: usize) -> Result<(), ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::MissingField(field));
        }
        let actual = text.chars().count();
        if actual > max {
            return Err(ValidationError::TooLong { field, max, actual });
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

//! Projector Implementation

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

/// Errors during cost projection
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProjectionError {
    /// The consumption rate cannot be divided by. Indicates a model or data
    /// problem, not bad user input.
    #[error("Degenerate consumption rate {0}: cannot compute fuel required")]
    DivisionByZero(f64),
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidInput { field: &'static str, value: f64 },
}

/// Outcome of one projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    /// km per liter
    pub consumption_rate: f64,
    /// Liters
    pub total_fuel: f64,
    pub fuel_cost: f64,
    pub toll_cost: f64,
}

impl EstimationResult {
    /// Always derived, never stored
    pub fn total_cost(&self) -> f64 {
        self.fuel_cost + self.toll_cost
    }
}

/// Project fuel and cost for a trip.
///
/// `total_fuel = distance / consumption_rate`, `fuel_cost = total_fuel *
/// fuel_price`. The rate must be finite and strictly positive.
pub fn project(
    distance: f64,
    consumption_rate: f64,
    fuel_price: f64,
    toll_cost: f64,
) -> Result<EstimationResult, ProjectionError> {
    check_non_negative("distance", distance)?;
    check_non_negative("fuel_price", fuel_price)?;
    check_non_negative("toll_cost", toll_cost)?;

    if !consumption_rate.is_finite() || consumption_rate <= 0.0 {
        error!("Refusing to project with consumption rate {}", consumption_rate);
        return Err(ProjectionError::DivisionByZero(consumption_rate));
    }

    let total_fuel = distance / consumption_rate;
    let fuel_cost = total_fuel * fuel_price;

    // A positive but vanishing rate still overflows
    if !total_fuel.is_finite() || !fuel_cost.is_finite() {
        error!(
            "Consumption rate {:e} overflows fuel projection for {} km",
            consumption_rate, distance
        );
        return Err(ProjectionError::DivisionByZero(consumption_rate));
    }

    debug!(
        "Projected {:.2} km at {:.3} km/l: {:.3} l, fuel {:.2}, toll {:.2}",
        distance, consumption_rate, total_fuel, fuel_cost, toll_cost
    );

    Ok(EstimationResult {
        consumption_rate,
        total_fuel,
        fuel_cost,
        toll_cost,
    })
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ProjectionError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ProjectionError::InvalidInput { field, value })
    }
}

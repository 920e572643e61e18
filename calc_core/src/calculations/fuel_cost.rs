//! # Fuel Cost
//!
//! Trip fuel estimate: `fuel_needed = distance / efficiency`,
//! `total_cost = fuel_needed * fuel_price`.
//!
//! Units are whatever the user thinks in, as long as they agree: km with
//! km/L and price per litre, or miles with mpg and price per gallon.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::fuel_cost::{calculate, FuelCostInput};
//!
//! let input = FuelCostInput { distance: 400.0, efficiency: 15.0, fuel_price: 100.0 };
//! let result = calculate(&input).unwrap();
//! assert!((result.total_cost - 2666.67).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::forms;

/// Input parameters for a fuel cost estimate.
///
/// ## JSON Example
///
/// ```json
/// { "distance": 400.0, "efficiency": 15.0, "fuel_price": 100.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCostInput {
    /// Trip distance
    pub distance: f64,
    /// Distance covered per unit of fuel
    pub efficiency: f64,
    /// Price per unit of fuel
    pub fuel_price: f64,
}

impl FuelCostInput {
    /// Parse raw form fields.
    pub fn from_fields(distance: &str, efficiency: &str, fuel_price: &str) -> CalcResult<Self> {
        Ok(FuelCostInput {
            distance: forms::parse_positive("distance", distance)?,
            efficiency: forms::parse_positive("efficiency", efficiency)?,
            fuel_price: forms::parse_positive("fuel_price", fuel_price)?,
        })
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("distance", self.distance),
            ("efficiency", self.efficiency),
            ("fuel_price", self.fuel_price),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be greater than zero"));
            }
        }
        Ok(())
    }
}

/// Results from a fuel cost estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelCostResult {
    /// Fuel required for the trip
    pub fuel_needed: f64,
    /// Cost of that fuel
    pub total_cost: f64,
}

/// Estimate fuel needed and its cost.
pub fn calculate(input: &FuelCostInput) -> CalcResult<FuelCostResult> {
    input.validate()?;
    let fuel_needed = input.distance / input.efficiency;
    Ok(FuelCostResult {
        fuel_needed,
        total_cost: fuel_needed * input.fuel_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_trip() {
        let input = FuelCostInput { distance: 400.0, efficiency: 15.0, fuel_price: 100.0 };
        let result = calculate(&input).unwrap();
        assert!((result.fuel_needed - 26.667).abs() < 1e-3);
        assert!((result.total_cost - 2666.67).abs() < 1e-2);
    }

    #[test]
    fn test_rejects_non_positive() {
        let input = FuelCostInput { distance: 400.0, efficiency: 0.0, fuel_price: 100.0 };
        match calculate(&input).unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "efficiency"),
            other => panic!("unexpected error: {:?}", other),
        }

        let input = FuelCostInput { distance: -1.0, efficiency: 15.0, fuel_price: 100.0 };
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_from_fields() {
        let input = FuelCostInput::from_fields("400", "15", "100").unwrap();
        assert_eq!(input.distance, 400.0);
        assert!(FuelCostInput::from_fields("400", "", "100").is_err());
        assert!(FuelCostInput::from_fields("far", "15", "100").is_err());
    }
}

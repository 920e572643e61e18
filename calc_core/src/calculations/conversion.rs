//! # Unit Conversion (one-shot)
//!
//! Calculator wrapper around [`crate::units::convert`] for the converter
//! pages' "convert" button and for API callers that just want a number.

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::forms;
use crate::sync::DEFAULT_DECIMALS;
use crate::units::{round_to, ConversionRequest, Quantity};

/// ## JSON Example
///
/// ```json
/// { "quantity": "mass", "value": 5.0, "from_unit": "kg", "to_unit": "lb" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionInput {
    pub quantity: Quantity,
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
}

impl ConversionInput {
    pub fn from_fields(quantity: Quantity, value: &str, from_unit: &str, to_unit: &str) -> CalcResult<Self> {
        Ok(ConversionInput {
            quantity,
            value: forms::parse_number("value", value)?,
            from_unit: forms::require_text("from_unit", from_unit)?.to_string(),
            to_unit: forms::require_text("to_unit", to_unit)?.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Exact converted value
    pub value: f64,
    /// Value rounded for display
    pub display_value: f64,
    pub from_name: String,
    pub to_name: String,
}

pub fn calculate(input: &ConversionInput) -> CalcResult<ConversionOutput> {
    let table = input.quantity.table();
    let request = ConversionRequest {
        value: input.value,
        from_unit: input.from_unit.clone(),
        to_unit: input.to_unit.clone(),
    };
    let value = request.run(table)?.value;
    Ok(ConversionOutput {
        value,
        display_value: round_to(value, DEFAULT_DECIMALS),
        from_name: table.unit(&input.from_unit)?.display_name.clone(),
        to_name: table.unit(&input.to_unit)?.display_name.clone(),
    })
}

//! # Calculators
//!
//! Every calculator on the site follows the same pattern:
//!
//! - `*Input` - Input record (JSON-serializable), with `from_fields` for raw
//!   form text and `validate()` for already-typed input
//! - `*Result` - Output record (JSON-serializable)
//! - `calculate(&input) -> CalcResult<*Result>` - Pure function
//!
//! No calculator depends on another and none keeps state.
//!
//! ## Available Calculators
//!
//! - [`conversion`] - Mass / speed / length conversion
//! - [`fuel_cost`] - Trip fuel and cost
//! - [`modulo`] - Truncating remainder
//! - [`lucky_number`] - Date digital root
//! - [`love_score`] - Name compatibility (entertainment)
//! - [`percentage`] - Percent of, what percent, percent change
//! - [`bmi`] - Body mass index
//! - [`age`] - Exact age
//! - [`income_tax`] - Slab income tax

pub mod age;
pub mod bmi;
pub mod conversion;
pub mod fuel_cost;
pub mod income_tax;
pub mod love_score;
pub mod lucky_number;
pub mod modulo;
pub mod percentage;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

pub use age::{AgeInput, AgeResult};
pub use bmi::{BmiInput, BmiResult};
pub use conversion::{ConversionInput, ConversionOutput};
pub use fuel_cost::{FuelCostInput, FuelCostResult};
pub use income_tax::{IncomeTaxInput, IncomeTaxResult};
pub use love_score::{LoveScoreInput, LoveScoreResult};
pub use lucky_number::{LuckyNumberInput, LuckyNumberResult};
pub use modulo::{ModuloInput, ModuloResult};
pub use percentage::{PercentageInput, PercentageResult};

/// Request for any calculator.
///
/// ```json
/// { "calculator": "modulo", "dividend": 17, "divisor": 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorRequest {
    Conversion(ConversionInput),
    FuelCost(FuelCostInput),
    Modulo(ModuloInput),
    LuckyNumber(LuckyNumberInput),
    LoveScore(LoveScoreInput),
    Percentage(PercentageInput),
    Bmi(BmiInput),
    Age(AgeInput),
    IncomeTax(IncomeTaxInput),
}

/// Output of any calculator, tagged the same way as the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorOutput {
    Conversion(ConversionOutput),
    FuelCost(FuelCostResult),
    Modulo(ModuloResult),
    LuckyNumber(LuckyNumberResult),
    LoveScore(LoveScoreResult),
    Percentage(PercentageResult),
    Bmi(BmiResult),
    Age(AgeResult),
    IncomeTax(IncomeTaxResult),
}

impl CalculatorRequest {
    /// Calculator identifier, matching the serde tag
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculatorRequest::Conversion(_) => "conversion",
            CalculatorRequest::FuelCost(_) => "fuel_cost",
            CalculatorRequest::Modulo(_) => "modulo",
            CalculatorRequest::LuckyNumber(_) => "lucky_number",
            CalculatorRequest::LoveScore(_) => "love_score",
            CalculatorRequest::Percentage(_) => "percentage",
            CalculatorRequest::Bmi(_) => "bmi",
            CalculatorRequest::Age(_) => "age",
            CalculatorRequest::IncomeTax(_) => "income_tax",
        }
    }
}

/// Run whichever calculator the request names.
pub fn evaluate(request: &CalculatorRequest) -> CalcResult<CalculatorOutput> {
    Ok(match request {
        CalculatorRequest::Conversion(i) => CalculatorOutput::Conversion(conversion::calculate(i)?),
        CalculatorRequest::FuelCost(i) => CalculatorOutput::FuelCost(fuel_cost::calculate(i)?),
        CalculatorRequest::Modulo(i) => CalculatorOutput::Modulo(modulo::calculate(i)?),
        CalculatorRequest::LuckyNumber(i) => CalculatorOutput::LuckyNumber(lucky_number::calculate(i)?),
        CalculatorRequest::LoveScore(i) => CalculatorOutput::LoveScore(love_score::calculate(i)?),
        CalculatorRequest::Percentage(i) => CalculatorOutput::Percentage(percentage::calculate(i)?),
        CalculatorRequest::Bmi(i) => CalculatorOutput::Bmi(bmi::calculate(i)?),
        CalculatorRequest::Age(i) => CalculatorOutput::Age(age::calculate(i)?),
        CalculatorRequest::IncomeTax(i) => CalculatorOutput::IncomeTax(income_tax::calculate(i)?),
    })
}

impl CalculatorOutput {
    /// One-line plain-text result for the copy/share buttons.
    pub fn summary(&self) -> String {
        match self {
            CalculatorOutput::Conversion(r) => {
                format!("{} {}", r.display_value, r.to_name)
            }
            CalculatorOutput::FuelCost(r) => {
                format!("Fuel needed: {:.2}, total cost: {:.2}", r.fuel_needed, r.total_cost)
            }
            CalculatorOutput::Modulo(r) => format!("Remainder: {}", r.remainder),
            CalculatorOutput::LuckyNumber(r) => format!("Your lucky number is {}", r.lucky_number),
            CalculatorOutput::LoveScore(r) => format!("{}% - {}", r.score, r.message),
            CalculatorOutput::Percentage(r) => match r.mode {
                percentage::PercentageMode::PercentOf => format!("Result: {:.4}", r.value),
                _ => format!("Result: {:.2}%", r.value),
            },
            CalculatorOutput::Bmi(r) => format!("BMI {:.1} ({})", r.bmi, r.category.display_name()),
            CalculatorOutput::Age(r) => {
                format!("{} years, {} months, {} days", r.years, r.months, r.days)
            }
            CalculatorOutput::IncomeTax(r) => format!(
                "Total tax: {:.2} (effective rate {:.2}%)",
                r.total_tax, r.effective_rate_percent
            ),
        }
    }
}

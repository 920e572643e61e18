//! # Body Mass Index
//!
//! `bmi = weight_kg / height_m²`, classified with the WHO adult cut-offs.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::forms;

/// Input parameters for BMI.
///
/// ## JSON Example
///
/// ```json
/// { "weight_kg": 70.0, "height_cm": 175.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiInput {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
}

impl BmiInput {
    pub fn from_fields(weight_kg: &str, height_cm: &str) -> CalcResult<Self> {
        Ok(BmiInput {
            weight_kg: forms::parse_positive("weight_kg", weight_kg)?,
            height_cm: forms::parse_positive("height_cm", height_cm)?,
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(CalcError::invalid_input(
                "weight_kg",
                self.weight_kg.to_string(),
                "Weight must be positive",
            ));
        }
        if !self.height_cm.is_finite() || self.height_cm <= 0.0 {
            return Err(CalcError::invalid_input(
                "height_cm",
                self.height_cm.to_string(),
                "Height must be positive",
            ));
        }
        if self.height_cm > 300.0 {
            return Err(CalcError::invalid_input(
                "height_cm",
                self.height_cm.to_string(),
                "Height exceeds 300 cm - did you enter millimeters?",
            ));
        }
        Ok(())
    }
}

/// WHO adult weight category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
}

pub fn calculate(input: &BmiInput) -> CalcResult<BmiResult> {
    input.validate()?;
    let height_m = input.height_cm / 100.0;
    let bmi = input.weight_kg / (height_m * height_m);
    Ok(BmiResult {
        bmi,
        category: BmiCategory::from_bmi(bmi),
    })
}

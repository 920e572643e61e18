//! # Percentage
//!
//! The three questions people ask a percentage calculator:
//!
//! - `PercentOf`: what is X% of Y?
//! - `WhatPercent`: X is what percent of Y?
//! - `Change`: by what percent did a value go from X to Y?

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::forms;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageMode {
    PercentOf,
    WhatPercent,
    Change,
}

impl PercentageMode {
    pub fn parse(s: &str) -> CalcResult<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "percent_of" | "of" => Ok(PercentageMode::PercentOf),
            "what_percent" | "what" => Ok(PercentageMode::WhatPercent),
            "change" => Ok(PercentageMode::Change),
            other => Err(CalcError::invalid_input(
                "mode",
                other,
                "Expected one of: percent_of, what_percent, change",
            )),
        }
    }
}

/// ## JSON Example
///
/// ```json
/// { "mode": "percent_of", "x": 15.0, "y": 80.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageInput {
    pub mode: PercentageMode,
    pub x: f64,
    pub y: f64,
}

impl PercentageInput {
    pub fn from_fields(mode: &str, x: &str, y: &str) -> CalcResult<Self> {
        Ok(PercentageInput {
            mode: PercentageMode::parse(mode)?,
            x: forms::parse_number("x", x)?,
            y: forms::parse_number("y", y)?,
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !self.x.is_finite() {
            return Err(CalcError::invalid_input("x", self.x.to_string(), "Must be a number"));
        }
        if !self.y.is_finite() {
            return Err(CalcError::invalid_input("y", self.y.to_string(), "Must be a number"));
        }
        match self.mode {
            PercentageMode::WhatPercent if self.y == 0.0 => {
                Err(CalcError::invalid_input("y", "0", "Whole cannot be zero"))
            }
            PercentageMode::Change if self.x == 0.0 => {
                Err(CalcError::invalid_input("x", "0", "Starting value cannot be zero"))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageResult {
    pub mode: PercentageMode,
    pub value: f64,
}

pub fn calculate(input: &PercentageInput) -> CalcResult<PercentageResult> {
    input.validate()?;
    let value = match input.mode {
        PercentageMode::PercentOf => input.x / 100.0 * input.y,
        PercentageMode::WhatPercent => input.x / input.y * 100.0,
        PercentageMode::Change => (input.y - input.x) / input.x.abs() * 100.0,
    };
    Ok(PercentageResult { mode: input.mode, value })
}

//! # Unit Conversion Engine
//!
//! Table-driven conversion for the converter pages. Every convertible
//! quantity has one [`UnitTable`]: a fixed list of units, each carrying its
//! multiplicative factor relative to the quantity's base unit.
//!
//! ## Base Units
//!
//! - Mass: kilogram (kg)
//! - Speed: meters per second (m/s)
//! - Length: meter (m)
//!
//! Pixel/em conversion has a configurable base size and lives in
//! [`crate::pixel_em`] instead.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{convert, Quantity};
//!
//! let table = Quantity::Mass.table();
//! let pounds = convert(1.0, "kg", "lb", table).unwrap();
//! assert!((pounds - 2.20462).abs() < 1e-5);
//! ```

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Unit Definitions
// ============================================================================

/// A named unit and its factor relative to the table's base unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDef {
    /// Short key used in requests (e.g., "kg", "mph")
    pub key: String,
    /// Human-readable name (e.g., "Kilogram")
    pub display_name: String,
    /// Multiply a value in this unit by this factor to get the base unit
    pub factor_to_base: f64,
}

impl UnitDef {
    pub fn new(key: impl Into<String>, display_name: impl Into<String>, factor_to_base: f64) -> Self {
        UnitDef {
            key: key.into(),
            display_name: display_name.into(),
            factor_to_base,
        }
    }
}

/// Convertible quantities with a built-in unit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    Mass,
    Speed,
    Length,
}

impl Quantity {
    /// All quantities with built-in tables
    pub const ALL: [Quantity; 3] = [Quantity::Mass, Quantity::Speed, Quantity::Length];

    /// Lower-case identifier, as used in URLs and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::Mass => "mass",
            Quantity::Speed => "speed",
            Quantity::Length => "length",
        }
    }

    /// The static unit table for this quantity
    pub fn table(&self) -> &'static UnitTable {
        match self {
            Quantity::Mass => &MASS_UNITS,
            Quantity::Speed => &SPEED_UNITS,
            Quantity::Length => &LENGTH_UNITS,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quantity {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mass" | "weight" => Ok(Quantity::Mass),
            "speed" | "velocity" => Ok(Quantity::Speed),
            "length" | "distance" => Ok(Quantity::Length),
            other => Err(CalcError::not_found(format!("quantity '{}'", other))),
        }
    }
}

// ============================================================================
// Unit Tables
// ============================================================================

/// Immutable unit table for one quantity.
///
/// Invariants (enforced by [`UnitTable::new`]):
/// - exactly one unit has a factor of exactly 1 (the base unit)
/// - every factor is positive and finite
/// - keys are unique
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitTable {
    quantity: String,
    units: Vec<UnitDef>,
}

impl UnitTable {
    /// Build a table, rejecting any that break the table invariants.
    pub fn new(quantity: impl Into<String>, units: Vec<UnitDef>) -> CalcResult<Self> {
        let table = UnitTable {
            quantity: quantity.into(),
            units,
        };
        table.validate()?;
        Ok(table)
    }

    fn builtin(quantity: &str, units: &[(&str, &str, f64)]) -> Self {
        UnitTable {
            quantity: quantity.to_string(),
            units: units
                .iter()
                .map(|(key, name, factor)| UnitDef::new(*key, *name, *factor))
                .collect(),
        }
    }

    /// Check the table invariants.
    pub fn validate(&self) -> CalcResult<()> {
        let base_count = self.units.iter().filter(|u| u.factor_to_base == 1.0).count();
        if base_count != 1 {
            return Err(CalcError::invalid_input(
                "units",
                format!("{} base units", base_count),
                format!("Table '{}' must have exactly one unit with factor 1", self.quantity),
            ));
        }

        for (i, unit) in self.units.iter().enumerate() {
            if !unit.factor_to_base.is_finite() || unit.factor_to_base <= 0.0 {
                return Err(CalcError::invalid_input(
                    format!("units.{}", unit.key),
                    unit.factor_to_base.to_string(),
                    "Conversion factor must be positive and finite",
                ));
            }
            if self.units[..i].iter().any(|u| u.key == unit.key) {
                return Err(CalcError::invalid_input(
                    "units",
                    unit.key.clone(),
                    "Duplicate unit key",
                ));
            }
        }
        Ok(())
    }

    /// Name of the quantity this table converts
    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    /// Units in display order
    pub fn units(&self) -> &[UnitDef] {
        &self.units
    }

    /// Look up a unit by key
    pub fn get(&self, key: &str) -> Option<&UnitDef> {
        self.units.iter().find(|u| u.key == key)
    }

    /// Look up a unit by key, failing with `UnknownUnit`
    pub fn unit(&self, key: &str) -> CalcResult<&UnitDef> {
        self.get(key)
            .ok_or_else(|| CalcError::unknown_unit(self.quantity.clone(), key))
    }

    /// The base unit (factor exactly 1)
    pub fn base_unit(&self) -> Option<&UnitDef> {
        self.units.iter().find(|u| u.factor_to_base == 1.0)
    }
}

static MASS_UNITS: Lazy<UnitTable> = Lazy::new(|| {
    UnitTable::builtin(
        "mass",
        &[
            ("mg", "Milligram", 1e-6),
            ("g", "Gram", 1e-3),
            ("kg", "Kilogram", 1.0),
            ("t", "Metric Ton", 1000.0),
            ("oz", "Ounce", 0.028_349_523_125),
            ("lb", "Pound", 0.453_592_37),
            ("st", "Stone", 6.350_293_18),
        ],
    )
});

static SPEED_UNITS: Lazy<UnitTable> = Lazy::new(|| {
    UnitTable::builtin(
        "speed",
        &[
            ("mps", "Meters per Second", 1.0),
            ("kmh", "Kilometers per Hour", 1.0 / 3.6),
            ("mph", "Miles per Hour", 0.447_04),
            ("fps", "Feet per Second", 0.3048),
            ("knot", "Knot", 1852.0 / 3600.0),
        ],
    )
});

static LENGTH_UNITS: Lazy<UnitTable> = Lazy::new(|| {
    UnitTable::builtin(
        "length",
        &[
            ("mm", "Millimeter", 1e-3),
            ("cm", "Centimeter", 1e-2),
            ("m", "Meter", 1.0),
            ("km", "Kilometer", 1000.0),
            ("in", "Inch", 0.0254),
            ("ft", "Foot", 0.3048),
            ("yd", "Yard", 0.9144),
            ("mi", "Mile", 1609.344),
        ],
    )
});

// ============================================================================
// Conversion
// ============================================================================

/// A single conversion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
}

/// Result of a conversion (computed, never stored)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub value: f64,
}

/// Convert `value` from one unit to another within `table`.
///
/// `value * from.factor_to_base / to.factor_to_base`. Out-of-domain values
/// (negative mass, say) are converted unconditionally; that check belongs to
/// the form layer.
pub fn convert(value: f64, from_unit: &str, to_unit: &str, table: &UnitTable) -> CalcResult<f64> {
    let from = table.unit(from_unit)?;
    let to = table.unit(to_unit)?;
    if to.factor_to_base == 0.0 {
        return Err(CalcError::invalid_input(
            "to_unit",
            to_unit,
            "Unit has a zero conversion factor",
        ));
    }
    if from_unit == to_unit {
        return Ok(value);
    }
    Ok(value * from.factor_to_base / to.factor_to_base)
}

impl ConversionRequest {
    /// Run this request against `table`
    pub fn run(&self, table: &UnitTable) -> CalcResult<ConversionResult> {
        convert(self.value, &self.from_unit, &self.to_unit, table).map(|value| ConversionResult { value })
    }
}

/// Round to a fixed number of decimal places for display and write-back.
///
/// Non-finite values pass through untouched.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

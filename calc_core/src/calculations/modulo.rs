//! # Modulo
//!
//! Remainder of a truncating division. The sign of the remainder follows
//! the dividend: `-7 mod 3 = -1`, `7 mod -3 = 1`. A zero divisor never
//! reaches [`calculate`]; it fails validation first.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::forms;

/// Input parameters for a modulo calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuloInput {
    pub dividend: f64,
    pub divisor: f64,
}

impl ModuloInput {
    /// Parse raw form fields.
    pub fn from_fields(dividend: &str, divisor: &str) -> CalcResult<Self> {
        Ok(ModuloInput {
            dividend: forms::parse_number("dividend", dividend)?,
            divisor: forms::parse_non_zero("divisor", divisor)?,
        })
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.dividend.is_finite() {
            return Err(CalcError::invalid_input("dividend", self.dividend.to_string(), "Must be a number"));
        }
        if !self.divisor.is_finite() {
            return Err(CalcError::invalid_input("divisor", self.divisor.to_string(), "Must be a number"));
        }
        if self.divisor == 0.0 {
            return Err(CalcError::invalid_input("divisor", "0", "Divisor cannot be zero"));
        }
        Ok(())
    }
}

/// Results from a modulo calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModuloResult {
    /// `dividend % divisor`
    pub remainder: f64,
    /// Truncated quotient, so that `quotient * divisor + remainder == dividend`
    pub quotient: f64,
}

/// Compute the remainder and truncated quotient.
pub fn calculate(input: &ModuloInput) -> CalcResult<ModuloResult> {
    input.validate()?;
    Ok(ModuloResult {
        remainder: input.dividend % input.divisor,
        quotient: (input.dividend / input.divisor).trunc(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rem(dividend: f64, divisor: f64) -> f64 {
        calculate(&ModuloInput { dividend, divisor }).unwrap().remainder
    }

    #[test]
    fn test_sign_follows_dividend() {
        assert_eq!(rem(17.0, 5.0), 2.0);
        assert_eq!(rem(-7.0, 3.0), -1.0);
        assert_eq!(rem(7.0, -3.0), 1.0);
        assert_eq!(rem(-7.0, -3.0), -1.0);
    }

    #[test]
    fn test_fractional_operands() {
        assert!((rem(5.5, 2.0) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_quotient_reconstructs_dividend() {
        for (a, b) in [(17.0, 5.0), (-7.0, 3.0), (100.0, 7.0), (3.0, 10.0)] {
            let r = calculate(&ModuloInput { dividend: a, divisor: b }).unwrap();
            assert_eq!(r.remainder, a % b);
            assert!((r.quotient * b + r.remainder - a).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_divisor_rejected() {
        assert!(calculate(&ModuloInput { dividend: 5.0, divisor: 0.0 }).is_err());
        assert!(ModuloInput::from_fields("5", "0").is_err());
        assert!(ModuloInput::from_fields("5", "").is_err());
    }
}

//! # Income Tax
//!
//! Progressive slab tax (Indian new regime, FY 2024-25 figures):
//!
//! | Taxable income (₹)   | Rate |
//! |----------------------|------|
//! | 0 – 3,00,000         | 0%   |
//! | 3,00,000 – 7,00,000  | 5%   |
//! | 7,00,000 – 10,00,000 | 10%  |
//! | 10,00,000 – 12,00,000| 15%  |
//! | 12,00,000 – 15,00,000| 20%  |
//! | above 15,00,000      | 30%  |
//!
//! Salaried filers get a standard deduction. A full rebate applies when
//! taxable income does not exceed the rebate limit, and a 4% health and
//! education cess is added on whatever tax remains.
//!
//! Marginal relief around the rebate limit and surcharges on very high
//! incomes are not modelled.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::income_tax::{calculate, IncomeTaxInput};
//!
//! let result = calculate(&IncomeTaxInput { annual_income: 1_000_000.0, salaried: true }).unwrap();
//! assert_eq!(result.total_tax, 44_200.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::forms;

/// One band of the slab table. `upper` is `None` for the top band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxSlab {
    pub lower: f64,
    pub upper: Option<f64>,
    /// Rate in whole percent
    pub rate_percent: f64,
}

pub static SLABS: &[TaxSlab] = &[
    TaxSlab { lower: 0.0, upper: Some(300_000.0), rate_percent: 0.0 },
    TaxSlab { lower: 300_000.0, upper: Some(700_000.0), rate_percent: 5.0 },
    TaxSlab { lower: 700_000.0, upper: Some(1_000_000.0), rate_percent: 10.0 },
    TaxSlab { lower: 1_000_000.0, upper: Some(1_200_000.0), rate_percent: 15.0 },
    TaxSlab { lower: 1_200_000.0, upper: Some(1_500_000.0), rate_percent: 20.0 },
    TaxSlab { lower: 1_500_000.0, upper: None, rate_percent: 30.0 },
];

pub const STANDARD_DEDUCTION: f64 = 75_000.0;
pub const REBATE_LIMIT: f64 = 700_000.0;
pub const CESS_PERCENT: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxInput {
    /// Gross annual income
    pub annual_income: f64,
    /// Apply the salaried standard deduction
    #[serde(default = "default_salaried")]
    pub salaried: bool,
}

fn default_salaried() -> bool {
    true
}

impl IncomeTaxInput {
    pub fn from_fields(annual_income: &str, salaried: bool) -> CalcResult<Self> {
        Ok(IncomeTaxInput {
            annual_income: forms::parse_number("annual_income", annual_income)?,
            salaried,
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !self.annual_income.is_finite() || self.annual_income < 0.0 {
            return Err(CalcError::invalid_input(
                "annual_income",
                self.annual_income.to_string(),
                "Income cannot be negative",
            ));
        }
        Ok(())
    }
}

/// Tax charged inside one slab
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlabTax {
    pub lower: f64,
    pub upper: Option<f64>,
    pub rate_percent: f64,
    pub taxable_in_slab: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxResult {
    pub taxable_income: f64,
    pub breakdown: Vec<SlabTax>,
    /// Sum of slab taxes before rebate
    pub slab_tax: f64,
    pub rebate: f64,
    pub cess: f64,
    pub total_tax: f64,
    /// Total tax as a percent of gross income
    pub effective_rate_percent: f64,
}

pub fn calculate(input: &IncomeTaxInput) -> CalcResult<IncomeTaxResult> {
    input.validate()?;

    let deduction = if input.salaried { STANDARD_DEDUCTION } else { 0.0 };
    let taxable_income = (input.annual_income - deduction).max(0.0);

    let breakdown: Vec<SlabTax> = SLABS
        .iter()
        .filter(|slab| taxable_income > slab.lower)
        .map(|slab| {
            let top = slab.upper.map_or(taxable_income, |u| u.min(taxable_income));
            let taxable_in_slab = top - slab.lower;
            SlabTax {
                lower: slab.lower,
                upper: slab.upper,
                rate_percent: slab.rate_percent,
                taxable_in_slab,
                tax: taxable_in_slab * slab.rate_percent / 100.0,
            }
        })
        .collect();

    let slab_tax: f64 = breakdown.iter().map(|s| s.tax).sum();
    let rebate = if taxable_income <= REBATE_LIMIT { slab_tax } else { 0.0 };
    let after_rebate = slab_tax - rebate;
    let cess = after_rebate * CESS_PERCENT / 100.0;
    let total_tax = after_rebate + cess;

    let effective_rate_percent = if input.annual_income > 0.0 {
        total_tax / input.annual_income * 100.0
    } else {
        0.0
    };

    Ok(IncomeTaxResult {
        taxable_income,
        breakdown,
        slab_tax,
        rebate,
        cess,
        total_tax,
        effective_rate_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tax(annual_income: f64, salaried: bool) -> IncomeTaxResult {
        calculate(&IncomeTaxInput { annual_income, salaried }).unwrap()
    }

    #[test]
    fn test_slabs_are_contiguous() {
        for pair in SLABS.windows(2) {
            assert_eq!(pair[0].upper, Some(pair[1].lower));
        }
        assert_eq!(SLABS[0].lower, 0.0);
        assert!(SLABS.last().unwrap().upper.is_none());
    }

    #[test]
    fn test_ten_lakh_salaried() {
        let r = tax(1_000_000.0, true);
        assert_eq!(r.taxable_income, 925_000.0);
        assert_eq!(r.slab_tax, 42_500.0);
        assert_eq!(r.rebate, 0.0);
        assert_eq!(r.cess, 1_700.0);
        assert_eq!(r.total_tax, 44_200.0);
        assert!((r.effective_rate_percent - 4.42).abs() < 1e-9);
        assert_eq!(r.breakdown.len(), 3);
    }

    #[test]
    fn test_rebate_zeroes_tax_at_limit() {
        let r = tax(700_000.0, false);
        assert_eq!(r.slab_tax, 20_000.0);
        assert_eq!(r.rebate, 20_000.0);
        assert_eq!(r.total_tax, 0.0);
    }

    #[test]
    fn test_top_slab() {
        let r = tax(2_000_000.0, false);
        // 20000 + 30000 + 30000 + 60000 + 150000
        assert_eq!(r.slab_tax, 290_000.0);
        assert_eq!(r.total_tax, 301_600.0);
    }

    #[test]
    fn test_income_below_deduction() {
        let r = tax(50_000.0, true);
        assert_eq!(r.taxable_income, 0.0);
        assert!(r.breakdown.is_empty());
        assert_eq!(r.total_tax, 0.0);
    }

    #[test]
    fn test_negative_income_rejected() {
        assert!(calculate(&IncomeTaxInput { annual_income: -1.0, salaried: true }).is_err());
    }
}

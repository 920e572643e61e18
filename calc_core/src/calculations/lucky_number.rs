//! # Lucky Number
//!
//! Numerology for fun: write the date as day, month and year digits side by
//! side, add the digits up, and keep adding until one digit is left.
//!
//! 15 May 1990 → "15" "5" "1990" → 1+5+5+1+9+9+0 = 30 → 3+0 = **3**.
//!
//! ```rust
//! use calc_core::calculations::lucky_number::lucky_number;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(1990, 5, 15).unwrap();
//! assert_eq!(lucky_number(date), 3);
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::forms;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuckyNumberInput {
    /// Birth date (ISO `YYYY-MM-DD` on the wire)
    pub date: NaiveDate,
}

impl LuckyNumberInput {
    /// Parse a raw date field.
    pub fn from_fields(date: &str) -> CalcResult<Self> {
        Ok(LuckyNumberInput {
            date: forms::parse_date("date", date)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckyNumberResult {
    /// Single digit in 1..=9
    pub lucky_number: u8,
    /// First-pass digit sum, before reduction
    pub digit_sum: u32,
}

/// Sum of the decimal digits of `day ‖ month ‖ year`.
pub fn date_digit_sum(date: NaiveDate) -> u32 {
    let digits = format!("{}{}{}", date.day(), date.month(), date.year().unsigned_abs());
    digits.chars().filter_map(|c| c.to_digit(10)).sum()
}

/// Repeatedly sum decimal digits until a single digit remains.
pub fn digital_root(mut n: u64) -> u8 {
    while n >= 10 {
        let mut sum = 0;
        while n > 0 {
            sum += n % 10;
            n /= 10;
        }
        n = sum;
    }
    n as u8
}

/// Lucky number for a calendar date, always in 1..=9.
pub fn lucky_number(date: NaiveDate) -> u8 {
    digital_root(u64::from(date_digit_sum(date)))
}

pub fn calculate(input: &LuckyNumberInput) -> CalcResult<LuckyNumberResult> {
    let digit_sum = date_digit_sum(input.date);
    Ok(LuckyNumberResult {
        lucky_number: digital_root(u64::from(digit_sum)),
        digit_sum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reference_date() {
        let result = calculate(&LuckyNumberInput { date: date(1990, 5, 15) }).unwrap();
        assert_eq!(result.digit_sum, 30);
        assert_eq!(result.lucky_number, 3);
    }

    #[test]
    fn test_digital_root() {
        assert_eq!(digital_root(0), 0);
        assert_eq!(digital_root(7), 7);
        assert_eq!(digital_root(38), 2);
        assert_eq!(digital_root(999_999_999), 9);
    }

    #[test]
    fn test_always_single_nonzero_digit() {
        let mut d = date(1900, 1, 1);
        let end = date(2100, 12, 31);
        while d <= end {
            let n = lucky_number(d);
            assert!((1..=9).contains(&n), "{} gave {}", d, n);
            d = d + chrono::Duration::days(97);
        }
    }

    #[test]
    fn test_from_fields() {
        assert_eq!(LuckyNumberInput::from_fields("2000-01-01").unwrap().date, date(2000, 1, 1));
        assert!(LuckyNumberInput::from_fields("2000-13-01").is_err());
    }
}

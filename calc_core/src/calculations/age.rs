//! # Age
//!
//! Exact age between a birth date and an "as of" date, as calendar years,
//! months and days plus the total day count.
//!
//! Whole months are counted first; the remaining days run from the
//! month-anniversary to the as-of date. A birthday on the 31st reaches its
//! anniversary on the last day of shorter months.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::forms;

/// ## JSON Example
///
/// ```json
/// { "birth_date": "1990-05-15", "as_of": "2024-03-10" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeInput {
    pub birth_date: NaiveDate,
    pub as_of: NaiveDate,
}

impl AgeInput {
    /// Parse raw form fields. An empty `as_of` means today.
    pub fn from_fields(birth_date: &str, as_of: &str, today: NaiveDate) -> CalcResult<Self> {
        let birth_date = forms::parse_date("birth_date", birth_date)?;
        let as_of = if as_of.trim().is_empty() {
            today
        } else {
            forms::parse_date("as_of", as_of)?
        };
        Ok(AgeInput { birth_date, as_of })
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.birth_date > self.as_of {
            return Err(CalcError::invalid_input(
                "birth_date",
                self.birth_date.to_string(),
                "Birth date is after the as-of date",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeResult {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub total_days: i64,
}

pub fn calculate(input: &AgeInput) -> CalcResult<AgeResult> {
    input.validate()?;
    let birth = input.birth_date;
    let as_of = input.as_of;

    let add_months = |n: u32| {
        birth.checked_add_months(Months::new(n)).ok_or_else(|| CalcError::Internal {
            message: format!("date overflow adding {} months to {}", n, birth),
        })
    };

    // month addition clamps to month end, so compare anniversaries, not days of month
    let months_apart = (as_of.year() - birth.year()) * 12 + as_of.month() as i32 - birth.month() as i32;
    let mut whole_months = months_apart.max(0) as u32;
    let mut anniversary = add_months(whole_months)?;
    while anniversary > as_of && whole_months > 0 {
        whole_months -= 1;
        anniversary = add_months(whole_months)?;
    }

    let days = (as_of - anniversary).num_days().max(0) as u32;

    Ok(AgeResult {
        years: whole_months / 12,
        months: whole_months % 12,
        days,
        total_days: (as_of - birth).num_days(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn age(birth: NaiveDate, as_of: NaiveDate) -> AgeResult {
        calculate(&AgeInput { birth_date: birth, as_of }).unwrap()
    }

    #[test]
    fn test_years_months_days() {
        let a = age(date(1990, 5, 15), date(2024, 3, 10));
        assert_eq!((a.years, a.months, a.days), (33, 9, 24));
    }

    #[test]
    fn test_on_birthday() {
        let a = age(date(2000, 2, 29), date(2024, 2, 29));
        assert_eq!((a.years, a.months, a.days), (24, 0, 0));
        assert_eq!(a.total_days, 8766);
    }

    #[test]
    fn test_month_end_birthday() {
        let a = age(date(2023, 1, 31), date(2023, 3, 1));
        assert_eq!((a.years, a.months, a.days), (0, 1, 1));
    }

    #[test]
    fn test_month_end_birthday_reaches_anniversary_in_february() {
        let a = age(date(2023, 1, 31), date(2023, 2, 28));
        assert_eq!((a.years, a.months, a.days), (0, 1, 0));

        let a = age(date(2023, 1, 31), date(2023, 2, 27));
        assert_eq!((a.years, a.months, a.days), (0, 0, 27));
    }

    #[test]
    fn test_same_day() {
        let a = age(date(2020, 6, 1), date(2020, 6, 1));
        assert_eq!((a.years, a.months, a.days, a.total_days), (0, 0, 0, 0));
    }

    #[test]
    fn test_future_birth_rejected() {
        assert!(calculate(&AgeInput { birth_date: date(2030, 1, 1), as_of: date(2024, 1, 1) }).is_err());
    }

    #[test]
    fn test_from_fields_defaults_to_today() {
        let today = date(2024, 3, 10);
        let input = AgeInput::from_fields("1990-05-15", "", today).unwrap();
        assert_eq!(input.as_of, today);
    }
}

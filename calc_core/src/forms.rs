//! # Form Boundary
//!
//! Raw text from form fields and command-line arguments is parsed here,
//! before any calculator sees it. Every failure names the offending field so
//! front ends can render the message inline.
//!
//! ```rust
//! use calc_core::forms;
//!
//! assert_eq!(forms::parse_number("distance", " 400 ").unwrap(), 400.0);
//! assert!(forms::parse_positive("distance", "-5").is_err());
//! assert!(forms::parse_non_zero("divisor", "0").is_err());
//! ```

use chrono::NaiveDate;

use crate::errors::{CalcError, CalcResult};

/// Parse a finite number. Blank input is a missing field.
pub fn parse_number(field: &str, raw: &str) -> CalcResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::missing_field(field));
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CalcError::invalid_input(field, trimmed, "Must be a number")),
    }
}

/// Parse a number that must be strictly greater than zero.
pub fn parse_positive(field: &str, raw: &str) -> CalcResult<f64> {
    let value = parse_number(field, raw)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, raw.trim(), "Must be greater than zero"));
    }
    Ok(value)
}

/// Parse a number that must not be zero (divisors).
pub fn parse_non_zero(field: &str, raw: &str) -> CalcResult<f64> {
    let value = parse_number(field, raw)?;
    if value == 0.0 {
        return Err(CalcError::invalid_input(field, raw.trim(), "Cannot be zero"));
    }
    Ok(value)
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(field: &str, raw: &str) -> CalcResult<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::missing_field(field));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| CalcError::invalid_input(field, trimmed, "Must be a date in YYYY-MM-DD format"))
}

/// Require non-blank text, returning it trimmed.
pub fn require_text<'a>(field: &str, raw: &'a str) -> CalcResult<&'a str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::missing_field(field));
    }
    Ok(trimmed)
}

/// Lenient parse for live-edited fields: `None` means "leave the paired
/// field alone".
pub fn parse_lenient(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("x", "3.5").unwrap(), 3.5);
        assert_eq!(parse_number("x", "  -2 ").unwrap(), -2.0);
        assert_eq!(parse_number("x", "").unwrap_err(), CalcError::missing_field("x"));
        assert!(parse_number("x", "abc").is_err());
        assert!(parse_number("x", "NaN").is_err());
        assert!(parse_number("x", "inf").is_err());
    }

    #[test]
    fn test_parse_positive_and_non_zero() {
        assert!(parse_positive("efficiency", "0").is_err());
        assert_eq!(parse_positive("efficiency", "15").unwrap(), 15.0);
        assert_eq!(parse_non_zero("divisor", "-3").unwrap(), -3.0);
        match parse_non_zero("divisor", "0.0").unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "divisor"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_date() {
        let d = parse_date("birth_date", "1990-05-15").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(1990, 5, 15).unwrap());
        assert!(parse_date("birth_date", "1990-02-30").is_err());
        assert!(parse_date("birth_date", "15/05/1990").is_err());
        assert_eq!(parse_date("birth_date", " ").unwrap_err(), CalcError::missing_field("birth_date"));
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("name1", "  Alex ").unwrap(), "Alex");
        assert!(require_text("name1", "   ").is_err());
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_lenient("12.5"), Some(12.5));
        assert_eq!(parse_lenient("12."), Some(12.0));
        assert_eq!(parse_lenient("-"), None);
        assert_eq!(parse_lenient(""), None);
        assert_eq!(parse_lenient("nan"), None);
    }
}

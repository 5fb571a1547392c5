//! Helper functions shared by CLI command handlers

use chrono::{Local, NaiveDate};

use crate::error::{CoachError, Result};

/// Parse an optional `YYYY-MM-DD` argument, defaulting to today
pub fn parse_date_arg(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            CoachError::Other(format!("Invalid date '{}', expected YYYY-MM-DD", s))
        }),
        None => Ok(today()),
    }
}

/// The local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a macro value without trailing noise
///
/// Whole numbers print without a decimal point, everything else with one
/// decimal place.
pub fn fmt_macro(value: f64) -> String {
    if (value - value.round()).abs() < f64::EPSILON {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg() {
        let date = parse_date_arg(Some("2025-03-14")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());

        assert_eq!(parse_date_arg(None).unwrap(), today());

        let err = parse_date_arg(Some("03/14/2025")).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_fmt_macro() {
        assert_eq!(fmt_macro(70.0), "70");
        assert_eq!(fmt_macro(0.6), "0.6");
        assert_eq!(fmt_macro(165.0), "165");
        assert_eq!(fmt_macro(4.3), "4.3");
    }
}

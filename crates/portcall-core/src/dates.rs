//! Whole-day date helpers shared by the generator, the reconciliation engine
//! and the wire formats.
//!
//! Dates travel as `YYYY-MM-DD` strings. An empty string means "no date" and
//! is how a skipped port call is written.

use jiff::{civil::Date, Span};

use crate::error::{PlannerError, Result};

/// Parses a required `YYYY-MM-DD` date.
pub fn parse_date(field: &str, value: &str) -> Result<Date> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PlannerError::invalid_input(field).with_reason("Date is required"));
    }
    trimmed.parse::<Date>().map_err(|e| {
        PlannerError::invalid_input(field)
            .with_reason(format!("'{trimmed}' is not a YYYY-MM-DD date: {e}"))
    })
}

/// Parses an optional date where the empty string stands for "no date".
pub fn parse_optional_date(field: &str, value: &str) -> Result<Option<Date>> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(field, value).map(Some)
    }
}

/// Adds a whole number of days to a date.
pub fn add_days(date: Date, days: i64) -> Result<Date> {
    Span::new()
        .try_days(days)
        .and_then(|span| date.checked_add(span))
        .map_err(|e| {
            PlannerError::invalid_input("date")
                .with_reason(format!("Cannot move {date} by {days} days: {e}"))
        })
}

/// Signed number of days from `from` to `to`.
pub fn days_between(from: Date, to: Date) -> Result<i64> {
    let span = to.since(from).map_err(|e| {
        PlannerError::invalid_input("date")
            .with_reason(format!("Cannot measure days between {from} and {to}: {e}"))
    })?;
    Ok(i64::from(span.get_days()))
}

/// Formats an optional date for the wire, using the empty string for `None`.
pub fn format_date(date: Option<Date>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_parse_date_accepts_iso_days() {
        assert_eq!(
            parse_date("start_date", "2026-01-01").unwrap(),
            date(2026, 1, 1)
        );
        assert_eq!(
            parse_date("start_date", " 2026-03-15 ").unwrap(),
            date(2026, 3, 15)
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("arrival", "01.01.2026").unwrap_err();
        assert!(err.is_validation());
        assert!(parse_date("arrival", "2026-02-30").is_err());
        assert!(parse_date("arrival", "").is_err());
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date("arrival", "").unwrap(), None);
        assert_eq!(parse_optional_date("arrival", "   ").unwrap(), None);
        assert_eq!(
            parse_optional_date("arrival", "2026-01-04").unwrap(),
            Some(date(2026, 1, 4))
        );
    }

    #[test]
    fn test_day_arithmetic() {
        let start = date(2026, 12, 30);
        assert_eq!(add_days(start, 3).unwrap(), date(2027, 1, 2));
        assert_eq!(add_days(start, -30).unwrap(), date(2026, 11, 30));
        assert_eq!(days_between(date(2026, 1, 5), date(2026, 1, 10)).unwrap(), 5);
        assert_eq!(days_between(date(2026, 1, 10), date(2026, 1, 5)).unwrap(), -5);
        assert_eq!(days_between(date(2026, 1, 1), date(2027, 1, 1)).unwrap(), 365);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some(date(2026, 1, 2))), "2026-01-02");
        assert_eq!(format_date(None), "");
    }
}

//! Common validation utilities.

use validator::ValidationError;

use crate::time::{parse_date, parse_time_to_minutes};

/// Validates that a time of day is `HH:mm` or `HH:mm:ss` shaped.
pub fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    if parse_time_to_minutes(value).is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("time_format");
        err.message = Some("Invalid time format (expected HH:mm or HH:mm:ss)".into());
        Err(err)
    }
}

/// Validates that a calendar date is `YYYY-MM-DD`.
pub fn validate_calendar_date(value: &str) -> Result<(), ValidationError> {
    if parse_date(value).is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("date_format");
        err.message = Some("Invalid date format (expected YYYY-MM-DD)".into());
        Err(err)
    }
}

/// Validates that the start time is strictly before the end time, at minute resolution.
pub fn validate_time_range(start: &str, end: &str) -> Result<(), ValidationError> {
    match (parse_time_to_minutes(start), parse_time_to_minutes(end)) {
        (Some(s), Some(e)) if s < e => Ok(()),
        (Some(_), Some(_)) => {
            let mut err = ValidationError::new("time_range");
            err.message = Some("startTime must be before endTime".into());
            Err(err)
        }
        _ => validate_time_of_day(start).and_then(|_| validate_time_of_day(end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_time_of_day() {
        assert!(validate_time_of_day("09:00").is_ok());
        assert!(validate_time_of_day("09:00:30").is_ok());
        assert!(validate_time_of_day("").is_err());
        assert!(validate_time_of_day("nine").is_err());
    }

    #[test]
    fn test_validate_time_of_day_error_message() {
        let err = validate_time_of_day("x").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Invalid time format (expected HH:mm or HH:mm:ss)"
        );
    }

    #[test]
    fn test_validate_calendar_date() {
        assert!(validate_calendar_date("2024-02-29").is_ok());
        assert!(validate_calendar_date("2023-02-29").is_err());
        assert!(validate_calendar_date("tomorrow").is_err());
    }

    #[test]
    fn test_validate_time_range() {
        assert!(validate_time_range("09:00", "10:00").is_ok());
        assert!(validate_time_range("09:00:59", "09:01").is_ok());
    }

    #[test]
    fn test_validate_time_range_rejects_equal_minutes() {
        // Seconds are ignored, so these are the same minute.
        let err = validate_time_range("09:00:10", "09:00:50").unwrap_err();
        assert_eq!(err.code, "time_range");
    }

    #[test]
    fn test_validate_time_range_rejects_reversed() {
        let err = validate_time_range("11:00", "10:00").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "startTime must be before endTime"
        );
    }

    #[test]
    fn test_validate_time_range_reports_format_first() {
        let err = validate_time_range("bad", "10:00").unwrap_err();
        assert_eq!(err.code, "time_format");
    }
}

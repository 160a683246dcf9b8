//! Time-of-day and calendar-date parsing.
//!
//! Times of day travel as text (`"HH:mm"` or `"HH:mm:ss"`) and are only turned
//! into numbers for comparisons and sorting. Hour and minute components are not
//! range-checked: `"25:99"` yields `1599`.

use chrono::NaiveDate;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses `"HH:mm"` or `"HH:mm:ss"` into minutes since midnight.
///
/// Seconds are ignored. An empty input returns `None`, as does a component that
/// is not an integer. A missing or empty minute component counts as zero.
pub fn parse_time_to_minutes(text: &str) -> Option<i32> {
    if text.is_empty() {
        return None;
    }

    let mut parts = text.split(':');
    let hours = parse_component(parts.next())?;
    let minutes = parse_component(parts.next())?;

    hours.checked_mul(60)?.checked_add(minutes)
}

fn parse_component(part: Option<&str>) -> Option<i32> {
    match part.map(str::trim) {
        None | Some("") => Some(0),
        Some(value) => value.parse().ok(),
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hours_and_minutes() {
        assert_eq!(parse_time_to_minutes("09:00"), Some(540));
        assert_eq!(parse_time_to_minutes("00:00"), Some(0));
        assert_eq!(parse_time_to_minutes("23:59"), Some(1439));
    }

    #[test]
    fn test_parse_ignores_seconds() {
        assert_eq!(parse_time_to_minutes("15:30:45"), Some(930));
        assert_eq!(parse_time_to_minutes("15:30:00"), Some(930));
    }

    #[test]
    fn test_parse_empty_is_none() {
        assert_eq!(parse_time_to_minutes(""), None);
    }

    #[test]
    fn test_parse_out_of_range_is_accepted() {
        assert_eq!(parse_time_to_minutes("25:99"), Some(1599));
    }

    #[test]
    fn test_parse_missing_minutes() {
        assert_eq!(parse_time_to_minutes("9"), Some(540));
        assert_eq!(parse_time_to_minutes("9:"), Some(540));
    }

    #[test]
    fn test_parse_non_numeric_is_none() {
        assert_eq!(parse_time_to_minutes("ab:cd"), None);
        assert_eq!(parse_time_to_minutes("09:xx"), None);
        assert_eq!(parse_time_to_minutes("noon"), None);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-31"),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("31/01/2024"), None);
        assert_eq!(parse_date(""), None);
    }
}

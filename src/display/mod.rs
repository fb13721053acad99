//! Presentation models built from fetched forecasts
//!
//! Everything here is a pure function of the data; rendering to a terminal
//! lives in `text`.

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;

pub mod chart;
pub mod codes;
pub mod detail;
pub mod meteogram;
pub mod table;
pub mod text;

pub use chart::{RangePoint, temperature_ranges};
pub use codes::{WeatherStatus, weather_status};
pub use detail::{DayDetail, day_detail};
pub use meteogram::{Meteogram, SeriesPoint, WindBarb, meteogram};
pub use table::{DayRow, day_rows};

/// Placeholder for values the provider left out
pub const MISSING: &str = "-";

fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// "Monday, Oct 16, 2026" in the given timezone
#[must_use]
pub fn long_date(value: &str, tz: Tz) -> String {
    parse_time(value).map_or_else(
        || value.to_string(),
        |t| t.with_timezone(&tz).format("%A, %b %-d, %Y").to_string(),
    )
}

/// "7:04 AM" in the given timezone
#[must_use]
pub fn clock_time(value: Option<&str>, tz: Tz) -> String {
    value.and_then(parse_time).map_or_else(
        || MISSING.to_string(),
        |t| t.with_timezone(&tz).format("%-I:%M %p").to_string(),
    )
}

/// Milliseconds since the epoch
fn epoch_millis(value: &str) -> Option<i64> {
    parse_time(value).map(|t| t.timestamp_millis())
}

/// Milliseconds at UTC midnight of the timestamp's UTC day
fn utc_day_millis(value: &str) -> Option<i64> {
    parse_time(value).map(|t| {
        t.date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis()
    })
}

fn two_decimals(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v:.2}"))
}

fn plain(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_date_uses_timezone() {
        // 03:00 UTC on the 17th is still the 16th in Los Angeles
        let date = long_date("2026-10-17T03:00:00Z", chrono_tz::America::Los_Angeles);
        assert_eq!(date, "Friday, Oct 16, 2026");
        assert_eq!(long_date("not a date", chrono_tz::UTC), "not a date");
    }

    #[test]
    fn test_clock_time() {
        let tz = chrono_tz::America::Los_Angeles;
        assert_eq!(clock_time(Some("2026-10-16T14:04:00Z"), tz), "7:04 AM");
        assert_eq!(clock_time(Some("2026-10-17T01:30:00Z"), tz), "6:30 PM");
        assert_eq!(clock_time(None, tz), MISSING);
    }

    #[test]
    fn test_utc_day_millis() {
        assert_eq!(utc_day_millis("1970-01-02T13:00:00Z"), Some(86_400_000));
        assert_eq!(epoch_millis("1970-01-01T00:00:01Z"), Some(1000));
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(two_decimals(Some(71.456)), "71.46");
        assert_eq!(two_decimals(None), MISSING);
        assert_eq!(plain(Some(45.0)), "45");
        assert_eq!(plain(Some(9.94)), "9.94");
    }
}

use chrono_tz::Tz;
use serde::Serialize;

use super::{long_date, two_decimals, weather_status};
use crate::models::{DailyValues, Interval};

/// One row of the daily table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRow {
    /// 1-based position
    pub index: usize,
    pub date: String,
    pub status: &'static str,
    pub icon: &'static str,
    pub temperature_high: String,
    pub temperature_low: String,
    pub wind_speed: String,
}

#[must_use]
pub fn day_rows(intervals: &[Interval<DailyValues>], tz: Tz) -> Vec<DayRow> {
    intervals
        .iter()
        .enumerate()
        .map(|(i, interval)| {
            let values = &interval.values;
            let status = weather_status(values.weather_code);
            DayRow {
                index: i + 1,
                date: long_date(&interval.start_time, tz),
                status: status.label,
                icon: status.icon,
                temperature_high: two_decimals(values.temperature_max),
                temperature_low: two_decimals(values.temperature_min),
                wind_speed: two_decimals(values.wind_speed),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_rows() {
        let intervals = vec![
            Interval {
                start_time: "2026-10-16T13:00:00Z".to_string(),
                values: DailyValues {
                    temperature_max: Some(78.456),
                    temperature_min: Some(61.2),
                    wind_speed: Some(6.5),
                    weather_code: Some(1100),
                    ..Default::default()
                },
            },
            Interval {
                start_time: "2026-10-17T13:00:00Z".to_string(),
                values: DailyValues::default(),
            },
        ];

        let rows = day_rows(&intervals, chrono_tz::America::Los_Angeles);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].date, "Friday, Oct 16, 2026");
        assert_eq!(rows[0].status, "Mostly Clear");
        assert_eq!(rows[0].temperature_high, "78.46");
        assert_eq!(rows[0].temperature_low, "61.20");
        assert_eq!(rows[0].wind_speed, "6.50");
        assert_eq!(rows[1].status, "Unknown");
        assert_eq!(rows[1].temperature_high, "-");
    }
}
